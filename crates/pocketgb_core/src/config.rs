use pocketgb_common::Color;
use typed_builder::TypedBuilder;

/// Cycles executed per `GameBoy::update` call.
///
/// A full LCD refresh is 70224 T-cycles; the scheduler stops at 70221, so
/// with 4-cycle steps each frame overshoots to 70224.
pub const DEFAULT_FRAME_CYCLES: u32 = 70_221;

/// Default DMG shades indexed by palette value (0 = lightest).
pub const DEFAULT_PALETTE: [Color; 4] = [
    Color::WHITE,
    Color::LIGHT_GRAY,
    Color::DARK_GRAY,
    Color::BLACK,
];

/// Static machine configuration, fixed at construction.
#[derive(Clone, Debug, TypedBuilder)]
pub struct MachineConfig {
    #[builder(default = DEFAULT_FRAME_CYCLES)]
    pub frame_cycles: u32,
    #[builder(default = DEFAULT_PALETTE)]
    pub palette: [Color; 4],
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
