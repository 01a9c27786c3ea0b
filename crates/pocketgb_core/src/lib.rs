pub mod config;
pub mod error;
pub mod machine;
pub mod processor;

pub use config::MachineConfig;
pub use error::CartridgeError;
pub use machine::{
    BankController, Cartridge, FrameHooks, FrameStatus, Framebuffer, GameBoy, Interrupt,
    InterruptController, JoypadKey, MemoryBus, Ppu,
};
pub use processor::{CpuState, NopProcessor, Processor, RegisterPair, Registers, Step};

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
