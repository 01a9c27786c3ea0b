//! LCD status state machine and scanline stepping.
//!
//! The PPU keeps a countdown to the next scanline (456 T-cycles per line).
//! Each step first recomputes STAT from the countdown and LY, then consumes
//! the elapsed cycles; when the countdown expires LY advances and, for
//! visible lines, the new line is rendered into the framebuffer.
use bitflags::bitflags;
use pocketgb_common::Color;

use super::{io, Framebuffer, Interrupt, MemoryBus};

mod render;

/// T-cycles per scanline.
pub const SCANLINE_CYCLES: i32 = 456;
/// Countdown values at and above which the line is in OAM scan (mode 2).
const OAM_SCAN_BOUND: i32 = SCANLINE_CYCLES - 80;
/// Countdown values at and above which the line is in pixel transfer (mode 3).
const TRANSFER_BOUND: i32 = OAM_SCAN_BOUND - 172;

const VBLANK_LINE: u8 = 144;
const LAST_LINE: u8 = 153;

bitflags! {
    /// LCDC (0xFF40).
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct LcdControl: u8 {
        const BG_ENABLE          = 0b0000_0001;
        const OBJ_ENABLE         = 0b0000_0010;
        const OBJ_TALL           = 0b0000_0100;
        const BG_TILE_MAP        = 0b0000_1000;
        const TILE_DATA_UNSIGNED = 0b0001_0000;
        const WINDOW_ENABLE      = 0b0010_0000;
        const WINDOW_TILE_MAP    = 0b0100_0000;
        const LCD_ENABLE         = 0b1000_0000;
    }
}

bitflags! {
    /// STAT (0xFF41) above the two mode bits.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct LcdStatus: u8 {
        const COINCIDENCE        = 0b0000_0100;
        const HBLANK_SOURCE      = 0b0000_1000;
        const VBLANK_SOURCE      = 0b0001_0000;
        const OAM_SCAN_SOURCE    = 0b0010_0000;
        const COINCIDENCE_SOURCE = 0b0100_0000;
    }
}

const MODE_MASK: u8 = 0b0000_0011;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LcdMode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Transfer = 3,
}

impl LcdMode {
    pub fn from_stat(stat: u8) -> Self {
        match stat & MODE_MASK {
            0 => LcdMode::HBlank,
            1 => LcdMode::VBlank,
            2 => LcdMode::OamScan,
            _ => LcdMode::Transfer,
        }
    }

    /// STAT bit that turns entry into this mode into an LCD-status interrupt.
    fn interrupt_source(self) -> Option<LcdStatus> {
        match self {
            LcdMode::HBlank => Some(LcdStatus::HBLANK_SOURCE),
            LcdMode::VBlank => Some(LcdStatus::VBLANK_SOURCE),
            LcdMode::OamScan => Some(LcdStatus::OAM_SCAN_SOURCE),
            LcdMode::Transfer => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Ppu {
    scanline_counter: i32,
    framebuffer: Framebuffer,
    palette: [Color; 4],
}

impl Ppu {
    pub fn new(palette: [Color; 4]) -> Self {
        let mut ppu = Self {
            scanline_counter: SCANLINE_CYCLES,
            framebuffer: Framebuffer::new(),
            palette,
        };
        ppu.reset();
        ppu
    }

    pub fn reset(&mut self) {
        self.scanline_counter = SCANLINE_CYCLES;
        self.framebuffer.clear(self.palette[0]);
    }

    /// Cycles left before LY advances.
    pub fn scanline_countdown(&self) -> i32 {
        self.scanline_counter
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn palette(&self) -> &[Color; 4] {
        &self.palette
    }

    /// Advance the LCD by `cycles` T-cycles.
    pub fn step(&mut self, bus: &mut MemoryBus, cycles: u32) {
        self.update_status(bus);

        if !Self::lcd_enabled(bus) {
            return;
        }

        self.scanline_counter -= cycles as i32;
        if self.scanline_counter <= 0 {
            self.advance_scanline(bus);
        }
    }

    fn lcd_enabled(bus: &MemoryBus) -> bool {
        LcdControl::from_bits_retain(bus.memory[io::LCDC as usize]).contains(LcdControl::LCD_ENABLE)
    }

    /// Recompute STAT's mode and coincidence bits from the countdown and LY,
    /// requesting LCD-status interrupts for enabled sources.
    pub fn update_status(&mut self, bus: &mut MemoryBus) {
        let mut stat = bus.memory[io::STAT as usize];

        if !Self::lcd_enabled(bus) {
            self.scanline_counter = SCANLINE_CYCLES;
            bus.memory[io::LY as usize] = 0;
            bus.memory[io::STAT as usize] = (stat & !MODE_MASK) | LcdMode::VBlank as u8;
            return;
        }

        let ly = bus.memory[io::LY as usize];
        let previous = LcdMode::from_stat(stat);

        let mode = if ly >= VBLANK_LINE {
            LcdMode::VBlank
        } else if self.scanline_counter >= OAM_SCAN_BOUND {
            LcdMode::OamScan
        } else if self.scanline_counter >= TRANSFER_BOUND {
            LcdMode::Transfer
        } else {
            LcdMode::HBlank
        };
        stat = (stat & !MODE_MASK) | mode as u8;

        let sources = LcdStatus::from_bits_truncate(stat);
        if mode != previous {
            if let Some(source) = mode.interrupt_source() {
                if sources.contains(source) {
                    bus.request_interrupt(Interrupt::LcdStat);
                }
            }
        }

        if ly == bus.memory[io::LYC as usize] {
            stat |= LcdStatus::COINCIDENCE.bits();
            if sources.contains(LcdStatus::COINCIDENCE_SOURCE) {
                bus.request_interrupt(Interrupt::LcdStat);
            }
        } else {
            stat &= !LcdStatus::COINCIDENCE.bits();
        }

        bus.memory[io::STAT as usize] = stat;
    }

    fn advance_scanline(&mut self, bus: &mut MemoryBus) {
        let mut ly = bus.memory[io::LY as usize].wrapping_add(1);
        self.scanline_counter = SCANLINE_CYCLES;

        if ly == VBLANK_LINE {
            bus.request_interrupt(Interrupt::VBlank);
            log::debug!("VBlank start (IF=0x{:02X})", bus.memory[io::IF as usize]);
        }
        if ly > LAST_LINE {
            ly = 0;
        }
        bus.memory[io::LY as usize] = ly;

        if ly < VBLANK_LINE {
            self.render_scanline(bus);
        }
    }
}
