mod bus;
mod cartridge;
mod framebuffer;
mod gameboy;
mod interrupts;
mod joypad;
mod ppu;
mod timer;

pub use bus::{BankingMode, BankingState, MemoryBus, RamBanks, RAM_BANK_SIZE};
pub use cartridge::{ram_bank_count, BankController, Cartridge, CARTRIDGE_SIZE};
pub use framebuffer::Framebuffer;
pub use gameboy::{FrameHooks, FrameStatus, GameBoy};
pub use interrupts::{ImeTransition, Interrupt, InterruptController};
pub use joypad::JoypadKey;
pub use ppu::{LcdControl, LcdMode, LcdStatus, Ppu, SCANLINE_CYCLES};
pub use timer::{clock_speed_for, TimerState};

/// Total addressable memory for the Game Boy (64 KiB).
const MEMORY_SIZE: usize = 0x10000;

/// Memory-mapped I/O register addresses.
pub mod io {
    pub const JOYP: u16 = 0xFF00;
    pub const DIV: u16 = 0xFF04;
    pub const TIMA: u16 = 0xFF05;
    pub const TMA: u16 = 0xFF06;
    pub const TAC: u16 = 0xFF07;
    pub const IF: u16 = 0xFF0F;
    pub const LCDC: u16 = 0xFF40;
    pub const STAT: u16 = 0xFF41;
    pub const SCY: u16 = 0xFF42;
    pub const SCX: u16 = 0xFF43;
    pub const LY: u16 = 0xFF44;
    pub const LYC: u16 = 0xFF45;
    pub const DMA: u16 = 0xFF46;
    pub const BGP: u16 = 0xFF47;
    pub const OBP0: u16 = 0xFF48;
    pub const OBP1: u16 = 0xFF49;
    pub const WY: u16 = 0xFF4A;
    pub const WX: u16 = 0xFF4B;
    pub const IE: u16 = 0xFFFF;
}
