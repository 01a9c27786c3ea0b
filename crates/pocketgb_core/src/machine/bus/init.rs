use super::MemoryBus;
use crate::machine::io;

impl MemoryBus {
    /// Initialize I/O registers to the state the DMG boot ROM leaves behind.
    pub(super) fn apply_power_on_io_state(&mut self) {
        // Joypad: nothing selected.
        self.memory[io::JOYP as usize] = 0xFF;

        // Timer.
        self.memory[io::TIMA as usize] = 0x00;
        self.memory[io::TMA as usize] = 0x00;
        self.memory[io::TAC as usize] = 0x00;

        // Sound registers (no APU here, but the values are visible to software).
        self.memory[0xFF10] = 0x80;
        self.memory[0xFF11] = 0xBF;
        self.memory[0xFF12] = 0xF3;
        self.memory[0xFF14] = 0xBF;
        self.memory[0xFF16] = 0x3F;
        self.memory[0xFF17] = 0x00;
        self.memory[0xFF19] = 0xBF;
        self.memory[0xFF1A] = 0x7F;
        self.memory[0xFF1B] = 0xFF;
        self.memory[0xFF1C] = 0x9F;
        self.memory[0xFF1E] = 0xBF;
        self.memory[0xFF20] = 0xFF;
        self.memory[0xFF21] = 0x00;
        self.memory[0xFF22] = 0x00;
        self.memory[0xFF23] = 0xBF;
        self.memory[0xFF24] = 0x77;
        self.memory[0xFF25] = 0xF3;
        self.memory[0xFF26] = 0xF1;

        // PPU registers.
        self.memory[io::LCDC as usize] = 0x91;
        self.memory[io::SCY as usize] = 0x00;
        self.memory[io::SCX as usize] = 0x00;
        self.memory[io::LYC as usize] = 0x00;
        self.memory[io::BGP as usize] = 0xFC;
        self.memory[io::OBP0 as usize] = 0xFF;
        self.memory[io::OBP1 as usize] = 0xFF;
        self.memory[io::WY as usize] = 0x00;
        self.memory[io::WX as usize] = 0x00;

        // Interrupt enable.
        self.memory[io::IE as usize] = 0x00;
    }
}
