use super::MemoryBus;
use crate::machine::io;

/// Bytes copied by one OAM DMA transfer (0xFE00..0xFE9F).
const OAM_DMA_LENGTH: u16 = 0xA0;

impl MemoryBus {
    pub(super) fn do_oam_dma(&mut self, value: u8) {
        // OAM DMA: copy 160 bytes from source XX00..XX9F to FE00..FE9F.
        // The transfer is immediate; the 160 M-cycle bus lockout is not modelled.
        let base = (value as u16) << 8;
        for i in 0..OAM_DMA_LENGTH {
            let byte = self.read(base.wrapping_add(i));
            self.memory[0xFE00 + i as usize] = byte;
        }
        self.memory[io::DMA as usize] = value;
    }
}
