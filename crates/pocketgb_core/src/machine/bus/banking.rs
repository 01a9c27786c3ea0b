//! Bank-switch register semantics.
//!
//! Each register window maps to a pure transition on [`BankingState`] so the
//! controller behaviour can be checked without a full bus.
use crate::machine::BankController;

/// MBC1 addressing scheme selected through 0x6000..0x7FFF.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum BankingMode {
    /// 2 MiB ROM / one 8 KiB RAM bank: 0x4000..0x5FFF feeds ROM bank bits 5-6.
    #[default]
    LargeRom,
    /// 512 KiB ROM / four RAM banks: 0x4000..0x5FFF selects the RAM bank.
    SmallRom,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BankingState {
    controller: BankController,
    rom_bank: u8,
    ram_bank: u8,
    ram_enabled: bool,
    mode: BankingMode,
}

impl BankingState {
    pub fn new(controller: BankController) -> Self {
        Self {
            controller,
            rom_bank: 1,
            ram_bank: 0,
            ram_enabled: false,
            mode: BankingMode::LargeRom,
        }
    }

    pub fn controller(&self) -> BankController {
        self.controller
    }

    /// Active switchable ROM bank, never 0.
    pub fn rom_bank(&self) -> u8 {
        self.rom_bank
    }

    pub fn ram_bank(&self) -> u8 {
        self.ram_bank
    }

    pub fn ram_enabled(&self) -> bool {
        self.ram_enabled
    }

    pub fn mode(&self) -> BankingMode {
        self.mode
    }

    pub fn uses_mbc1(&self) -> bool {
        self.controller == BankController::Mbc1
    }

    pub fn uses_mbc2(&self) -> bool {
        self.controller == BankController::Mbc2
    }

    /// Write to 0x0000..0x1FFF.
    pub fn with_ram_enable(self, addr: u16, value: u8) -> Self {
        let gated = match self.controller {
            BankController::None => return self,
            BankController::Mbc1 => false,
            // MBC2 ignores the write unless bit 0 of the upper address byte is clear.
            BankController::Mbc2 => addr & 0x0100 != 0,
        };
        if gated {
            return self;
        }

        let ram_enabled = if value & 0x0F == 0x0A {
            true
        } else if value == 0x00 {
            false
        } else {
            self.ram_enabled
        };
        Self { ram_enabled, ..self }
    }

    /// Write to 0x2000..0x3FFF.
    pub fn with_rom_bank_low(self, value: u8) -> Self {
        let rom_bank = match self.controller {
            BankController::None => return self,
            BankController::Mbc1 => {
                let low = match value & 0x1F {
                    0 => 1,
                    low => low,
                };
                (self.rom_bank & 0xE0) | low
            }
            BankController::Mbc2 => (value & 0x0F).max(1),
        };
        Self { rom_bank, ..self }
    }

    /// Write to 0x4000..0x5FFF (MBC1 only).
    pub fn with_bank_high(self, value: u8) -> Self {
        if !self.uses_mbc1() {
            return self;
        }
        match self.mode {
            BankingMode::LargeRom => {
                debug_assert_ne!(self.rom_bank & 0x1F, 0, "ROM bank low bits never zero");
                let high = (value & 0x03) << 5;
                Self {
                    rom_bank: (self.rom_bank & 0x1F) | high,
                    ram_bank: 0,
                    ..self
                }
            }
            BankingMode::SmallRom => Self {
                ram_bank: value & 0x03,
                ..self
            },
        }
    }

    /// Write to 0x6000..0x7FFF (MBC1 only).
    pub fn with_banking_mode(self, value: u8) -> Self {
        if !self.uses_mbc1() {
            return self;
        }
        if value & 0x01 == 1 {
            Self {
                mode: BankingMode::SmallRom,
                ram_bank: 0,
                ..self
            }
        } else {
            Self {
                mode: BankingMode::LargeRom,
                ..self
            }
        }
    }

    /// Whether a write to external RAM at `addr` reaches the bank.
    pub fn ram_writable(&self, addr: u16) -> bool {
        match self.controller {
            BankController::None => false,
            BankController::Mbc1 => self.ram_enabled,
            BankController::Mbc2 => addr < 0xA200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mbc1_low_bits_merge_and_zero_maps_to_one() {
        let state = BankingState::new(BankController::Mbc1);
        assert_eq!(state.with_rom_bank_low(0x00).rom_bank(), 1);
        assert_eq!(state.with_rom_bank_low(0x20).rom_bank(), 1);
        assert_eq!(state.with_rom_bank_low(0x1F).rom_bank(), 0x1F);

        let high = state.with_bank_high(0x02);
        assert_eq!(high.rom_bank(), 0x41);
        assert_eq!(high.with_rom_bank_low(0x05).rom_bank(), 0x45);
    }

    #[test]
    fn mbc1_bank_high_keeps_low_bits_for_every_low_write() {
        let state = BankingState::new(BankController::Mbc1);
        for low in 0..=0xFFu8 {
            let selected = state.with_rom_bank_low(low);
            assert_ne!(selected.rom_bank() & 0x1F, 0);
            for high in 0..4u8 {
                let merged = selected.with_bank_high(high);
                assert_eq!(merged.rom_bank(), (high << 5) | (selected.rom_bank() & 0x1F));
            }
        }
    }

    #[test]
    fn mbc1_mode_switch_routes_high_bits_to_ram_bank() {
        let state = BankingState::new(BankController::Mbc1).with_banking_mode(0x01);
        assert_eq!(state.mode(), BankingMode::SmallRom);
        let state = state.with_bank_high(0x03);
        assert_eq!(state.ram_bank(), 3);
        assert_eq!(state.rom_bank(), 1);

        // Switching back to small-ROM mode always resets the RAM bank.
        let state = state.with_banking_mode(0x01);
        assert_eq!(state.ram_bank(), 0);

        let state = state.with_bank_high(0x02).with_banking_mode(0x00);
        assert_eq!(state.mode(), BankingMode::LargeRom);
        assert_eq!(state.ram_bank(), 2);
        assert_eq!(state.with_bank_high(0x01).ram_bank(), 0);
    }

    #[test]
    fn mbc2_ram_enable_requires_address_bit_8_clear() {
        let state = BankingState::new(BankController::Mbc2);
        assert!(!state.with_ram_enable(0x0100, 0x0A).ram_enabled());
        assert!(state.with_ram_enable(0x0000, 0x0A).ram_enabled());
        assert!(state.with_ram_enable(0x1E00, 0x0A).ram_enabled());
    }

    #[test]
    fn mbc2_rom_bank_uses_low_nibble() {
        let state = BankingState::new(BankController::Mbc2);
        assert_eq!(state.with_rom_bank_low(0x3C).rom_bank(), 0x0C);
        assert_eq!(state.with_rom_bank_low(0x10).rom_bank(), 1);
        // MBC1-only windows are ignored.
        assert_eq!(state.with_bank_high(0x03), state);
        assert_eq!(state.with_banking_mode(0x01), state);
    }

    #[test]
    fn rom_only_ignores_every_window() {
        let state = BankingState::new(BankController::None);
        assert_eq!(state.with_ram_enable(0, 0x0A), state);
        assert_eq!(state.with_rom_bank_low(0x05), state);
        assert!(!state.ram_writable(0xA000));
    }
}
