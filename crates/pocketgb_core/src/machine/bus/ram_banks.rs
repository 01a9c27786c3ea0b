/// Size of one external RAM bank.
pub const RAM_BANK_SIZE: usize = 0x2000;

/// Arena of external RAM banks, fixed in size when the cartridge is reset.
///
/// Bank 0 always exists (seeded from the external RAM window), even for
/// cartridges whose header declares no RAM, so that stray accesses to
/// 0xA000..0xBFFF on ROM-only games stay well defined. Selecting a bank past
/// the allocated count is a cartridge or banking bug and panics.
#[derive(Clone, Default)]
pub struct RamBanks {
    banks: Vec<[u8; RAM_BANK_SIZE]>,
}

impl RamBanks {
    pub fn new(count: usize, seed: &[u8]) -> Self {
        let mut banks = vec![[0u8; RAM_BANK_SIZE]; count.max(1)];
        let len = seed.len().min(RAM_BANK_SIZE);
        banks[0][..len].copy_from_slice(&seed[..len]);
        Self { banks }
    }

    pub fn count(&self) -> usize {
        self.banks.len()
    }

    pub fn bank(&self, index: u8) -> &[u8; RAM_BANK_SIZE] {
        let count = self.banks.len();
        self.banks
            .get(index as usize)
            .unwrap_or_else(|| panic!("RAM bank {index} out of range ({count} allocated)"))
    }

    pub fn bank_mut(&mut self, index: u8) -> &mut [u8; RAM_BANK_SIZE] {
        let count = self.banks.len();
        self.banks
            .get_mut(index as usize)
            .unwrap_or_else(|| panic!("RAM bank {index} out of range ({count} allocated)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_zero_is_seeded_and_always_present() {
        let seed = [0x5Au8; RAM_BANK_SIZE];
        let banks = RamBanks::new(0, &seed);
        assert_eq!(banks.count(), 1);
        assert!(banks.bank(0).iter().all(|&b| b == 0x5A));

        let banks = RamBanks::new(4, &seed);
        assert_eq!(banks.count(), 4);
        assert!(banks.bank(3).iter().all(|&b| b == 0));
    }

    #[test]
    #[should_panic(expected = "RAM bank 4 out of range")]
    fn out_of_range_bank_is_fatal() {
        let banks = RamBanks::new(4, &[]);
        let _ = banks.bank(4);
    }
}
