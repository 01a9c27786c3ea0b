/// 16-bit views over the 8-bit register file.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RegisterPair {
    AF,
    BC,
    DE,
    HL,
}

/// Pair values the DMG boot ROM leaves behind.
const POST_BOOT_PAIRS: [(RegisterPair, u16); 4] = [
    (RegisterPair::AF, 0x01B0),
    (RegisterPair::BC, 0x0013),
    (RegisterPair::DE, 0x00D8),
    (RegisterPair::HL, 0x014D),
];

/// Architectural registers shared with the instruction decoder.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Registers {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    /// State at the cartridge entry point after the boot ROM hands over.
    pub fn post_boot() -> Self {
        let mut regs = Self {
            sp: 0xFFFE,
            pc: 0x0100,
            ..Self::default()
        };
        for (pair, value) in POST_BOOT_PAIRS {
            regs.set_pair(pair, value);
        }
        regs
    }

    pub fn pair(&self, pair: RegisterPair) -> u16 {
        let (hi, lo) = match pair {
            RegisterPair::AF => (self.a, self.f),
            RegisterPair::BC => (self.b, self.c),
            RegisterPair::DE => (self.d, self.e),
            RegisterPair::HL => (self.h, self.l),
        };
        u16::from_be_bytes([hi, lo])
    }

    /// The low nibble of F does not exist in hardware and always reads 0.
    pub fn set_pair(&mut self, pair: RegisterPair, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        match pair {
            RegisterPair::AF => {
                self.a = hi;
                self.f = lo & 0xF0;
            }
            RegisterPair::BC => (self.b, self.c) = (hi, lo),
            RegisterPair::DE => (self.d, self.e) = (hi, lo),
            RegisterPair::HL => (self.h, self.l) = (hi, lo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn af_drops_low_flag_nibble() {
        let mut regs = Registers::default();
        regs.set_pair(RegisterPair::AF, 0x12FF);
        assert_eq!(regs.f, 0xF0);
        assert_eq!(regs.pair(RegisterPair::AF), 0x12F0);
    }

    #[test]
    fn pairs_are_high_byte_first() {
        let mut regs = Registers::default();
        regs.set_pair(RegisterPair::HL, 0xC0DE);
        assert_eq!((regs.h, regs.l), (0xC0, 0xDE));
        assert_eq!(regs.pair(RegisterPair::BC), 0);
    }
}
