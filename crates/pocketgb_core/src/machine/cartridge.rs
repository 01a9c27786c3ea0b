use std::path::Path;

use crate::CartridgeError;

/// Maximum cartridge image size addressable by the supported controllers.
pub const CARTRIDGE_SIZE: usize = 0x20_0000;

/// The header ends at 0x014F; anything shorter cannot be initialised.
const HEADER_END: usize = 0x150;
const TITLE: std::ops::Range<usize> = 0x134..0x144;
const CARTRIDGE_TYPE: usize = 0x147;
const ROM_SIZE: usize = 0x148;
const RAM_SIZE: usize = 0x149;

/// Memory bank controller fitted to the cartridge.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum BankController {
    /// Plain 32 KiB ROM, no banking.
    #[default]
    None,
    Mbc1,
    Mbc2,
}

impl BankController {
    /// Decode header byte 0x147.
    pub fn from_header_byte(code: u8) -> Result<Self, CartridgeError> {
        match code {
            0x00 => Ok(BankController::None),
            0x01..=0x03 => Ok(BankController::Mbc1),
            0x05 | 0x06 => Ok(BankController::Mbc2),
            other => Err(CartridgeError::UnsupportedController(other)),
        }
    }
}

/// Number of 8 KiB external RAM banks for header byte 0x149.
pub fn ram_bank_count(code: u8) -> usize {
    match code {
        0x00 => 0,
        0x01 => 1, // 2 KiB, rounded up to a full bank
        0x02 => 1,
        0x03 => 4,
        0x04 => 16,
        0x05 => 8,
        other => {
            log::warn!("Unknown RAM size code 0x{:02X}; assuming no external RAM", other);
            0
        }
    }
}

/// A validated cartridge image.
///
/// The image is always stored zero-padded to [`CARTRIDGE_SIZE`] so that bank
/// offsets never need bounds juggling at read time.
#[derive(Clone)]
pub struct Cartridge {
    image: Box<[u8]>,
    len: usize,
    controller: BankController,
    ram_banks: usize,
    rom_size_code: u8,
    title: String,
}

impl std::fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cartridge")
            .field("title", &self.title)
            .field("len", &self.len)
            .field("controller", &self.controller)
            .field("ram_banks", &self.ram_banks)
            .finish()
    }
}

impl Default for Cartridge {
    fn default() -> Self {
        Self::empty()
    }
}

impl Cartridge {
    /// An empty slot: all-zero ROM, no controller, no external RAM.
    pub fn empty() -> Self {
        Self {
            image: vec![0; CARTRIDGE_SIZE].into_boxed_slice(),
            len: 0,
            controller: BankController::None,
            ram_banks: 0,
            rom_size_code: 0,
            title: String::new(),
        }
    }

    /// Validate and copy a raw cartridge image.
    ///
    /// Nothing is kept when the header is rejected.
    pub fn from_bytes(rom: &[u8]) -> Result<Self, CartridgeError> {
        if rom.len() < HEADER_END {
            return Err(CartridgeError::TooShort { len: rom.len() });
        }
        if rom.len() > CARTRIDGE_SIZE {
            return Err(CartridgeError::TooLarge {
                len: rom.len(),
                max: CARTRIDGE_SIZE,
            });
        }

        let controller = BankController::from_header_byte(rom[CARTRIDGE_TYPE])?;
        let ram_banks = ram_bank_count(rom[RAM_SIZE]);
        let title = rom[TITLE]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
            .collect::<String>();

        let mut image = vec![0; CARTRIDGE_SIZE].into_boxed_slice();
        image[..rom.len()].copy_from_slice(rom);

        Ok(Self {
            image,
            len: rom.len(),
            controller,
            ram_banks,
            rom_size_code: rom[ROM_SIZE],
            title,
        })
    }

    /// Read a cartridge image from storage.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CartridgeError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    #[inline]
    pub fn byte(&self, offset: usize) -> u8 {
        self.image.get(offset).copied().unwrap_or(0xFF)
    }

    /// The zero-padded image.
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    /// Size of the image as loaded, before padding.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn controller(&self) -> BankController {
        self.controller
    }

    pub fn ram_bank_count(&self) -> usize {
        self.ram_banks
    }

    /// Number of 16 KiB ROM banks declared by header byte 0x148.
    pub fn declared_rom_banks(&self) -> usize {
        2usize << self.rom_size_code.min(8)
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(cart_type: u8, ram_code: u8) -> Vec<u8> {
        let mut rom = vec![0u8; 0x8000];
        rom[TITLE.start..TITLE.start + 6].copy_from_slice(b"TETRIS");
        rom[CARTRIDGE_TYPE] = cart_type;
        rom[RAM_SIZE] = ram_code;
        rom
    }

    #[test]
    fn parses_header_fields() {
        let cart = Cartridge::from_bytes(&header(0x03, 0x03)).unwrap();
        assert_eq!(cart.title(), "TETRIS");
        assert_eq!(cart.controller(), BankController::Mbc1);
        assert_eq!(cart.ram_bank_count(), 4);
        assert_eq!(cart.declared_rom_banks(), 2);
        assert_eq!(cart.len(), 0x8000);
        assert_eq!(cart.image().len(), CARTRIDGE_SIZE);
    }

    #[test]
    fn controller_codes() {
        assert_eq!(BankController::from_header_byte(0).unwrap(), BankController::None);
        for code in 1..=3 {
            assert_eq!(BankController::from_header_byte(code).unwrap(), BankController::Mbc1);
        }
        for code in [5, 6] {
            assert_eq!(BankController::from_header_byte(code).unwrap(), BankController::Mbc2);
        }
        for code in [4, 0x0F, 0x13, 0x19, 0xFF] {
            assert!(matches!(
                BankController::from_header_byte(code),
                Err(CartridgeError::UnsupportedController(c)) if c == code
            ));
        }
    }

    #[test]
    fn ram_size_codes() {
        assert_eq!(ram_bank_count(0), 0);
        assert_eq!(ram_bank_count(1), 1);
        assert_eq!(ram_bank_count(2), 1);
        assert_eq!(ram_bank_count(3), 4);
        assert_eq!(ram_bank_count(4), 16);
        assert_eq!(ram_bank_count(0x42), 0);
    }

    #[test]
    fn rejects_malformed_images() {
        assert!(matches!(
            Cartridge::from_bytes(&[0u8; 0x100]),
            Err(CartridgeError::TooShort { len: 0x100 })
        ));
        assert!(matches!(
            Cartridge::from_bytes(&vec![0u8; CARTRIDGE_SIZE + 1]),
            Err(CartridgeError::TooLarge { .. })
        ));
        assert!(matches!(
            Cartridge::from_bytes(&header(0x11, 0)),
            Err(CartridgeError::UnsupportedController(0x11))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Cartridge::from_file("/nonexistent/pocketgb/rom.gb");
        assert!(matches!(result, Err(CartridgeError::Io(_))));
    }
}
