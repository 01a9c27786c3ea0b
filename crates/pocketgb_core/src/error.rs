use thiserror::Error;

/// Errors raised while loading a cartridge image or initialising the machine
/// from its header.
#[derive(Debug, Error)]
pub enum CartridgeError {
    #[error("failed to read cartridge image")]
    Io(#[from] std::io::Error),
    #[error("cartridge image is {len} bytes, too short to contain a header")]
    TooShort { len: usize },
    #[error("cartridge image is {len} bytes, larger than the {max} byte cartridge space")]
    TooLarge { len: usize, max: usize },
    #[error("unsupported memory bank controller type 0x{0:02X}")]
    UnsupportedController(u8),
}
