use std::fmt;

/// Which input image a load operation rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageKind {
    BootRom,
    Cartridge,
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageKind::BootRom => f.write_str("boot ROM"),
            ImageKind::Cartridge => f.write_str("cartridge"),
        }
    }
}

/// Errors surfaced by the emulation core.
///
/// Load errors leave the emulator untouched and can be retried with a
/// different image. `IllegalOpcode` is fatal: the CPU latches it and every
/// subsequent step reports it again until the machine is reset.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid {kind} image: {reason}")]
    InvalidImage { kind: ImageKind, reason: String },

    #[error("invalid cartridge: {len} bytes is shorter than the 0x150-byte header")]
    InvalidCartridge { len: usize },

    #[error("illegal opcode {opcode:#04X} at {pc:#06X}")]
    IllegalOpcode { opcode: u8, pc: u16 },
}

pub type Result<T> = std::result::Result<T, Error>;
