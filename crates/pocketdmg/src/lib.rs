pub mod config;
pub mod cpu;
mod error;
pub mod machine;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{EmulatorConfig, RamInit};
pub use error::{Error, ImageKind, Result};
pub use machine::{
    Button, CartridgeHeader, Emulator, FrameBuffer, Interrupt, InterruptController,
    InterruptFlags, MapperKind,
};

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
/// T-cycles in one full LCD frame (154 lines of 456 cycles).
pub const FRAME_CYCLES: u32 = 70_224;
/// Exact size of the DMG boot ROM image.
pub const BOOT_ROM_SIZE: usize = 0x100;
