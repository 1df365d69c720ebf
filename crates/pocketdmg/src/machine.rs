mod bus;
mod cartridge;
mod emulator;
mod interrupts;
mod joypad;
mod ppu;
mod timer;

pub(crate) use bus::SystemBus;
pub use cartridge::{CartridgeHeader, MapperKind};
pub use emulator::Emulator;
pub use interrupts::{Interrupt, InterruptController, InterruptFlags};
pub use joypad::Button;
pub use ppu::FrameBuffer;
