use super::{
    cartridge::Cartridge, interrupts::InterruptController, joypad::Joypad, ppu::Ppu, timer::Timer,
};
use crate::BOOT_ROM_SIZE;

mod dma;
mod init;
mod mmio;
mod traits;

/// Everything the CPU can address.
///
/// The bus owns the timer, PPU and interrupt controller so that one
/// `tick` advances them in lockstep with the cycles the CPU reports.
pub(crate) struct SystemBus {
    pub(super) cartridge: Option<Cartridge>,
    boot_rom: Option<Box<[u8; BOOT_ROM_SIZE]>>,
    /// Cleared by the first write to 0xFF50 with bit 0 set.
    boot_rom_mapped: bool,
    wram: Box<[u8; 0x2000]>,
    hram: [u8; 0x7F],
    /// Plain storage for I/O registers without behaviour here (serial,
    /// audio); unmapped addresses still read 0xFF.
    io: [u8; 0x80],
    /// Last value written to 0xFF46.
    dma_source: u8,
    pub(super) timer: Timer,
    pub(super) ppu: Ppu,
    pub(super) interrupts: InterruptController,
    pub(super) joypad: Joypad,
}

impl SystemBus {
    pub(super) fn new() -> Self {
        Self {
            cartridge: None,
            boot_rom: None,
            boot_rom_mapped: false,
            wram: Box::new([0; 0x2000]),
            hram: [0; 0x7F],
            io: [0; 0x80],
            dma_source: 0xFF,
            timer: Timer::new(),
            ppu: Ppu::new(),
            interrupts: InterruptController::new(),
            joypad: Joypad::new(),
        }
    }

    pub(super) fn insert_cartridge(&mut self, cartridge: Cartridge) {
        self.cartridge = Some(cartridge);
    }

    pub(super) fn set_boot_rom(&mut self, image: Box<[u8; BOOT_ROM_SIZE]>) {
        self.boot_rom = Some(image);
    }

    pub(super) fn has_boot_rom(&self) -> bool {
        self.boot_rom.is_some()
    }

    pub(super) fn boot_rom_mapped(&self) -> bool {
        self.boot_rom_mapped
    }

    /// Advance the timer and PPU by `cycles` T-cycles.
    pub(super) fn advance(&mut self, cycles: u32) {
        self.timer.tick(cycles, &mut self.interrupts);
        self.ppu.tick(cycles, &mut self.interrupts);
    }
}
