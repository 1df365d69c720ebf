use crate::cpu::{Cpu, Registers};
use crate::{EmulatorConfig, Error, ImageKind, Result, BOOT_ROM_SIZE};

use super::cartridge::{Cartridge, CartridgeHeader};
use super::{Button, FrameBuffer, SystemBus};

/// A complete DMG: CPU plus everything behind the bus.
///
/// Typical use is to load a cartridge (and optionally a boot ROM), then
/// call [`render_frame`](Self::render_frame) once per host frame.
///
/// ```no_run
/// # fn main() -> pocketdmg::Result<()> {
/// let rom = std::fs::read("game.gb").unwrap();
/// let mut emulator = pocketdmg::Emulator::new();
/// emulator.load_cartridge(&rom)?;
/// let frame = emulator.render_frame()?;
/// assert_eq!(frame.pixels().len(), 160 * 144);
/// # Ok(())
/// # }
/// ```
pub struct Emulator {
    cpu: Cpu,
    bus: SystemBus,
    config: EmulatorConfig,
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Emulator {
    pub fn new() -> Self {
        Self::with_config(EmulatorConfig::default())
    }

    pub fn with_config(config: EmulatorConfig) -> Self {
        let mut emulator = Self {
            cpu: Cpu::new(),
            bus: SystemBus::new(),
            config,
        };
        emulator.reset();
        emulator
    }

    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    /// Power-cycle the machine, keeping the loaded images.
    ///
    /// With a boot ROM the CPU starts at 0x0000 under the overlay;
    /// otherwise it starts at 0x0100 in the state the boot ROM would have
    /// left behind. Cartridge RAM survives.
    pub fn reset(&mut self) {
        if self.bus.has_boot_rom() {
            self.cpu = Cpu::new();
            self.bus.power_on(self.config.ram_init);
        } else {
            self.cpu = Cpu::post_boot();
            self.bus.apply_dmg_post_boot_state(self.config.ram_init);
        }
    }

    /// Install a 256-byte DMG boot ROM and reset so it runs first.
    pub fn load_boot_rom(&mut self, image: &[u8]) -> Result<()> {
        let image: [u8; BOOT_ROM_SIZE] =
            image.try_into().map_err(|_| Error::InvalidImage {
                kind: ImageKind::BootRom,
                reason: format!("expected {} bytes, got {}", BOOT_ROM_SIZE, image.len()),
            })?;
        self.bus.set_boot_rom(Box::new(image));
        log::info!("Boot ROM loaded");
        self.reset();
        Ok(())
    }

    /// Insert a cartridge image and reset.
    pub fn load_cartridge(&mut self, image: &[u8]) -> Result<()> {
        if image.is_empty() {
            return Err(Error::InvalidImage {
                kind: ImageKind::Cartridge,
                reason: "image is empty".to_string(),
            });
        }
        let cartridge = Cartridge::load(image)?;
        self.bus.insert_cartridge(cartridge);
        self.reset();
        Ok(())
    }

    /// Execute one CPU step (instruction, interrupt entry or idle slot) and
    /// return the T-cycles it took.
    pub fn step(&mut self) -> Result<u32> {
        self.cpu.step(&mut self.bus)
    }

    /// Run until the PPU completes a frame and return it.
    ///
    /// While the LCD is off no frame can complete; the call then returns
    /// the previous frame once the configured cycle budget is spent.
    pub fn render_frame(&mut self) -> Result<&FrameBuffer> {
        let budget = self.config.frame_cycle_budget;
        let mut elapsed = 0u32;
        self.bus.ppu.take_frame_ready();

        loop {
            elapsed = elapsed.saturating_add(self.cpu.step(&mut self.bus)?);
            if self.bus.ppu.take_frame_ready() {
                break;
            }
            if elapsed >= budget && !self.bus.ppu.lcd_enabled() {
                break;
            }
            // LCD switched on late in the budget, or the CPU is in STOP.
            if elapsed >= budget.saturating_mul(2) {
                break;
            }
        }
        Ok(self.bus.ppu.frame())
    }

    /// The most recently completed frame.
    pub fn frame(&self) -> &FrameBuffer {
        self.bus.ppu.frame()
    }

    /// Read any address without side effects.
    pub fn peek(&self, addr: u16) -> u8 {
        self.bus.read(addr)
    }

    pub fn registers(&self) -> &Registers {
        &self.cpu.regs
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.bus
            .joypad
            .set_button(button, pressed, &mut self.bus.interrupts);
    }

    pub fn boot_rom_mapped(&self) -> bool {
        self.bus.boot_rom_mapped()
    }

    pub fn cartridge_header(&self) -> Option<&CartridgeHeader> {
        self.bus.cartridge.as_ref().map(|cart| cart.header())
    }

    /// External cartridge RAM, for hosts that persist battery saves.
    pub fn cartridge_ram(&self) -> Option<&[u8]> {
        self.bus.cartridge.as_ref().map(|cart| cart.ram())
    }

    pub fn load_cartridge_ram(&mut self, data: &[u8]) {
        if let Some(cart) = self.bus.cartridge.as_mut() {
            cart.load_ram(data);
        }
    }
}
