use super::{LcdControl, Mode, Ppu, StatSelect};
use crate::machine::interrupts::InterruptController;

impl Ppu {
    /// VRAM is locked to the CPU during pixel transfer.
    #[inline]
    pub(crate) fn vram_accessible(&self) -> bool {
        !self.lcd_enabled() || self.mode != Mode::Transfer
    }

    /// OAM is locked to the CPU during OAM scan and pixel transfer.
    #[inline]
    pub(crate) fn oam_accessible(&self) -> bool {
        !self.lcd_enabled() || matches!(self.mode, Mode::HBlank | Mode::VBlank)
    }

    pub(crate) fn read_vram(&self, addr: u16) -> u8 {
        if self.vram_accessible() {
            self.vram[(addr & 0x1FFF) as usize]
        } else {
            0xFF
        }
    }

    pub(crate) fn write_vram(&mut self, addr: u16, value: u8) {
        if self.vram_accessible() {
            self.vram[(addr & 0x1FFF) as usize] = value;
        }
    }

    pub(crate) fn read_oam(&self, addr: u16) -> u8 {
        if self.oam_accessible() {
            self.oam[(addr - 0xFE00) as usize]
        } else {
            0xFF
        }
    }

    pub(crate) fn write_oam(&mut self, addr: u16, value: u8) {
        if self.oam_accessible() {
            self.oam[(addr - 0xFE00) as usize] = value;
        }
    }

    /// OAM DMA source; bypasses the mode lock.
    pub(crate) fn dma_read_vram(&self, addr: u16) -> u8 {
        self.vram[(addr & 0x1FFF) as usize]
    }

    /// OAM DMA target; bypasses the mode lock.
    pub(crate) fn dma_write(&mut self, index: usize, value: u8) {
        self.oam[index] = value;
    }

    pub(crate) fn read_register(&self, addr: u16) -> u8 {
        match addr {
            0xFF40 => self.lcdc.bits(),
            0xFF41 => {
                let coincidence = if self.ly == self.lyc { 0x04 } else { 0 };
                0x80 | self.stat_select.bits() | coincidence | self.mode as u8
            }
            0xFF42 => self.scy,
            0xFF43 => self.scx,
            0xFF44 => self.ly,
            0xFF45 => self.lyc,
            0xFF47 => self.bgp,
            0xFF48 => self.obp0,
            0xFF49 => self.obp1,
            0xFF4A => self.wy,
            0xFF4B => self.wx,
            _ => 0xFF,
        }
    }

    pub(crate) fn write_register(
        &mut self,
        addr: u16,
        value: u8,
        interrupts: &mut InterruptController,
    ) {
        match addr {
            0xFF40 => self.write_lcdc(value, interrupts),
            0xFF41 => {
                self.stat_select = StatSelect::from_bits_truncate(value);
                self.update_stat(interrupts);
            }
            0xFF42 => self.scy = value,
            0xFF43 => self.scx = value,
            // LY is read-only.
            0xFF44 => {}
            0xFF45 => {
                self.lyc = value;
                self.update_stat(interrupts);
            }
            0xFF47 => self.bgp = value,
            0xFF48 => self.obp0 = value,
            0xFF49 => self.obp1 = value,
            0xFF4A => self.wy = value,
            0xFF4B => self.wx = value,
            _ => {}
        }
    }

    fn write_lcdc(&mut self, value: u8, interrupts: &mut InterruptController) {
        let was_enabled = self.lcd_enabled();
        self.lcdc = LcdControl::from_bits_retain(value);
        match (was_enabled, self.lcd_enabled()) {
            (true, false) => {
                log::debug!("PPU: LCD off at LY={}", self.ly);
                self.ly = 0;
                self.dot = 0;
                self.mode = Mode::HBlank;
                self.stat_line = false;
            }
            (false, true) => {
                log::debug!("PPU: LCD on");
                self.ly = 0;
                self.dot = 0;
                self.window_line = 0;
                self.set_mode(Mode::OamScan, interrupts);
            }
            _ => {}
        }
    }
}
