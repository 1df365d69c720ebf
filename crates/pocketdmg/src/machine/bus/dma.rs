use super::SystemBus;

impl SystemBus {
    /// OAM DMA: copy 0xA0 bytes from `value << 8` into OAM.
    ///
    /// The transfer completes immediately; the 160 M-cycle bus lock is not
    /// modelled. Sources above 0xDF read through the echo of work RAM, and
    /// VRAM sources ignore the pixel-transfer lock.
    pub(super) fn start_oam_dma(&mut self, value: u8) {
        self.dma_source = value;
        let page = if value > 0xDF { value - 0x20 } else { value };
        let base = (page as u16) << 8;
        for i in 0..0xA0u16 {
            let addr = base + i;
            let byte = match addr {
                0x8000..=0x9FFF => self.ppu.dma_read_vram(addr),
                _ => self.read(addr),
            };
            self.ppu.dma_write(i as usize, byte);
        }
    }

    pub(super) fn dma_source(&self) -> u8 {
        self.dma_source
    }
}
