/// MBC3 register file without the real-time clock.
///
/// RAM select values 0x08..=0x0C address RTC registers; those read back as
/// 0xFF and swallow writes. The latch register at 0x6000 is accepted and
/// ignored.
#[derive(Debug, Default)]
pub(super) struct Mbc3 {
    pub(super) ram_enable: bool,
    rom_bank: u8,
    ram_select: u8,
}

impl Mbc3 {
    pub(super) fn new() -> Self {
        Self {
            rom_bank: 1,
            ..Self::default()
        }
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enable = (value & 0x0F) == 0x0A,
            0x2000..=0x3FFF => {
                self.rom_bank = value & 0x7F;
                if self.rom_bank == 0 {
                    self.rom_bank = 1;
                }
            }
            0x4000..=0x5FFF => self.ram_select = value,
            _ => {}
        }
    }

    pub(super) fn rom_bank(&self, addr: u16) -> usize {
        if addr < 0x4000 {
            0
        } else {
            self.rom_bank as usize
        }
    }

    /// `None` while an RTC register is selected.
    pub(super) fn ram_bank(&self) -> Option<usize> {
        match self.ram_select {
            0x00..=0x03 => Some(self.ram_select as usize),
            _ => None,
        }
    }
}
