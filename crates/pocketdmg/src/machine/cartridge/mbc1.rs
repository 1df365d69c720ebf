/// MBC1 register file.
///
/// Five low ROM bank bits (a written 0 selects 1), a two-bit secondary
/// register, and the banking-mode latch. In mode 0 the secondary register
/// only extends the switchable ROM bank. In mode 1 it also selects the bank
/// mapped at 0x0000-0x3FFF and the RAM bank.
#[derive(Debug, Default)]
pub(super) struct Mbc1 {
    pub(super) ram_enable: bool,
    bank_low: u8,
    bank_high: u8,
    advanced_mode: bool,
}

impl Mbc1 {
    pub(super) fn new() -> Self {
        Self {
            bank_low: 1,
            ..Self::default()
        }
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enable = (value & 0x0F) == 0x0A,
            0x2000..=0x3FFF => {
                self.bank_low = value & 0x1F;
                if self.bank_low == 0 {
                    self.bank_low = 1;
                }
            }
            0x4000..=0x5FFF => self.bank_high = value & 0x03,
            0x6000..=0x7FFF => self.advanced_mode = value & 0x01 != 0,
            _ => {}
        }
    }

    pub(super) fn rom_bank(&self, addr: u16) -> usize {
        let high = (self.bank_high as usize) << 5;
        if addr < 0x4000 {
            if self.advanced_mode {
                high
            } else {
                0
            }
        } else {
            high | self.bank_low as usize
        }
    }

    pub(super) fn ram_bank(&self) -> usize {
        if self.advanced_mode {
            self.bank_high as usize
        } else {
            0
        }
    }
}
