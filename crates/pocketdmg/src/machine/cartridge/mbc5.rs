/// MBC5 register file: 9-bit ROM bank (bank 0 is selectable in the upper
/// window) and 4-bit RAM bank. On rumble carts bit 3 of the RAM bank drives
/// the motor, so it is masked off.
#[derive(Debug, Default)]
pub(super) struct Mbc5 {
    pub(super) ram_enable: bool,
    rom_bank: u16,
    ram_bank: u8,
    rumble: bool,
}

impl Mbc5 {
    pub(super) fn new(cartridge_type: u8) -> Self {
        Self {
            rom_bank: 1,
            rumble: matches!(cartridge_type, 0x1C..=0x1E),
            ..Self::default()
        }
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enable = (value & 0x0F) == 0x0A,
            0x2000..=0x2FFF => self.rom_bank = (self.rom_bank & 0x100) | value as u16,
            0x3000..=0x3FFF => {
                self.rom_bank = (self.rom_bank & 0x0FF) | (((value & 0x01) as u16) << 8)
            }
            0x4000..=0x5FFF => {
                let mask = if self.rumble { 0x07 } else { 0x0F };
                self.ram_bank = value & mask;
            }
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

    pub(super) fn ram_bank(&self) -> usize {
        self.ram_bank as usize
    }
}
