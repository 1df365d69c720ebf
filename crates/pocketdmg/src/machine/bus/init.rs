use super::SystemBus;
use crate::RamInit;

impl SystemBus {
    /// Power-on state for running a boot ROM: LCD off, registers cleared,
    /// boot ROM overlay active.
    pub(in super::super) fn power_on(&mut self, ram_init: RamInit) {
        self.reset_components(ram_init);
        self.boot_rom_mapped = self.boot_rom.is_some();
    }

    /// I/O state the DMG boot ROM leaves behind at PC=0x0100.
    pub(in super::super) fn apply_dmg_post_boot_state(&mut self, ram_init: RamInit) {
        self.reset_components(ram_init);
        self.boot_rom_mapped = false;

        self.timer.init_dmg();
        self.ppu.init_dmg();
        // IF has the V-blank request from the boot ROM's last frame.
        self.interrupts.write_if(0x01);
        self.interrupts.write_ie(0x00);

        // Serial.
        self.io[0x02] = 0x7E;

        // Sound registers are not emulated, but the values stay visible.
        const SOUND: [(u16, u8); 21] = [
            (0xFF10, 0x80),
            (0xFF11, 0xBF),
            (0xFF12, 0xF3),
            (0xFF13, 0xFF),
            (0xFF14, 0xBF),
            (0xFF16, 0x3F),
            (0xFF17, 0x00),
            (0xFF18, 0xFF),
            (0xFF19, 0xBF),
            (0xFF1A, 0x7F),
            (0xFF1B, 0xFF),
            (0xFF1C, 0x9F),
            (0xFF1D, 0xFF),
            (0xFF1E, 0xBF),
            (0xFF20, 0xFF),
            (0xFF21, 0x00),
            (0xFF22, 0x00),
            (0xFF23, 0xBF),
            (0xFF24, 0x77),
            (0xFF25, 0xF3),
            (0xFF26, 0xF1),
        ];
        for (addr, value) in SOUND {
            self.io[(addr - 0xFF00) as usize] = value;
        }
    }

    fn reset_components(&mut self, ram_init: RamInit) {
        self.timer = super::Timer::new();
        self.ppu = super::Ppu::new();
        self.interrupts = super::InterruptController::new();
        self.joypad = super::Joypad::new();
        self.io = [0; 0x80];
        self.dma_source = 0xFF;
        match ram_init {
            RamInit::Pseudorandom => self.randomize_internal_ram(),
            RamInit::Zeroed => {
                self.wram.fill(0);
                self.hram.fill(0);
            }
        }
    }

    /// Fill WRAM and HRAM from a fixed-seed xorshift32 so runs stay
    /// reproducible while RAM is not all zero.
    fn randomize_internal_ram(&mut self) {
        let mut x: u32 = 0xC0DE_1234;
        let mut next_byte = || {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            x as u8
        };
        self.wram.iter_mut().for_each(|b| *b = next_byte());
        self.hram.iter_mut().for_each(|b| *b = next_byte());
    }
}
