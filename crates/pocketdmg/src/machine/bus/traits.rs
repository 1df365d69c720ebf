use crate::cpu::Bus;
use crate::machine::Interrupt;

use super::SystemBus;

impl Bus for SystemBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.read(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.write(addr, value)
    }

    fn tick(&mut self, cycles: u32) {
        self.advance(cycles);
    }

    fn pending_interrupt(&mut self) -> Option<Interrupt> {
        self.interrupts.pending()
    }

    fn acknowledge_interrupt(&mut self, interrupt: Interrupt) {
        self.interrupts.acknowledge(interrupt);
    }
}
