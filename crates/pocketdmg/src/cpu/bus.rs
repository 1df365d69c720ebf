use crate::machine::Interrupt;

/// What the CPU needs from the rest of the machine.
///
/// Only `read8`/`write8` are required. The interrupt hooks default to
/// reading IE (0xFFFF) and IF (0xFF0F) through the bus, which is all a flat
/// test memory needs; the system bus answers them from its interrupt
/// controller directly.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Advance peripherals by the T-cycles the last step consumed.
    fn tick(&mut self, _cycles: u32) {}

    fn pending_interrupt(&mut self) -> Option<Interrupt> {
        let bits = self.read8(0xFFFF) & self.read8(0xFF0F);
        Interrupt::highest(bits)
    }

    fn acknowledge_interrupt(&mut self, interrupt: Interrupt) {
        let flags = self.read8(0xFF0F);
        self.write8(0xFF0F, flags & !interrupt.flag().bits());
    }
}
