use super::Timer;

impl Timer {
    pub(crate) fn read(&self, addr: u16) -> u8 {
        match addr {
            0xFF04 => (self.counter >> 8) as u8,
            0xFF05 => self.tima,
            0xFF06 => self.tma,
            0xFF07 => self.tac | 0xF8,
            _ => 0xFF,
        }
    }

    pub(crate) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF04 => self.div_write(),
            0xFF05 => self.tima_write(value),
            0xFF06 => self.tma_write(value),
            0xFF07 => self.tac_write(value),
            _ => {}
        }
    }

    /// Writing any value resets the counter. If the monitored bit was high
    /// the reset is a falling edge and TIMA increments once.
    fn div_write(&mut self) {
        if self.input() {
            self.increment_tima();
        }
        self.counter = 0;
    }

    /// A write while the reload is pending cancels both the reload and the
    /// interrupt. A write during the reload cycle itself is lost.
    fn tima_write(&mut self, value: u8) {
        if self.reload_window > 0 {
            return;
        }
        self.reload_delay = 0;
        self.tima = value;
    }

    fn tma_write(&mut self, value: u8) {
        self.tma = value;
        if self.reload_window > 0 {
            self.tima = value;
        }
    }

    /// Disabling the timer or switching to a lower bit while the input is
    /// high is a falling edge as well.
    fn tac_write(&mut self, value: u8) {
        let before = self.input();
        self.tac = value & 0x07;
        if before && !self.input() {
            self.increment_tima();
        }
    }
}
