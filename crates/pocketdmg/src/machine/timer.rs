/// Timer / divider unit.
///
/// The hidden 16-bit system counter advances once per T-cycle and DIV
/// exposes its upper byte. TIMA counts falling edges of
/// `enabled AND counter[bit]`, where TAC picks the monitored bit. Because
/// the edge detector watches that AND term, resetting the counter through
/// DIV or rewriting TAC can produce an extra TIMA increment, matching the
/// "Timer obscure behaviour" section of Pandocs.
mod io;

use super::interrupts::{Interrupt, InterruptController};

/// T-cycles between TIMA overflowing and the TMA reload + interrupt.
const RELOAD_DELAY: u8 = 4;

pub(crate) struct Timer {
    /// Hidden system counter; DIV is bits 15..8.
    pub(super) counter: u16,
    /// TIMA (FF05).
    pub(super) tima: u8,
    /// TMA (FF06).
    pub(super) tma: u8,
    /// TAC raw value (lower 3 bits meaningful).
    pub(super) tac: u8,
    /// Non-zero while TIMA reads 0x00 after an overflow; counts down to
    /// the reload.
    pub(super) reload_delay: u8,
    /// Non-zero for the M-cycle right after a reload, when TMA writes
    /// propagate to TIMA and TIMA writes are ignored.
    pub(super) reload_window: u8,
}

impl Timer {
    pub(crate) fn new() -> Self {
        Self {
            counter: 0,
            tima: 0,
            tma: 0,
            tac: 0,
            reload_delay: 0,
            reload_window: 0,
        }
    }

    /// DMG state at PC=0x0100: DIV reads back as 0xAB.
    pub(crate) fn init_dmg(&mut self) {
        *self = Self::new();
        self.counter = 0xABCC;
    }

    #[inline]
    fn enabled(&self) -> bool {
        self.tac & 0x04 != 0
    }

    /// Counter bit watched for the current TAC clock select:
    /// 00 → bit 9 (4096 Hz), 01 → bit 3, 10 → bit 5, 11 → bit 7.
    #[inline]
    fn counter_mask(&self) -> u16 {
        match self.tac & 0x03 {
            0x00 => 1 << 9,
            0x01 => 1 << 3,
            0x02 => 1 << 5,
            _ => 1 << 7,
        }
    }

    /// Input of the falling-edge detector.
    #[inline]
    pub(super) fn input(&self) -> bool {
        self.enabled() && self.counter & self.counter_mask() != 0
    }

    pub(super) fn increment_tima(&mut self) {
        let (next, overflow) = self.tima.overflowing_add(1);
        self.tima = next;
        if overflow {
            // TIMA stays 0x00 until the delayed reload.
            self.reload_delay = RELOAD_DELAY;
        }
    }

    /// Advance by one T-cycle.
    pub(crate) fn tick_tcycle(&mut self, interrupts: &mut InterruptController) {
        if self.reload_window > 0 {
            self.reload_window -= 1;
        }
        if self.reload_delay > 0 {
            self.reload_delay -= 1;
            if self.reload_delay == 0 {
                self.tima = self.tma;
                self.reload_window = RELOAD_DELAY;
                interrupts.raise(Interrupt::Timer);
            }
        }

        let before = self.input();
        self.counter = self.counter.wrapping_add(1);
        if before && !self.input() {
            self.increment_tima();
        }
    }

    pub(crate) fn tick(&mut self, cycles: u32, interrupts: &mut InterruptController) {
        for _ in 0..cycles {
            self.tick_tcycle(interrupts);
        }
    }
}
