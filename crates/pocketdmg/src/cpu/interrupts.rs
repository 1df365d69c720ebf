use super::{Bus, Cpu};

/// T-cycles to push PC and jump to the handler.
const DISPATCH_CYCLES: u32 = 20;

impl Cpu {
    /// Check for a pending interrupt before the next fetch.
    ///
    /// A pending interrupt always ends HALT. With IME set the CPU clears
    /// IME and the IF bit, pushes PC, and jumps to the vector. Returns the
    /// cycles spent dispatching, or `None` if execution continues normally.
    pub(super) fn service_interrupt<B: Bus>(&mut self, bus: &mut B) -> Option<u32> {
        let interrupt = bus.pending_interrupt()?;
        self.halted = false;
        if !self.ime {
            return None;
        }

        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_armed = false;
        bus.acknowledge_interrupt(interrupt);
        // EI; HALT with an interrupt already pending: the handler returns
        // to the HALT instead of repeating the byte after it.
        let mut pc = self.regs.pc;
        if std::mem::take(&mut self.halt_bug) {
            pc = pc.wrapping_sub(1);
        }
        self.push_u16(bus, pc);
        self.regs.pc = interrupt.vector();
        log::trace!(
            "CPU: dispatch {:?} from PC={:#06X} to {:#06X}",
            interrupt,
            pc,
            self.regs.pc
        );
        Some(DISPATCH_CYCLES)
    }

    /// EI takes effect after the instruction that follows it.
    #[inline]
    pub(super) fn apply_ime_delay(&mut self) {
        if self.ime_enable_armed {
            self.ime = true;
            self.ime_enable_armed = false;
        } else if self.ime_enable_pending {
            self.ime_enable_pending = false;
            self.ime_enable_armed = true;
        }
    }
}
