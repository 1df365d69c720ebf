use crate::cpu::decode::Cond;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// JR e8: 12 cycles taken, 8 not taken.
    pub(super) fn exec_jr<B: Bus>(&mut self, bus: &mut B, cond: Cond) -> u32 {
        let offset = self.fetch8(bus) as i8;
        if self.condition(cond) {
            self.regs.pc = self.regs.pc.wrapping_add(offset as u16);
            12
        } else {
            8
        }
    }

    /// JP a16: 16 cycles taken, 12 not taken.
    pub(super) fn exec_jp<B: Bus>(&mut self, bus: &mut B, cond: Cond) -> u32 {
        let target = self.fetch16(bus);
        if self.condition(cond) {
            self.regs.pc = target;
            16
        } else {
            12
        }
    }

    /// CALL a16: 24 cycles taken, 12 not taken.
    pub(super) fn exec_call<B: Bus>(&mut self, bus: &mut B, cond: Cond) -> u32 {
        let target = self.fetch16(bus);
        if self.condition(cond) {
            let pc = self.regs.pc;
            self.push_u16(bus, pc);
            self.regs.pc = target;
            24
        } else {
            12
        }
    }

    /// RET is 16 cycles; RET cc is 20 taken and 8 not taken.
    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B, cond: Cond) -> u32 {
        if cond == Cond::Always {
            self.regs.pc = self.pop_u16(bus);
            return 16;
        }
        if self.condition(cond) {
            self.regs.pc = self.pop_u16(bus);
            20
        } else {
            8
        }
    }
}
