use crate::cpu::decode::{R16, R16Mem, R16Stack, R8};
use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_ld<B: Bus>(&mut self, bus: &mut B, dst: R8, src: R8) -> u32 {
        let value = self.read_r8(bus, src);
        self.write_r8(bus, dst, value);
        if dst == R8::HlInd || src == R8::HlInd {
            8
        } else {
            4
        }
    }

    pub(super) fn exec_ld_imm<B: Bus>(&mut self, bus: &mut B, dst: R8) -> u32 {
        let value = self.fetch8(bus);
        self.write_r8(bus, dst, value);
        if dst == R8::HlInd {
            12
        } else {
            8
        }
    }

    pub(super) fn exec_ld_r16_imm<B: Bus>(&mut self, bus: &mut B, reg: R16) -> u32 {
        let value = self.fetch16(bus);
        self.write_r16(reg, value);
        12
    }

    pub(super) fn exec_ld_mem_a<B: Bus>(&mut self, bus: &mut B, reg: R16Mem) -> u32 {
        let addr = self.r16_mem_addr(reg);
        bus.write8(addr, self.regs.a);
        8
    }

    pub(super) fn exec_ld_a_mem<B: Bus>(&mut self, bus: &mut B, reg: R16Mem) -> u32 {
        let addr = self.r16_mem_addr(reg);
        self.regs.a = bus.read8(addr);
        8
    }

    /// LD (a16),SP
    pub(super) fn exec_ld_abs_sp<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        let [lo, hi] = self.regs.sp.to_le_bytes();
        bus.write8(addr, lo);
        bus.write8(addr.wrapping_add(1), hi);
        20
    }

    pub(super) fn exec_ldh_imm_a<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let offset = self.fetch8(bus);
        bus.write8(0xFF00 | offset as u16, self.regs.a);
        12
    }

    pub(super) fn exec_ldh_a_imm<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let offset = self.fetch8(bus);
        self.regs.a = bus.read8(0xFF00 | offset as u16);
        12
    }

    pub(super) fn exec_ld_abs_a<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        bus.write8(addr, self.regs.a);
        16
    }

    pub(super) fn exec_ld_a_abs<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        self.regs.a = bus.read8(addr);
        16
    }

    pub(super) fn exec_ld_hl_sp_imm<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let imm = self.fetch8(bus);
        let value = self.alu_add16_signed(self.regs.sp, imm);
        self.regs.set_hl(value);
        12
    }

    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B, reg: R16Stack) -> u32 {
        let value = self.read_r16_stack(reg);
        self.push_u16(bus, value);
        16
    }

    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, reg: R16Stack) -> u32 {
        let value = self.pop_u16(bus);
        self.write_r16_stack(reg, value);
        12
    }
}
