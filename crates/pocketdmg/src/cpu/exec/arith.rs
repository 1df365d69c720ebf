use crate::cpu::decode::{AluOp, Op, ShiftOp, R8};
use crate::cpu::{Bus, Cpu, Flag};

impl Cpu {
    pub(super) fn exec_alu<B: Bus>(&mut self, bus: &mut B, op: AluOp, src: R8) -> u32 {
        let value = self.read_r8(bus, src);
        self.alu(op, value);
        if src == R8::HlInd {
            8
        } else {
            4
        }
    }

    pub(super) fn exec_alu_imm<B: Bus>(&mut self, bus: &mut B, op: AluOp) -> u32 {
        let value = self.fetch8(bus);
        self.alu(op, value);
        8
    }

    pub(super) fn exec_inc<B: Bus>(&mut self, bus: &mut B, reg: R8) -> u32 {
        let value = self.read_r8(bus, reg);
        let result = self.alu_inc8(value);
        self.write_r8(bus, reg, result);
        if reg == R8::HlInd {
            12
        } else {
            4
        }
    }

    pub(super) fn exec_dec<B: Bus>(&mut self, bus: &mut B, reg: R8) -> u32 {
        let value = self.read_r8(bus, reg);
        let result = self.alu_dec8(value);
        self.write_r8(bus, reg, result);
        if reg == R8::HlInd {
            12
        } else {
            4
        }
    }

    pub(super) fn exec_add_sp_imm<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let imm = self.fetch8(bus);
        self.regs.sp = self.alu_add16_signed(self.regs.sp, imm);
        16
    }

    /// RLCA/RRCA/RLA/RRA: the CB rotates on A, but Z is always cleared.
    pub(super) fn exec_rotate_a(&mut self, op: Op) -> u32 {
        let shift = match op {
            Op::Rlca => ShiftOp::Rlc,
            Op::Rrca => ShiftOp::Rrc,
            Op::Rla => ShiftOp::Rl,
            _ => ShiftOp::Rr,
        };
        self.regs.a = self.alu_shift(shift, self.regs.a);
        self.set_flag(Flag::Z, false);
        4
    }

    pub(super) fn exec_cpl(&mut self) -> u32 {
        self.regs.a = !self.regs.a;
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, true);
        4
    }

    pub(super) fn exec_scf(&mut self) -> u32 {
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, true);
        4
    }

    pub(super) fn exec_ccf(&mut self) -> u32 {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, !carry);
        4
    }
}
