mod arith;
mod bits;
mod control;
mod load;

use super::decode::Op;
use super::{Bus, Cpu};

impl Cpu {
    /// Execute one decoded instruction and return its cost in T-cycles,
    /// or `None` for an undefined opcode.
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B, op: Op) -> Option<u32> {
        let cycles = match op {
            Op::Nop => 4,
            Op::Stop => self.exec_stop(bus),
            Op::Halt => self.exec_halt(bus),
            Op::Di => {
                self.ime = false;
                self.ime_enable_pending = false;
                self.ime_enable_armed = false;
                4
            }
            Op::Ei => {
                if !self.ime {
                    self.ime_enable_pending = true;
                }
                4
            }
            Op::Prefix => self.exec_cb(bus),
            Op::Illegal => return None,

            Op::Ld { dst, src } => self.exec_ld(bus, dst, src),
            Op::LdImm(dst) => self.exec_ld_imm(bus, dst),
            Op::LdR16Imm(reg) => self.exec_ld_r16_imm(bus, reg),
            Op::LdMemA(reg) => self.exec_ld_mem_a(bus, reg),
            Op::LdAMem(reg) => self.exec_ld_a_mem(bus, reg),
            Op::LdAbsSp => self.exec_ld_abs_sp(bus),
            Op::LdhImmA => self.exec_ldh_imm_a(bus),
            Op::LdhAImm => self.exec_ldh_a_imm(bus),
            Op::LdhCA => {
                bus.write8(0xFF00 | self.regs.c as u16, self.regs.a);
                8
            }
            Op::LdhAC => {
                self.regs.a = bus.read8(0xFF00 | self.regs.c as u16);
                8
            }
            Op::LdAbsA => self.exec_ld_abs_a(bus),
            Op::LdAAbs => self.exec_ld_a_abs(bus),
            Op::LdSpHl => {
                self.regs.sp = self.regs.hl();
                8
            }
            Op::LdHlSpImm => self.exec_ld_hl_sp_imm(bus),
            Op::Push(reg) => self.exec_push(bus, reg),
            Op::Pop(reg) => self.exec_pop(bus, reg),

            Op::Alu(op, src) => self.exec_alu(bus, op, src),
            Op::AluImm(op) => self.exec_alu_imm(bus, op),
            Op::Inc(reg) => self.exec_inc(bus, reg),
            Op::Dec(reg) => self.exec_dec(bus, reg),
            Op::Inc16(reg) => {
                let value = self.read_r16(reg).wrapping_add(1);
                self.write_r16(reg, value);
                8
            }
            Op::Dec16(reg) => {
                let value = self.read_r16(reg).wrapping_sub(1);
                self.write_r16(reg, value);
                8
            }
            Op::AddHl(reg) => {
                let value = self.read_r16(reg);
                self.alu_add16_hl(value);
                8
            }
            Op::AddSpImm => self.exec_add_sp_imm(bus),
            Op::Rlca | Op::Rrca | Op::Rla | Op::Rra => self.exec_rotate_a(op),
            Op::Daa => {
                self.alu_daa();
                4
            }
            Op::Cpl => self.exec_cpl(),
            Op::Scf => self.exec_scf(),
            Op::Ccf => self.exec_ccf(),

            Op::Jr(cond) => self.exec_jr(bus, cond),
            Op::Jp(cond) => self.exec_jp(bus, cond),
            Op::JpHl => {
                self.regs.pc = self.regs.hl();
                4
            }
            Op::Call(cond) => self.exec_call(bus, cond),
            Op::Ret(cond) => self.exec_ret(bus, cond),
            Op::Reti => {
                self.regs.pc = self.pop_u16(bus);
                // RETI enables IME immediately, without the EI delay.
                self.ime = true;
                16
            }
            Op::Rst(vector) => {
                let pc = self.regs.pc;
                self.push_u16(bus, pc);
                self.regs.pc = vector;
                16
            }
        };
        Some(cycles)
    }

    /// HALT with IME clear and an interrupt already pending does not halt;
    /// it triggers the HALT bug instead.
    fn exec_halt<B: Bus>(&mut self, bus: &mut B) -> u32 {
        if !self.ime && bus.pending_interrupt().is_some() {
            self.halt_bug = true;
        } else {
            self.halted = true;
        }
        4
    }

    /// STOP is two bytes long. It also resets DIV.
    fn exec_stop<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.fetch8(bus);
        bus.write8(0xFF04, 0);
        self.stopped = true;
        log::debug!("CPU: STOP at PC={:#06X}", self.regs.pc.wrapping_sub(2));
        4
    }
}
