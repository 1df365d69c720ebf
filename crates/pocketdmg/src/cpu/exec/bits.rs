use crate::cpu::decode::{CbOp, R8, CB_OPCODES};
use crate::cpu::{Bus, Cpu, Flag};

impl Cpu {
    /// Fetch the byte after 0xCB and run it through the CB table.
    ///
    /// Register forms take 8 cycles; (HL) forms take 16, except BIT which
    /// only reads and takes 12.
    pub(super) fn exec_cb<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let opcode = self.fetch8(bus);
        match CB_OPCODES[opcode as usize] {
            CbOp::Shift(op, target) => {
                let value = self.read_r8(bus, target);
                let result = self.alu_shift(op, value);
                self.write_r8(bus, target, result);
                cb_cycles(target, 16)
            }
            CbOp::Bit(bit, target) => {
                let value = self.read_r8(bus, target);
                self.set_flag(Flag::Z, value & (1 << bit) == 0);
                self.set_flag(Flag::N, false);
                self.set_flag(Flag::H, true);
                cb_cycles(target, 12)
            }
            CbOp::Res(bit, target) => {
                let value = self.read_r8(bus, target) & !(1 << bit);
                self.write_r8(bus, target, value);
                cb_cycles(target, 16)
            }
            CbOp::Set(bit, target) => {
                let value = self.read_r8(bus, target) | (1 << bit);
                self.write_r8(bus, target, value);
                cb_cycles(target, 16)
            }
        }
    }
}

#[inline]
fn cb_cycles(target: R8, indirect: u32) -> u32 {
    if target == R8::HlInd {
        indirect
    } else {
        8
    }
}
