mod alu;
mod bus;
mod decode;
mod exec;
mod helpers;
mod interrupts;
mod regs;

pub use bus::Bus;
pub use regs::{Flag, Registers};

use crate::{Error, Result};
use decode::OPCODES;

/// Sharp LR35902 interpreter.
///
/// One call to [`Cpu::step`] services an interrupt, idles in HALT/STOP, or
/// executes one whole instruction, then advances the bus by the T-cycles
/// that took.
#[derive(Clone, Debug, Default)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    pub halted: bool,
    /// STOP low-power state; left when a joypad line goes low.
    stopped: bool,
    /// HALT executed with IME clear and an interrupt already pending: the
    /// next opcode fetch does not advance PC.
    halt_bug: bool,
    /// EI was just executed; IME turns on after the next instruction.
    ime_enable_pending: bool,
    ime_enable_armed: bool,
    /// Latched by an illegal opcode; the CPU is dead until reset.
    fault: Option<Error>,
}

impl Cpu {
    /// Power-on state with PC at 0x0000, as seen by a boot ROM.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers as the DMG boot ROM leaves them at PC=0x0100.
    pub fn post_boot() -> Self {
        let mut cpu = Self::new();
        cpu.apply_dmg_boot_state();
        cpu
    }

    fn apply_dmg_boot_state(&mut self) {
        self.regs.set_af(0x01B0);
        self.regs.set_bc(0x0013);
        self.regs.set_de(0x00D8);
        self.regs.set_hl(0x014D);
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// The latched illegal-opcode error, if any.
    pub fn fault(&self) -> Option<&Error> {
        self.fault.as_ref()
    }

    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.regs.f & (1 << flag as u8) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let mask = 1 << flag as u8;
        if value {
            self.regs.f |= mask;
        } else {
            self.regs.f &= !mask;
        }
    }

    #[inline]
    pub fn clear_flags(&mut self) {
        self.regs.f = 0;
    }

    /// Run one step and advance the bus by its cost in T-cycles.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }

        if self.stopped {
            // The system clock is halted in STOP, so the bus does not tick.
            if bus.read8(0xFF00) & 0x0F != 0x0F {
                log::debug!("CPU: leaving STOP at PC={:#06X}", self.regs.pc);
                self.stopped = false;
            }
            return Ok(4);
        }

        let cycles = match self.service_interrupt(bus) {
            Some(cycles) => cycles,
            None if self.halted => 4,
            None => self.step_instruction(bus)?,
        };
        bus.tick(cycles);
        Ok(cycles)
    }

    fn step_instruction<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        let pc = self.regs.pc;
        let opcode = self.fetch8(bus);
        let cycles = match self.execute(bus, OPCODES[opcode as usize]) {
            Some(cycles) => cycles,
            None => {
                log::error!(
                    "CPU: illegal opcode {:#04X} at {:#06X} (AF={:#06X} BC={:#06X} DE={:#06X} HL={:#06X} SP={:#06X})",
                    opcode,
                    pc,
                    self.regs.af(),
                    self.regs.bc(),
                    self.regs.de(),
                    self.regs.hl(),
                    self.regs.sp,
                );
                let err = Error::IllegalOpcode { opcode, pc };
                self.fault = Some(err.clone());
                return Err(err);
            }
        };
        self.apply_ime_delay();
        Ok(cycles)
    }
}

#[cfg(test)]
mod tests;
