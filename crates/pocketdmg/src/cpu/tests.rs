use super::decode::{Op, OPCODES};
use super::*;

#[derive(Clone)]
struct TestBus {
    memory: [u8; 0x10000],
    ticked: u32,
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
            ticked: 0,
        }
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }

    fn tick(&mut self, cycles: u32) {
        self.ticked += cycles;
    }
}

/// CPU at PC=0 with `program` loaded there.
fn setup(program: &[u8]) -> (Cpu, TestBus) {
    let mut bus = TestBus::default();
    bus.memory[..program.len()].copy_from_slice(program);
    (Cpu::new(), bus)
}

fn flags(cpu: &Cpu) -> (bool, bool, bool, bool) {
    (
        cpu.get_flag(Flag::Z),
        cpu.get_flag(Flag::N),
        cpu.get_flag(Flag::H),
        cpu.get_flag(Flag::C),
    )
}

#[test]
fn add_immediate_sets_zero_half_and_carry() {
    let (mut cpu, mut bus) = setup(&[0xC6, 0xC6]);
    cpu.regs.a = 0x3A;
    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.a, 0x00);
    assert_eq!(flags(&cpu), (true, false, true, true));
    assert_eq!(bus.ticked, 8);
}

#[test]
fn adc_and_sbc_use_incoming_carry() {
    // SCF; ADC A,B; SCF; SBC A,B
    let (mut cpu, mut bus) = setup(&[0x37, 0x88, 0x37, 0x98]);
    cpu.regs.a = 0x0E;
    cpu.regs.b = 0x01;
    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x10);
    assert_eq!(flags(&cpu), (false, false, true, false));

    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x0E);
    assert_eq!(flags(&cpu), (false, true, true, false));
}

#[test]
fn cp_leaves_accumulator_untouched() {
    let (mut cpu, mut bus) = setup(&[0xFE, 0x40]);
    cpu.regs.a = 0x3C;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x3C);
    assert_eq!(flags(&cpu), (false, true, false, true));
}

#[test]
fn daa_corrects_bcd_addition() {
    // ADD A,0x38; DAA
    let (mut cpu, mut bus) = setup(&[0xC6, 0x38, 0x27]);
    cpu.regs.a = 0x45;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x7D);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x83);
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn inc_and_dec_preserve_carry() {
    // SCF; INC B; DEC C
    let (mut cpu, mut bus) = setup(&[0x37, 0x04, 0x0D]);
    cpu.regs.b = 0x0F;
    cpu.regs.c = 0x01;
    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b, 0x10);
    assert_eq!(flags(&cpu), (false, false, true, true));
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.c, 0x00);
    assert_eq!(flags(&cpu), (true, true, false, true));
}

#[test]
fn add_sp_signed_immediate_uses_low_byte_carries() {
    // ADD SP,-1
    let (mut cpu, mut bus) = setup(&[0xE8, 0xFF]);
    cpu.regs.sp = 0x0001;
    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(cpu.regs.sp, 0x0000);
    assert_eq!(flags(&cpu), (false, false, true, true));
}

#[test]
fn conditional_jump_costs_more_when_taken() {
    // JR NZ,+2 at 0x0000 and again at 0x0004.
    let (mut cpu, mut bus) = setup(&[0x20, 0x02, 0x00, 0x00, 0x20, 0x02]);
    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(cpu.regs.pc, 0x0004);

    cpu.set_flag(Flag::Z, true);
    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.pc, 0x0006);
}

#[test]
fn call_and_ret_cycle_costs() {
    let (mut cpu, mut bus) = setup(&[0xCD, 0x10, 0x00]);
    bus.memory[0x10] = 0xC9; // RET
    bus.memory[0x11] = 0xC8; // RET Z
    cpu.regs.sp = 0xD000;

    assert_eq!(cpu.step(&mut bus).unwrap(), 24);
    assert_eq!(cpu.regs.pc, 0x0010);
    assert_eq!(cpu.regs.sp, 0xCFFE);
    assert_eq!(bus.memory[0xCFFE], 0x03);

    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(cpu.regs.pc, 0x0003);
    assert_eq!(cpu.regs.sp, 0xD000);

    // CALL NZ not taken.
    cpu.regs.pc = 0x0000;
    bus.memory[0] = 0xC4;
    cpu.set_flag(Flag::Z, true);
    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert_eq!(cpu.regs.pc, 0x0003);

    // RET Z taken vs not taken.
    cpu.regs.pc = 0x0011;
    cpu.regs.sp = 0xCFFE;
    assert_eq!(cpu.step(&mut bus).unwrap(), 20);
    cpu.regs.pc = 0x0011;
    cpu.set_flag(Flag::Z, false);
    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
}

#[test]
fn pop_af_clears_low_flag_nibble() {
    // PUSH BC; POP AF
    let (mut cpu, mut bus) = setup(&[0xC5, 0xF1]);
    cpu.regs.sp = 0xD000;
    cpu.regs.set_bc(0x12FF);
    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x12);
    assert_eq!(cpu.regs.f, 0xF0);
}

#[test]
fn stack_pointer_wraps_around_address_space() {
    let (mut cpu, mut bus) = setup(&[0xC5]);
    cpu.regs.sp = 0x0001;
    cpu.regs.set_bc(0xBEEF);
    bus.memory[0x0001] = 0x00;
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.sp, 0xFFFF);
    assert_eq!(bus.memory[0xFFFF], 0xEF);
    assert_eq!(bus.memory[0x0000], 0xBE);
}

#[test]
fn ld_hl_increment_and_decrement() {
    // LD (HL+),A; LD A,(HL-)
    let (mut cpu, mut bus) = setup(&[0x22, 0x3A]);
    cpu.regs.set_hl(0xC000);
    cpu.regs.a = 0x77;
    bus.memory[0xC001] = 0x55;
    cpu.step(&mut bus).unwrap();
    assert_eq!(bus.memory[0xC000], 0x77);
    assert_eq!(cpu.regs.hl(), 0xC001);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x55);
    assert_eq!(cpu.regs.hl(), 0xC000);
}

#[test]
fn cb_swap_and_bit_on_memory() {
    // SWAP A; BIT 7,(HL); SET 0,(HL)
    let (mut cpu, mut bus) = setup(&[0xCB, 0x37, 0xCB, 0x7E, 0xCB, 0xC6]);
    cpu.regs.a = 0xF1;
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC000] = 0x80;

    assert_eq!(cpu.step(&mut bus).unwrap(), 8);
    assert_eq!(cpu.regs.a, 0x1F);

    assert_eq!(cpu.step(&mut bus).unwrap(), 12);
    assert!(!cpu.get_flag(Flag::Z));
    assert!(cpu.get_flag(Flag::H));

    assert_eq!(cpu.step(&mut bus).unwrap(), 16);
    assert_eq!(bus.memory[0xC000], 0x81);
}

#[test]
fn rotate_accumulator_always_clears_zero() {
    // RLCA with A=0 keeps Z clear; RLA shifts the carry in.
    let (mut cpu, mut bus) = setup(&[0x07, 0x37, 0x17]);
    cpu.regs.a = 0x00;
    cpu.step(&mut bus).unwrap();
    assert!(!cpu.get_flag(Flag::Z));
    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x01);
    assert!(!cpu.get_flag(Flag::C));
}

#[test]
fn exactly_eleven_opcodes_are_undefined() {
    let undefined: Vec<u8> = (0..=255u8)
        .filter(|&op| OPCODES[op as usize] == Op::Illegal)
        .collect();
    assert_eq!(
        undefined,
        vec![0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD]
    );
}

#[test]
fn illegal_opcode_is_fatal_and_latched() {
    let (mut cpu, mut bus) = setup(&[0x00, 0xDD]);
    cpu.step(&mut bus).unwrap();
    let expected = Error::IllegalOpcode {
        opcode: 0xDD,
        pc: 0x0001,
    };
    assert_eq!(cpu.step(&mut bus), Err(expected.clone()));
    assert_eq!(cpu.step(&mut bus), Err(expected.clone()));
    assert_eq!(cpu.fault(), Some(&expected));
    assert_eq!(bus.ticked, 4);
}

#[test]
fn vblank_is_dispatched_before_timer() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    cpu.regs.pc = 0x1234;
    cpu.regs.sp = 0xD000;
    cpu.ime = true;
    bus.memory[0xFFFF] = 0x1F;
    bus.memory[0xFF0F] = 0x05;

    assert_eq!(cpu.step(&mut bus).unwrap(), 20);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert!(!cpu.ime);
    assert_eq!(bus.memory[0xFF0F], 0x04);
    assert_eq!(bus.memory[0xCFFE], 0x34);
    assert_eq!(bus.memory[0xCFFF], 0x12);
}

#[test]
fn ei_takes_effect_after_following_instruction() {
    // EI; NOP; NOP
    let (mut cpu, mut bus) = setup(&[0xFB, 0x00, 0x00]);
    cpu.regs.sp = 0xD000;
    bus.memory[0xFFFF] = 0x04;
    bus.memory[0xFF0F] = 0x04;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0001);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0002);
    assert!(cpu.ime);
    assert_eq!(cpu.step(&mut bus).unwrap(), 20);
    assert_eq!(cpu.regs.pc, 0x0050);
}

#[test]
fn di_cancels_pending_ei() {
    // EI; DI; NOP
    let (mut cpu, mut bus) = setup(&[0xFB, 0xF3, 0x00, 0x00]);
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;
    for _ in 0..3 {
        cpu.step(&mut bus).unwrap();
    }
    assert!(!cpu.ime);
    assert_eq!(cpu.regs.pc, 0x0003);
}

#[test]
fn halt_idles_until_interrupt_even_with_ime_clear() {
    // HALT; INC A
    let (mut cpu, mut bus) = setup(&[0x76, 0x3C]);
    cpu.step(&mut bus).unwrap();
    assert!(cpu.halted);
    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert_eq!(cpu.regs.pc, 0x0001);

    bus.memory[0xFFFF] = 0x04;
    bus.memory[0xFF0F] = 0x04;
    cpu.step(&mut bus).unwrap();
    assert!(!cpu.halted);
    assert_eq!(cpu.regs.a, 0x01);
    // Without IME the flag stays set for the program to poll.
    assert_eq!(bus.memory[0xFF0F], 0x04);
}

#[test]
fn halt_bug_executes_next_byte_twice() {
    // HALT; INC A with an interrupt already pending and IME clear.
    let (mut cpu, mut bus) = setup(&[0x76, 0x3C, 0x00]);
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;
    cpu.step(&mut bus).unwrap();
    assert!(!cpu.halted);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0001);
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x02);
    assert_eq!(cpu.regs.pc, 0x0002);
}

/// Non-trivial registers and memory with no interrupt pending, `program`
/// at 0x0100.
fn seeded_state(program: &[u8]) -> (Cpu, TestBus) {
    let mut bus = TestBus::default();
    for (i, byte) in bus.memory.iter_mut().enumerate() {
        *byte = (i as u32).wrapping_mul(0x9E37_79B1).rotate_right(13) as u8;
    }
    bus.memory[0xFF0F] = 0x00;
    bus.memory[0xFFFF] = 0x00;
    bus.memory[0x0100..0x0100 + program.len()].copy_from_slice(program);

    let mut cpu = Cpu::new();
    cpu.regs.set_af(0x9C50);
    cpu.regs.set_bc(0x1234);
    cpu.regs.set_de(0x5678);
    cpu.regs.set_hl(0xC123);
    cpu.regs.sp = 0xD000;
    cpu.regs.pc = 0x0100;
    (cpu, bus)
}

fn assert_same_outcome(program: &[u8]) {
    let (mut cpu, mut bus) = seeded_state(program);
    let (mut cpu2, mut bus2) = (cpu.clone(), bus.clone());

    let first = cpu.step(&mut bus);
    let second = cpu2.step(&mut bus2);
    assert!(first.is_ok(), "{program:02X?}");
    assert_eq!(first, second, "{program:02X?}");
    assert_eq!(cpu.regs, cpu2.regs, "{program:02X?}");
    assert_eq!(
        (cpu.ime, cpu.halted, cpu.is_stopped()),
        (cpu2.ime, cpu2.halted, cpu2.is_stopped()),
        "{program:02X?}"
    );
    assert_eq!(bus.ticked, bus2.ticked, "{program:02X?}");
    assert!(bus.memory[..] == bus2.memory[..], "{program:02X?}");
}

#[test]
fn every_instruction_is_deterministic() {
    for opcode in 0..=255u8 {
        if OPCODES[opcode as usize] == Op::Illegal {
            continue;
        }
        assert_same_outcome(&[opcode, 0x34, 0x12]);
    }
    for opcode in 0..=255u8 {
        assert_same_outcome(&[0xCB, opcode]);
    }
}

#[test]
fn ei_halt_with_pending_interrupt_returns_to_halt() {
    // EI; HALT; NOP with the handler INC A; RETI at 0x40.
    let (mut cpu, mut bus) = setup(&[0xFB, 0x76, 0x00]);
    bus.memory[0x40] = 0x3C;
    bus.memory[0x41] = 0xD9;
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;
    cpu.regs.sp = 0xD000;

    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.step(&mut bus).unwrap(), 20);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert_eq!(bus.memory[0xCFFE], 0x01);

    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0x01);
    assert_eq!(cpu.regs.pc, 0x0001);
    assert_eq!(cpu.regs.sp, 0xD000);

    // Nothing pending any more, so the HALT really halts this time.
    cpu.step(&mut bus).unwrap();
    assert!(cpu.halted);
}

#[test]
fn stop_idles_without_ticking_until_a_button_line_drops() {
    let (mut cpu, mut bus) = setup(&[0x10, 0x00, 0x00]);
    bus.memory[0xFF00] = 0xFF;
    bus.memory[0xFF04] = 0x55;

    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert!(cpu.is_stopped());
    assert_eq!(cpu.regs.pc, 0x0002);
    assert_eq!(bus.memory[0xFF04], 0x00);
    assert_eq!(bus.ticked, 4);

    assert_eq!(cpu.step(&mut bus).unwrap(), 4);
    assert!(cpu.is_stopped());
    assert_eq!(bus.ticked, 4);

    bus.memory[0xFF00] = 0xEE;
    cpu.step(&mut bus).unwrap();
    assert!(!cpu.is_stopped());
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0003);
}

#[test]
fn post_boot_registers_match_dmg() {
    let cpu = Cpu::post_boot();
    assert_eq!(cpu.regs.af(), 0x01B0);
    assert_eq!(cpu.regs.bc(), 0x0013);
    assert_eq!(cpu.regs.de(), 0x00D8);
    assert_eq!(cpu.regs.hl(), 0x014D);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.regs.pc, 0x0100);
}
