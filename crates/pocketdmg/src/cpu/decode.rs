//! Opcode tables.
//!
//! Both tables are built at compile time by decoding the opcode's
//! `xx yyy zzz` bit fields (see "Decoding Gameboy Z80 opcodes"), so the
//! interpreter dispatches by indexing instead of matching raw bytes.

/// 8-bit operand encoded in three opcode bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum R8 {
    B,
    C,
    D,
    E,
    H,
    L,
    /// Memory at HL.
    HlInd,
    A,
}

/// 16-bit register pairs for loads and arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum R16 {
    Bc,
    De,
    Hl,
    Sp,
}

/// Register pairs for PUSH/POP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum R16Stack {
    Bc,
    De,
    Hl,
    Af,
}

/// Indirect addresses for `LD (rr),A` and `LD A,(rr)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum R16Mem {
    Bc,
    De,
    HlInc,
    HlDec,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Cond {
    Always,
    Nz,
    Z,
    Nc,
    C,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ShiftOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

/// One decoded unprefixed instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Op {
    Nop,
    Stop,
    Halt,
    Di,
    Ei,
    /// 0xCB: the next byte indexes [`CB_OPCODES`].
    Prefix,
    Illegal,

    Ld { dst: R8, src: R8 },
    LdImm(R8),
    LdR16Imm(R16),
    LdMemA(R16Mem),
    LdAMem(R16Mem),
    LdAbsSp,
    LdhImmA,
    LdhAImm,
    LdhCA,
    LdhAC,
    LdAbsA,
    LdAAbs,
    LdSpHl,
    LdHlSpImm,

    Alu(AluOp, R8),
    AluImm(AluOp),
    Inc(R8),
    Dec(R8),
    Inc16(R16),
    Dec16(R16),
    AddHl(R16),
    AddSpImm,
    Rlca,
    Rrca,
    Rla,
    Rra,
    Daa,
    Cpl,
    Scf,
    Ccf,

    Jr(Cond),
    Jp(Cond),
    JpHl,
    Call(Cond),
    Ret(Cond),
    Reti,
    Rst(u16),
    Push(R16Stack),
    Pop(R16Stack),
}

/// One decoded CB-prefixed instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CbOp {
    Shift(ShiftOp, R8),
    Bit(u8, R8),
    Res(u8, R8),
    Set(u8, R8),
}

pub(crate) const OPCODES: [Op; 256] = {
    let mut table = [Op::Illegal; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode(i as u8);
        i += 1;
    }
    table
};

pub(crate) const CB_OPCODES: [CbOp; 256] = {
    let mut table = [CbOp::Bit(0, R8::B); 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode_cb(i as u8);
        i += 1;
    }
    table
};

const fn r8(bits: u8) -> R8 {
    match bits & 0x07 {
        0 => R8::B,
        1 => R8::C,
        2 => R8::D,
        3 => R8::E,
        4 => R8::H,
        5 => R8::L,
        6 => R8::HlInd,
        _ => R8::A,
    }
}

const fn r16(bits: u8) -> R16 {
    match bits & 0x03 {
        0 => R16::Bc,
        1 => R16::De,
        2 => R16::Hl,
        _ => R16::Sp,
    }
}

const fn r16_stack(bits: u8) -> R16Stack {
    match bits & 0x03 {
        0 => R16Stack::Bc,
        1 => R16Stack::De,
        2 => R16Stack::Hl,
        _ => R16Stack::Af,
    }
}

const fn r16_mem(bits: u8) -> R16Mem {
    match bits & 0x03 {
        0 => R16Mem::Bc,
        1 => R16Mem::De,
        2 => R16Mem::HlInc,
        _ => R16Mem::HlDec,
    }
}

const fn cond(bits: u8) -> Cond {
    match bits & 0x03 {
        0 => Cond::Nz,
        1 => Cond::Z,
        2 => Cond::Nc,
        _ => Cond::C,
    }
}

const fn alu_op(bits: u8) -> AluOp {
    match bits & 0x07 {
        0 => AluOp::Add,
        1 => AluOp::Adc,
        2 => AluOp::Sub,
        3 => AluOp::Sbc,
        4 => AluOp::And,
        5 => AluOp::Xor,
        6 => AluOp::Or,
        _ => AluOp::Cp,
    }
}

const fn shift_op(bits: u8) -> ShiftOp {
    match bits & 0x07 {
        0 => ShiftOp::Rlc,
        1 => ShiftOp::Rrc,
        2 => ShiftOp::Rl,
        3 => ShiftOp::Rr,
        4 => ShiftOp::Sla,
        5 => ShiftOp::Sra,
        6 => ShiftOp::Swap,
        _ => ShiftOp::Srl,
    }
}

const fn decode(opcode: u8) -> Op {
    let x = opcode >> 6;
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;
    let p = y >> 1;
    let q = y & 0x01;

    match x {
        0 => match z {
            0 => match y {
                0 => Op::Nop,
                1 => Op::LdAbsSp,
                2 => Op::Stop,
                3 => Op::Jr(Cond::Always),
                _ => Op::Jr(cond(y - 4)),
            },
            1 if q == 0 => Op::LdR16Imm(r16(p)),
            1 => Op::AddHl(r16(p)),
            2 if q == 0 => Op::LdMemA(r16_mem(p)),
            2 => Op::LdAMem(r16_mem(p)),
            3 if q == 0 => Op::Inc16(r16(p)),
            3 => Op::Dec16(r16(p)),
            4 => Op::Inc(r8(y)),
            5 => Op::Dec(r8(y)),
            6 => Op::LdImm(r8(y)),
            _ => match y {
                0 => Op::Rlca,
                1 => Op::Rrca,
                2 => Op::Rla,
                3 => Op::Rra,
                4 => Op::Daa,
                5 => Op::Cpl,
                6 => Op::Scf,
                _ => Op::Ccf,
            },
        },
        1 if y == 6 && z == 6 => Op::Halt,
        1 => Op::Ld {
            dst: r8(y),
            src: r8(z),
        },
        2 => Op::Alu(alu_op(y), r8(z)),
        _ => match z {
            0 => match y {
                0..=3 => Op::Ret(cond(y)),
                4 => Op::LdhImmA,
                5 => Op::AddSpImm,
                6 => Op::LdhAImm,
                _ => Op::LdHlSpImm,
            },
            1 if q == 0 => Op::Pop(r16_stack(p)),
            1 => match p {
                0 => Op::Ret(Cond::Always),
                1 => Op::Reti,
                2 => Op::JpHl,
                _ => Op::LdSpHl,
            },
            2 => match y {
                0..=3 => Op::Jp(cond(y)),
                4 => Op::LdhCA,
                5 => Op::LdAbsA,
                6 => Op::LdhAC,
                _ => Op::LdAAbs,
            },
            3 => match y {
                0 => Op::Jp(Cond::Always),
                1 => Op::Prefix,
                6 => Op::Di,
                7 => Op::Ei,
                _ => Op::Illegal,
            },
            4 if y <= 3 => Op::Call(cond(y)),
            4 => Op::Illegal,
            5 if q == 0 => Op::Push(r16_stack(p)),
            5 if p == 0 => Op::Call(Cond::Always),
            5 => Op::Illegal,
            6 => Op::AluImm(alu_op(y)),
            _ => Op::Rst(y as u16 * 8),
        },
    }
}

const fn decode_cb(opcode: u8) -> CbOp {
    let y = (opcode >> 3) & 0x07;
    let target = r8(opcode);
    match opcode >> 6 {
        0 => CbOp::Shift(shift_op(y), target),
        1 => CbOp::Bit(y, target),
        2 => CbOp::Res(y, target),
        _ => CbOp::Set(y, target),
    }
}
