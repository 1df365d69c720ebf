use bitflags::bitflags;

bitflags! {
    /// Bit layout shared by IE (0xFFFF) and IF (0xFF0F).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct InterruptFlags: u8 {
        const VBLANK = 0x01;
        const STAT = 0x02;
        const TIMER = 0x04;
        const SERIAL = 0x08;
        const JOYPAD = 0x10;
    }
}

/// Interrupt sources in descending priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interrupt {
    VBlank,
    Stat,
    Timer,
    Serial,
    Joypad,
}

impl Interrupt {
    /// All sources, highest priority first.
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::Stat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    #[inline]
    pub fn flag(self) -> InterruptFlags {
        match self {
            Interrupt::VBlank => InterruptFlags::VBLANK,
            Interrupt::Stat => InterruptFlags::STAT,
            Interrupt::Timer => InterruptFlags::TIMER,
            Interrupt::Serial => InterruptFlags::SERIAL,
            Interrupt::Joypad => InterruptFlags::JOYPAD,
        }
    }

    /// Handler address: 0x40, 0x48, 0x50, 0x58, 0x60.
    #[inline]
    pub fn vector(self) -> u16 {
        0x0040 + (self as u16) * 8
    }

    /// Highest-priority source whose bit is set in `bits`.
    pub fn highest(bits: u8) -> Option<Interrupt> {
        let pending = bits & InterruptFlags::all().bits();
        if pending == 0 {
            return None;
        }
        Self::ALL.get(pending.trailing_zeros() as usize).copied()
    }
}

/// IE/IF state.
///
/// Sources call [`raise`](Self::raise); the CPU polls
/// [`pending`](Self::pending) before each fetch and clears the flag it
/// services with [`acknowledge`](Self::acknowledge).
#[derive(Clone, Debug, Default)]
pub struct InterruptController {
    /// IE keeps all 8 bits; only the low five take part in dispatch.
    enable: u8,
    flags: InterruptFlags,
}

impl InterruptController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn raise(&mut self, interrupt: Interrupt) {
        self.flags.insert(interrupt.flag());
    }

    /// The highest-priority interrupt that is both flagged and enabled.
    #[inline]
    pub fn pending(&self) -> Option<Interrupt> {
        Interrupt::highest(self.enable & self.flags.bits())
    }

    #[inline]
    pub fn acknowledge(&mut self, interrupt: Interrupt) {
        self.flags.remove(interrupt.flag());
    }

    pub fn flags(&self) -> InterruptFlags {
        self.flags
    }

    /// IF as seen by the CPU: bits 7-5 read as 1.
    pub fn read_if(&self) -> u8 {
        self.flags.bits() | 0xE0
    }

    pub fn write_if(&mut self, value: u8) {
        self.flags = InterruptFlags::from_bits_truncate(value);
    }

    pub fn read_ie(&self) -> u8 {
        self.enable
    }

    pub fn write_ie(&mut self, value: u8) {
        self.enable = value;
    }
}
