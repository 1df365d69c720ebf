use super::interrupts::{Interrupt, InterruptController};

/// Physical buttons, in P1 bit order within their group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Right,
    Left,
    Up,
    Down,
    A,
    B,
    Select,
    Start,
}

impl Button {
    /// `(is_action_button, bit)` within the P1 low nibble.
    fn line(self) -> (bool, u8) {
        match self {
            Button::Right => (false, 0),
            Button::Left => (false, 1),
            Button::Up => (false, 2),
            Button::Down => (false, 3),
            Button::A => (true, 0),
            Button::B => (true, 1),
            Button::Select => (true, 2),
            Button::Start => (true, 3),
        }
    }
}

/// P1 (0xFF00). Bits 5 and 4 select the action and direction groups (0
/// selects); the low nibble reads 0 for pressed buttons in selected groups.
pub(crate) struct Joypad {
    select: u8,
    /// Bit set = pressed.
    actions: u8,
    directions: u8,
}

impl Joypad {
    pub(crate) fn new() -> Self {
        Self {
            select: 0x30,
            actions: 0,
            directions: 0,
        }
    }

    pub(crate) fn read(&self) -> u8 {
        let mut low = 0x0F;
        if self.select & 0x10 == 0 {
            low &= !self.directions;
        }
        if self.select & 0x20 == 0 {
            low &= !self.actions;
        }
        0xC0 | self.select | (low & 0x0F)
    }

    pub(crate) fn write(&mut self, value: u8) {
        self.select = value & 0x30;
    }

    /// A new press requests the joypad interrupt.
    pub(crate) fn set_button(
        &mut self,
        button: Button,
        pressed: bool,
        interrupts: &mut InterruptController,
    ) {
        let (action, bit) = button.line();
        let group = if action {
            &mut self.actions
        } else {
            &mut self.directions
        };
        let mask = 1u8 << bit;
        if pressed {
            if *group & mask == 0 {
                interrupts.raise(Interrupt::Joypad);
            }
            *group |= mask;
        } else {
            *group &= !mask;
        }
    }
}
