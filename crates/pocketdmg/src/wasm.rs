use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;

use crate::{Button, Emulator};

/// Browser-facing wrapper, exported to JS as `Emulator`.
///
/// The host fetches the images, calls `render` on every animation frame
/// and paints the returned shade indices itself.
#[wasm_bindgen(js_name = Emulator)]
pub struct EmuWasm {
    emulator: Emulator,
}

#[wasm_bindgen(js_class = Emulator)]
impl EmuWasm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> EmuWasm {
        EmuWasm {
            emulator: Emulator::new(),
        }
    }

    pub fn load_bootrom(&mut self, data: Uint8Array) -> Result<(), JsError> {
        self.emulator.load_boot_rom(&data.to_vec())?;
        Ok(())
    }

    pub fn load_catridge(&mut self, data: Uint8Array) -> Result<(), JsError> {
        self.emulator.load_cartridge(&data.to_vec())?;
        Ok(())
    }

    /// Run one frame and return 160×144 shade indices (0..=3), row-major.
    pub fn render(&mut self) -> Result<Uint8Array, JsError> {
        let frame = self.emulator.render_frame()?;
        Ok(Uint8Array::from(frame.pixels()))
    }

    pub fn reset(&mut self) {
        self.emulator.reset();
    }

    /// `index` follows P1 bit order: 0..=3 Right/Left/Up/Down,
    /// 4..=7 A/B/Select/Start.
    pub fn set_button(&mut self, index: u8, pressed: bool) {
        if let Some(button) = index_to_button(index) {
            self.emulator.set_button(button, pressed);
        }
    }
}

impl Default for EmuWasm {
    fn default() -> Self {
        Self::new()
    }
}

fn index_to_button(index: u8) -> Option<Button> {
    let button = match index {
        0 => Button::Right,
        1 => Button::Left,
        2 => Button::Up,
        3 => Button::Down,
        4 => Button::A,
        5 => Button::B,
        6 => Button::Select,
        7 => Button::Start,
        _ => return None,
    };
    Some(button)
}
