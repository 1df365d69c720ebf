/// Scanline PPU.
///
/// Each visible line runs OAM scan (80 dots), pixel transfer (a fixed 172
/// dots) and H-blank until dot 456; lines 144..=153 are V-blank. The whole
/// line is composed at the end of pixel transfer from the register values
/// current at that point, so mid-line register writes only take effect on
/// the next line. The finished frame becomes visible to the host when
/// V-blank wraps back to line 0.
mod mmio;
mod render;

use bitflags::bitflags;

use super::interrupts::{Interrupt, InterruptController};
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

const OAM_SCAN_DOTS: u16 = 80;
const TRANSFER_DOTS: u16 = 172;
const LINE_DOTS: u16 = 456;
const VBLANK_START_LINE: u8 = 144;
const LINES_PER_FRAME: u8 = 154;
const MAX_SPRITES_PER_LINE: usize = 10;

bitflags! {
    /// LCDC (0xFF40).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub(crate) struct LcdControl: u8 {
        const LCD_ENABLE = 0x80;
        const WINDOW_TILE_MAP = 0x40;
        const WINDOW_ENABLE = 0x20;
        /// Set: unsigned tile indices from 0x8000. Clear: signed from 0x9000.
        const TILE_DATA = 0x10;
        const BG_TILE_MAP = 0x08;
        const OBJ_SIZE = 0x04;
        const OBJ_ENABLE = 0x02;
        const BG_WINDOW_ENABLE = 0x01;
    }
}

bitflags! {
    /// Writable interrupt-select bits of STAT (0xFF41).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub(crate) struct StatSelect: u8 {
        const LYC = 0x40;
        const OAM_SCAN = 0x20;
        const VBLANK = 0x10;
        const HBLANK = 0x08;
    }
}

/// PPU mode as reported in STAT bits 1..0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Transfer = 3,
}

/// A 160×144 grid of shade indices (0 = lightest, 3 = darkest), row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: Vec<u8>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            pixels: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * SCREEN_WIDTH + x]
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.pixels[y * SCREEN_WIDTH..(y + 1) * SCREEN_WIDTH]
    }

    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        &mut self.pixels[y * SCREEN_WIDTH..(y + 1) * SCREEN_WIDTH]
    }
}

pub(crate) struct Ppu {
    vram: Box<[u8; 0x2000]>,
    oam: [u8; 0xA0],
    lcdc: LcdControl,
    stat_select: StatSelect,
    scy: u8,
    scx: u8,
    ly: u8,
    lyc: u8,
    bgp: u8,
    obp0: u8,
    obp1: u8,
    wy: u8,
    wx: u8,
    mode: Mode,
    /// Dot within the current line, 0..456.
    dot: u16,
    /// Window row counter; advances only on lines where the window drew.
    window_line: u8,
    /// OR of all enabled STAT sources; the interrupt fires on its rising edge.
    stat_line: bool,
    /// OAM indices picked by the last OAM scan, in OAM order.
    line_sprites: Vec<u8>,
    /// Object height the last OAM scan used; LCDC writes later in the line
    /// do not change it.
    line_sprite_height: i16,
    /// Last completed frame.
    front: FrameBuffer,
    /// Frame being drawn.
    back: FrameBuffer,
    frame_ready: bool,
}

impl Ppu {
    /// Power-on state: LCD off, everything cleared.
    pub(crate) fn new() -> Self {
        Self {
            vram: Box::new([0; 0x2000]),
            oam: [0; 0xA0],
            lcdc: LcdControl::empty(),
            stat_select: StatSelect::empty(),
            scy: 0,
            scx: 0,
            ly: 0,
            lyc: 0,
            bgp: 0,
            obp0: 0,
            obp1: 0,
            wy: 0,
            wx: 0,
            mode: Mode::HBlank,
            dot: 0,
            window_line: 0,
            stat_line: false,
            line_sprites: Vec::with_capacity(MAX_SPRITES_PER_LINE),
            line_sprite_height: 8,
            front: FrameBuffer::new(),
            back: FrameBuffer::new(),
            frame_ready: false,
        }
    }

    /// Register state left behind by the DMG boot ROM.
    pub(crate) fn init_dmg(&mut self) {
        self.lcdc = LcdControl::from_bits_retain(0x91);
        self.bgp = 0xFC;
        self.ly = 0;
        self.dot = 0;
        self.mode = Mode::OamScan;
    }

    #[inline]
    pub(crate) fn lcd_enabled(&self) -> bool {
        self.lcdc.contains(LcdControl::LCD_ENABLE)
    }

    pub(crate) fn mode(&self) -> Mode {
        self.mode
    }

    pub(crate) fn frame(&self) -> &FrameBuffer {
        &self.front
    }

    /// Returns and clears the "frame completed" latch.
    pub(crate) fn take_frame_ready(&mut self) -> bool {
        std::mem::take(&mut self.frame_ready)
    }

    /// Advance by `cycles` dots. A disabled LCD holds all state.
    pub(crate) fn tick(&mut self, cycles: u32, interrupts: &mut InterruptController) {
        if !self.lcd_enabled() {
            return;
        }
        for _ in 0..cycles {
            self.tick_dot(interrupts);
        }
    }

    fn tick_dot(&mut self, interrupts: &mut InterruptController) {
        self.dot += 1;
        match self.mode {
            Mode::OamScan if self.dot == OAM_SCAN_DOTS => {
                self.scan_oam();
                self.set_mode(Mode::Transfer, interrupts);
            }
            Mode::Transfer if self.dot == OAM_SCAN_DOTS + TRANSFER_DOTS => {
                self.render_line();
                self.set_mode(Mode::HBlank, interrupts);
            }
            Mode::HBlank if self.dot == LINE_DOTS => {
                self.dot = 0;
                self.ly += 1;
                if self.ly == VBLANK_START_LINE {
                    self.enter_vblank(interrupts);
                } else {
                    self.set_mode(Mode::OamScan, interrupts);
                }
            }
            Mode::VBlank if self.dot == LINE_DOTS => {
                self.dot = 0;
                self.ly += 1;
                if self.ly == LINES_PER_FRAME {
                    self.ly = 0;
                    self.window_line = 0;
                    std::mem::swap(&mut self.front, &mut self.back);
                    self.frame_ready = true;
                    self.set_mode(Mode::OamScan, interrupts);
                } else {
                    self.update_stat(interrupts);
                }
            }
            _ => {}
        }
    }

    fn enter_vblank(&mut self, interrupts: &mut InterruptController) {
        interrupts.raise(Interrupt::VBlank);
        self.set_mode(Mode::VBlank, interrupts);
        log::trace!("PPU: V-blank, IF={:#04X}", interrupts.read_if());
    }

    fn set_mode(&mut self, mode: Mode, interrupts: &mut InterruptController) {
        self.mode = mode;
        self.update_stat(interrupts);
    }

    /// Re-evaluate the STAT interrupt line and raise LCD-STAT on a rising
    /// edge.
    fn update_stat(&mut self, interrupts: &mut InterruptController) {
        let line = self.lcd_enabled()
            && ((self.stat_select.contains(StatSelect::LYC) && self.ly == self.lyc)
                || match self.mode {
                    Mode::HBlank => self.stat_select.contains(StatSelect::HBLANK),
                    Mode::VBlank => self.stat_select.contains(StatSelect::VBLANK),
                    Mode::OamScan => self.stat_select.contains(StatSelect::OAM_SCAN),
                    Mode::Transfer => false,
                });
        if line && !self.stat_line {
            log::trace!("PPU: STAT edge at LY={} mode={:?}", self.ly, self.mode);
            interrupts.raise(Interrupt::Stat);
        }
        self.stat_line = line;
    }

    /// Pick up to ten objects overlapping the current line, in OAM order.
    fn scan_oam(&mut self) {
        let height = self.sprite_height();
        let ly = self.ly as i16;
        self.line_sprite_height = height;
        self.line_sprites.clear();
        for (index, entry) in self.oam.chunks_exact(4).enumerate() {
            let top = entry[0] as i16 - 16;
            if ly >= top && ly < top + height {
                self.line_sprites.push(index as u8);
                if self.line_sprites.len() == MAX_SPRITES_PER_LINE {
                    break;
                }
            }
        }
    }

    #[inline]
    fn sprite_height(&self) -> i16 {
        if self.lcdc.contains(LcdControl::OBJ_SIZE) {
            16
        } else {
            8
        }
    }
}
