use super::{LcdControl, Ppu, MAX_SPRITES_PER_LINE};
use crate::SCREEN_WIDTH;

const TILE_MAP_LOW: usize = 0x1800;
const TILE_MAP_HIGH: usize = 0x1C00;

/// OAM attribute bits.
const ATTR_BEHIND_BG: u8 = 0x80;
const ATTR_Y_FLIP: u8 = 0x40;
const ATTR_X_FLIP: u8 = 0x20;
const ATTR_PALETTE: u8 = 0x10;

#[inline]
fn shade(palette: u8, color: u8) -> u8 {
    (palette >> (color * 2)) & 0x03
}

impl Ppu {
    /// Compose line `ly` into the back buffer.
    pub(super) fn render_line(&mut self) {
        // Raw 2-bit BG/window color ids; sprites need them for priority.
        let mut bg_ids = [0u8; SCREEN_WIDTH];
        if self.lcdc.contains(LcdControl::BG_WINDOW_ENABLE) {
            self.render_background(&mut bg_ids);
            self.render_window(&mut bg_ids);
        }

        let mut row = [0u8; SCREEN_WIDTH];
        for (dst, &id) in row.iter_mut().zip(bg_ids.iter()) {
            *dst = shade(self.bgp, id);
        }

        if self.lcdc.contains(LcdControl::OBJ_ENABLE) {
            self.render_sprites(&bg_ids, &mut row);
        }

        let ly = self.ly as usize;
        self.back.row_mut(ly).copy_from_slice(&row);
    }

    /// Color id of pixel (`col`, `row`) of a BG/window tile.
    fn bg_tile_pixel(&self, tile: u8, row: usize, col: usize) -> u8 {
        let base = if self.lcdc.contains(LcdControl::TILE_DATA) {
            tile as usize * 16
        } else {
            (0x1000 + (tile as i8 as isize) * 16) as usize
        };
        self.tile_pixel_at(base, row, col)
    }

    #[inline]
    fn tile_pixel_at(&self, base: usize, row: usize, col: usize) -> u8 {
        let lo = self.vram[base + row * 2];
        let hi = self.vram[base + row * 2 + 1];
        let bit = 7 - col;
        (((hi >> bit) & 1) << 1) | ((lo >> bit) & 1)
    }

    #[inline]
    fn map_entry(&self, high_map: bool, x: usize, y: usize) -> u8 {
        let base = if high_map { TILE_MAP_HIGH } else { TILE_MAP_LOW };
        self.vram[base + (y / 8) * 32 + x / 8]
    }

    fn render_background(&self, ids: &mut [u8; SCREEN_WIDTH]) {
        let high_map = self.lcdc.contains(LcdControl::BG_TILE_MAP);
        let y = (self.scy as usize + self.ly as usize) & 0xFF;
        for (x, id) in ids.iter_mut().enumerate() {
            let px = (self.scx as usize + x) & 0xFF;
            let tile = self.map_entry(high_map, px, y);
            *id = self.bg_tile_pixel(tile, y % 8, px % 8);
        }
    }

    fn render_window(&mut self, ids: &mut [u8; SCREEN_WIDTH]) {
        if !self.lcdc.contains(LcdControl::WINDOW_ENABLE) || self.wy > self.ly || self.wx > 166 {
            return;
        }
        let high_map = self.lcdc.contains(LcdControl::WINDOW_TILE_MAP);
        let left = self.wx as isize - 7;
        let y = self.window_line as usize;
        let mut drawn = false;
        for (x, id) in ids.iter_mut().enumerate() {
            let wx = x as isize - left;
            if wx < 0 {
                continue;
            }
            let wx = wx as usize;
            let tile = self.map_entry(high_map, wx, y);
            *id = self.bg_tile_pixel(tile, y % 8, wx % 8);
            drawn = true;
        }
        if drawn {
            self.window_line = self.window_line.wrapping_add(1);
        }
    }

    /// Overlay the objects picked by OAM scan.
    ///
    /// For each pixel the first opaque object in (X, OAM index) order owns
    /// it. If that object has the behind-BG attribute and the BG color id is
    /// non-zero, the BG pixel stays.
    fn render_sprites(&self, bg_ids: &[u8; SCREEN_WIDTH], row: &mut [u8; SCREEN_WIDTH]) {
        let height = self.line_sprite_height;
        let mut order = [(0u8, 0u8); MAX_SPRITES_PER_LINE];
        let count = self.line_sprites.len();
        for (slot, &index) in order.iter_mut().zip(self.line_sprites.iter()) {
            *slot = (self.oam[index as usize * 4 + 1], index);
        }
        let order = &mut order[..count];
        order.sort_unstable();

        for (x, pixel) in row.iter_mut().enumerate() {
            let x = x as i16;
            for &(sprite_x, index) in order.iter() {
                let left = sprite_x as i16 - 8;
                if x < left || x >= left + 8 {
                    continue;
                }
                let entry = &self.oam[index as usize * 4..index as usize * 4 + 4];
                let attrs = entry[3];

                let mut line = self.ly as i16 - (entry[0] as i16 - 16);
                // OAM DMA can move an object after the scan picked it.
                if !(0..height).contains(&line) {
                    continue;
                }
                if attrs & ATTR_Y_FLIP != 0 {
                    line = height - 1 - line;
                }
                let mut col = x - left;
                if attrs & ATTR_X_FLIP != 0 {
                    col = 7 - col;
                }

                let tile = if height == 16 {
                    entry[2] & 0xFE
                } else {
                    entry[2]
                };
                let color =
                    self.tile_pixel_at(tile as usize * 16, line as usize, col as usize);
                if color == 0 {
                    continue;
                }

                if attrs & ATTR_BEHIND_BG == 0 || bg_ids[x as usize] == 0 {
                    let palette = if attrs & ATTR_PALETTE != 0 {
                        self.obp1
                    } else {
                        self.obp0
                    };
                    *pixel = shade(palette, color);
                }
                break;
            }
        }
    }
}
