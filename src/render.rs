// Scanout: turns VRAM into the picture the window shows.
// Visual: Graphics II bitmap underneath, hardware sprites (the cursor) on top,
// backdrop color wherever a pixel is transparent.
use image::{ImageBuffer, Rgb, RgbImage};

use crate::types::{WindowBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::vdp::{Mode1Flag, Vdp, MAX_SPRITES, SPRITE_ENTRY_BYTES, SPRITE_LIST_END};

/// The fixed 16-color TMS9918 palette. Index 0 is "transparent" and only ever
/// shows through to the backdrop; as a backdrop it is black.
#[rustfmt::skip]
pub const PALETTE: [[u8; 3]; 16] = [
    [0x00, 0x00, 0x00], // transparent
    [0x00, 0x00, 0x00], // black
    [0x21, 0xC8, 0x42], // medium green
    [0x5E, 0xDC, 0x78], // light green
    [0x54, 0x55, 0xED], // dark blue
    [0x7D, 0x76, 0xFC], // light blue
    [0xD4, 0x52, 0x4D], // dark red
    [0x42, 0xEB, 0xF5], // cyan
    [0xFC, 0x55, 0x54], // medium red
    [0xFF, 0x79, 0x78], // light red
    [0xD4, 0xC1, 0x54], // dark yellow
    [0xE6, 0xCE, 0x80], // light yellow
    [0x21, 0xB0, 0x3B], // dark green
    [0xC9, 0x5B, 0xBA], // magenta
    [0xCC, 0xCC, 0xCC], // gray
    [0xFF, 0xFF, 0xFF], // white
];

/// Bit 7 of a sprite's color byte shifts it 32 pixels to the left.
const EARLY_CLOCK: u8 = 0x80;

#[inline]
fn rgb(color: u8) -> Rgb<u8> {
    Rgb(PALETTE[(color & 0x0F) as usize])
}

/// Render one full frame from VRAM and registers.
pub fn scan_out(vdp: &Vdp) -> RgbImage {
    let mut img: RgbImage =
        ImageBuffer::from_pixel(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32, rgb(vdp.backdrop()));

    // Blanked: backdrop only.
    if !vdp.mode1_flag(Mode1Flag::Unblank) {
        return img;
    }

    if vdp.bitmap_mode() {
        draw_bitmap(vdp, &mut img);
    }
    draw_sprites(vdp, &mut img);
    img
}

/// Graphics II: the screen is split into three bands of 8 tile rows, each band
/// with its own 2 KiB of patterns and colors.
fn draw_bitmap(vdp: &Vdp, img: &mut RgbImage) {
    let names = vdp.name_table();
    let patterns = vdp.pattern_table();
    let colors = vdp.color_table();

    for tile_y in 0..24u16 {
        let third = tile_y / 8;
        for tile_x in 0..32u16 {
            let name = u16::from(vdp.peek(names + tile_y * 32 + tile_x));
            for line in 0..8u16 {
                let offset = third * 0x800 + name * 8 + line;
                let bits = vdp.peek(patterns + offset);
                let color = vdp.peek(colors + offset);
                let (fg, bg) = (color >> 4, color & 0x0F);

                let py = (tile_y * 8 + line) as u32;
                for bit in 0..8u16 {
                    let c = if bits & (0x80 >> bit) != 0 { fg } else { bg };
                    if c != 0 {
                        img.put_pixel((tile_x * 8 + bit) as u32, py, rgb(c));
                    }
                }
            }
        }
    }
}

/// Lower-numbered sprites win, so the list is drawn back to front.
/// The per-line sprite limit is not modelled.
fn draw_sprites(vdp: &Vdp, img: &mut RgbImage) {
    let attributes = vdp.sprite_attribute_table();
    let patterns = vdp.sprite_pattern_table();
    let size: i32 = if vdp.mode1_flag(Mode1Flag::Sprites16) { 16 } else { 8 };
    let zoom: i32 = if vdp.mode1_flag(Mode1Flag::Magnify) { 2 } else { 1 };

    let mut active = Vec::with_capacity(MAX_SPRITES);
    for slot in 0..MAX_SPRITES as u16 {
        let base = attributes + slot * SPRITE_ENTRY_BYTES;
        let y = vdp.peek(base);
        if y == SPRITE_LIST_END {
            break;
        }
        active.push((y, vdp.peek(base + 1), vdp.peek(base + 2), vdp.peek(base + 3)));
    }

    for &(y, x, name, color) in active.iter().rev() {
        if color & 0x0F == 0 {
            continue;
        }

        // Rows past 0xE0 are negative so sprites can slide in from the top.
        let row0 = if y > 0xE0 { i32::from(y) - 256 } else { i32::from(y) };
        let top = row0 + 1;
        let left = i32::from(x) - if color & EARLY_CLOCK != 0 { 32 } else { 0 };
        let name = if size == 16 { name & 0xFC } else { name };
        let base = patterns + u16::from(name) * 8;

        for row in 0..size {
            for col in 0..size {
                let byte = vdp.peek(base + ((col / 8) * 16 + row) as u16);
                if byte & (0x80 >> (col % 8)) == 0 {
                    continue;
                }
                for zy in 0..zoom {
                    for zx in 0..zoom {
                        put_clipped(img, left + col * zoom + zx, top + row * zoom + zy, rgb(color));
                    }
                }
            }
        }
    }
}

#[inline]
fn put_clipped(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= img.width() || y >= img.height() {
        return;
    }
    img.put_pixel(x, y, color);
}

/// Pack the RGB image as 0x00RRGGBB for minifb.
pub fn pack(img: &RgbImage, out: &mut WindowBuffer) {
    let (w, h) = img.dimensions();
    out.width = w as usize;
    out.height = h as usize;
    out.pixels.clear();
    out.pixels.extend(img.pixels().map(|p| {
        let r = p[0] as u32;
        let g = p[1] as u32;
        let b = p[2] as u32;
        (r << 16) | (g << 8) | b
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::CursorOverlay;
    use crate::painter::set_pixel;
    use crate::setup::init_bitmap_screen;
    use crate::types::PointerState;
    use crate::vdp::{DisplayRegisters, REG_BACKDROP, REG_MODE1};

    const CYAN: u8 = 7;

    fn screen_with_cursor_at(at: PointerState) -> Vdp {
        let mut vdp = Vdp::new();
        init_bitmap_screen(&mut vdp, 1, CYAN, &CursorOverlay::new(at));
        vdp
    }

    #[test]
    fn blanked_display_shows_backdrop_only() {
        let mut vdp = Vdp::new();
        vdp.write_register(REG_BACKDROP, 4);
        vdp.write_register(REG_MODE1, 0x80);
        let img = scan_out(&vdp);
        assert!(img.pixels().all(|p| *p == rgb(4)));
    }

    #[test]
    fn painted_pixel_uses_foreground_color() {
        let mut vdp = screen_with_cursor_at(PointerState::new(200, 180));
        set_pixel(&mut vdp, PointerState::new(10, 20));

        let img = scan_out(&vdp);
        assert_eq!(*img.get_pixel(10, 20), rgb(1));
        assert_eq!(*img.get_pixel(11, 20), rgb(CYAN));
        assert_eq!(*img.get_pixel(10, 21), rgb(CYAN));
    }

    #[test]
    fn cursor_sprite_lands_one_line_below_its_row() {
        let vdp = screen_with_cursor_at(PointerState::new(40, 30));
        let img = scan_out(&vdp);

        // The arrow's tip is the top-left pixel of the outline glyph.
        assert_eq!(*img.get_pixel(40, 31), rgb(1));
        assert_eq!(*img.get_pixel(40, 30), rgb(CYAN));
        // Inside the arrow the fill shows white.
        assert_eq!(*img.get_pixel(41, 34), rgb(15));
    }

    #[test]
    fn sprite_near_right_edge_is_clipped() {
        let vdp = screen_with_cursor_at(PointerState::new(250, 100));
        let img = scan_out(&vdp);
        assert_eq!(img.dimensions(), (256, 192));
        // Row 10 of the arrow runs to column 260; its fill still shows at 255
        // and the outline beyond the edge is dropped without wrapping.
        assert_eq!(*img.get_pixel(255, 111), rgb(15));
        assert_eq!(*img.get_pixel(0, 111), rgb(CYAN));
    }

    #[test]
    fn pack_produces_rrggbb_words() {
        let img: RgbImage = ImageBuffer::from_pixel(2, 1, Rgb([0x12, 0x34, 0x56]));
        let mut out = WindowBuffer::new(0, 0);
        pack(&img, &mut out);
        assert_eq!((out.width, out.height), (2, 1));
        assert_eq!(out.pixels, vec![0x0012_3456, 0x0012_3456]);
    }
}
