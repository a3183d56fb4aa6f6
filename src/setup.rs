// One-time screen setup that runs before the frame loop:
// bitmap mode, tables, cursor sprite patterns, initial sprite placement.
use crate::overlay::{CursorOverlay, FILL_PATTERN, FILL_SLOT, OUTLINE_PATTERN};
use crate::vdp::{
    DisplayRegisters, Mode1Flag, BITMAP_BYTES, COLOR_TABLE, MODE0_BITMAP, NAME_ENTRIES,
    NAME_TABLE, PATTERN_TABLE, REG_BACKDROP, REG_COLOR, REG_MODE0, REG_MODE1, REG_NAME,
    REG_PATTERN, REG_SPRITE_ATTR, REG_SPRITE_PAT, SPRITE_ATTRIBUTES, SPRITE_ENTRY_BYTES,
    SPRITE_LIST_END, SPRITE_PATTERNS,
};

// =============================================================================
// CURSOR GLYPH (16x16 arrow)
// =============================================================================

/// 0 = transparent, 1 = outline, 2 = fill
#[rustfmt::skip]
const ARROW: [[u8; 16]; 16] = [
    [1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [1,1,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [1,2,1,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [1,2,2,1,0,0,0,0,0,0,0,0,0,0,0,0],
    [1,2,2,2,1,0,0,0,0,0,0,0,0,0,0,0],
    [1,2,2,2,2,1,0,0,0,0,0,0,0,0,0,0],
    [1,2,2,2,2,2,1,0,0,0,0,0,0,0,0,0],
    [1,2,2,2,2,2,2,1,0,0,0,0,0,0,0,0],
    [1,2,2,2,2,2,2,2,1,0,0,0,0,0,0,0],
    [1,2,2,2,2,2,2,2,2,1,0,0,0,0,0,0],
    [1,2,2,2,2,2,1,1,1,1,1,0,0,0,0,0],
    [1,2,2,1,2,2,1,0,0,0,0,0,0,0,0,0],
    [1,2,1,0,1,2,2,1,0,0,0,0,0,0,0,0],
    [1,1,0,0,1,2,2,1,0,0,0,0,0,0,0,0],
    [1,0,0,0,0,1,2,2,1,0,0,0,0,0,0,0],
    [0,0,0,0,0,1,1,1,1,0,0,0,0,0,0,0],
];

/// Sprite pattern bytes for every ARROW cell equal to `layer`.
/// 16x16 layout: left 8 columns in bytes 0..16, right 8 columns in 16..32.
pub fn arrow_pattern(layer: u8) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (row, cells) in ARROW.iter().enumerate() {
        for (col, &cell) in cells.iter().enumerate() {
            if cell == layer {
                out[(col / 8) * 16 + row] |= 0x80 >> (col % 8);
            }
        }
    }
    out
}

// =============================================================================
// VRAM HELPERS
// =============================================================================

/// Write `count` copies of `value` starting at `address`.
pub fn fill<D: DisplayRegisters>(display: &mut D, address: u16, value: u8, count: usize) {
    display.set_write_address(address);
    for _ in 0..count {
        display.write_data(value);
    }
}

pub fn copy<D: DisplayRegisters>(display: &mut D, address: u16, bytes: &[u8]) {
    display.set_write_address(address);
    for &b in bytes {
        display.write_data(b);
    }
}

/// Write `start, start+1, ...` (wrapping) for `count` bytes.
pub fn write_sequence<D: DisplayRegisters>(display: &mut D, address: u16, start: u8, count: usize) {
    display.set_write_address(address);
    let mut value = start;
    for _ in 0..count {
        display.write_data(value);
        value = value.wrapping_add(1);
    }
}

// =============================================================================
// SCREEN
// =============================================================================

/// Put the display into 256x192 bitmap mode with every pixel cleared, load
/// the cursor glyphs and place the cursor. The display is blanked while the
/// tables are written and enabled at the end.
pub fn init_bitmap_screen<D: DisplayRegisters>(display: &mut D, fg: u8, bg: u8, cursor: &CursorOverlay) {
    let (fg, bg) = (fg & 0x0F, bg & 0x0F);
    let mode1 = Mode1Flag::Vram16K as u8 | Mode1Flag::Sprites16 as u8;

    display.write_register(REG_MODE0, MODE0_BITMAP);
    display.write_register(REG_MODE1, mode1);
    display.write_register(REG_NAME, 0x06);        // 0x1800
    display.write_register(REG_COLOR, 0xFF);       // 0x2000
    display.write_register(REG_PATTERN, 0x03);     // 0x0000
    display.write_register(REG_SPRITE_ATTR, 0x36); // 0x1B00
    display.write_register(REG_SPRITE_PAT, 0x07);  // 0x3800
    display.write_register(REG_BACKDROP, bg);

    // Names 0..=255 in each third, so tile (col,row) maps straight onto the
    // pattern bytes at 8*col + 256*row.
    write_sequence(display, NAME_TABLE, 0, NAME_ENTRIES);
    fill(display, COLOR_TABLE, (fg << 4) | bg, BITMAP_BYTES);
    fill(display, PATTERN_TABLE, 0, BITMAP_BYTES);

    copy(display, SPRITE_PATTERNS + u16::from(OUTLINE_PATTERN) * 8, &arrow_pattern(1));
    copy(display, SPRITE_PATTERNS + u16::from(FILL_PATTERN) * 8, &arrow_pattern(2));

    cursor.place(display);
    let after_cursor = SPRITE_ATTRIBUTES + (u16::from(FILL_SLOT) + 1) * SPRITE_ENTRY_BYTES;
    fill(display, after_cursor, SPRITE_LIST_END, 1);

    display.write_register(REG_MODE1, mode1 | Mode1Flag::Unblank as u8);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PointerState;
    use crate::vdp::Vdp;

    #[test]
    fn outline_and_fill_do_not_overlap() {
        let outline = arrow_pattern(1);
        let fill = arrow_pattern(2);
        assert!(outline.iter().zip(fill.iter()).all(|(a, b)| a & b == 0));
        assert_eq!(outline[0], 0x80);
        assert_eq!(fill[3], 0x60);
        // Row 10 is the arrow's widest outline run, spilling into the right half.
        assert_eq!(outline[16 + 10], 0xE0);
        assert_eq!(fill[16 + 10], 0x00);
    }

    #[test]
    fn init_lays_out_bitmap_mode() {
        let mut vdp = Vdp::new();
        let cursor = CursorOverlay::new(PointerState::default());
        init_bitmap_screen(&mut vdp, 1, 7, &cursor);

        assert!(vdp.bitmap_mode());
        assert!(vdp.mode1_flag(Mode1Flag::Unblank));
        assert!(vdp.mode1_flag(Mode1Flag::Sprites16));
        assert_eq!(vdp.pattern_table(), PATTERN_TABLE);
        assert_eq!(vdp.color_table(), COLOR_TABLE);

        assert_eq!(vdp.peek(NAME_TABLE), 0);
        assert_eq!(vdp.peek(NAME_TABLE + 255), 255);
        assert_eq!(vdp.peek(NAME_TABLE + 256), 0);
        assert_eq!(vdp.peek(COLOR_TABLE + 100), 0x17);
        assert!(vdp.vram()[..BITMAP_BYTES].iter().all(|&b| b == 0));

        let end = SPRITE_ATTRIBUTES + 2 * SPRITE_ENTRY_BYTES;
        assert_eq!(vdp.peek(end), SPRITE_LIST_END);
        assert_eq!(vdp.peek(SPRITE_PATTERNS), 0x80);
    }
}
