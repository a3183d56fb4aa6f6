// Two-tone mouse cursor built from two hardware sprites stacked on the same spot.
// Visual: a black arrow outline with a white fill, following the pointer.
use crate::types::{OverlayEntry, PointerState};
use crate::vdp::{DisplayRegisters, SPRITE_ATTRIBUTES, SPRITE_ENTRY_BYTES};

/// Sprite slot of the outline glyph.
pub const OUTLINE_SLOT: u8 = 0;
/// Sprite slot of the fill glyph.
pub const FILL_SLOT: u8 = 1;

/// TMS9918 palette indices used by the cursor.
pub const COLOR_BLACK: u8 = 1;
pub const COLOR_WHITE: u8 = 15;

/// 16x16 sprites use four consecutive 8x8 pattern names.
pub const OUTLINE_PATTERN: u8 = 0;
pub const FILL_PATTERN: u8 = 4;

/// The fixed outline/fill pair that forms the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorOverlay {
    pub outline: OverlayEntry,
    pub fill: OverlayEntry,
}

impl CursorOverlay {
    pub fn new(at: PointerState) -> Self {
        Self {
            outline: OverlayEntry {
                row: at.y(),
                column: at.x(),
                pattern: OUTLINE_PATTERN,
                color: COLOR_BLACK,
            },
            fill: OverlayEntry {
                row: at.y(),
                column: at.x(),
                pattern: FILL_PATTERN,
                color: COLOR_WHITE,
            },
        }
    }

    /// Write both full attribute entries. Done once at startup.
    pub fn place<D: DisplayRegisters>(&self, display: &mut D) {
        write_entry(display, OUTLINE_SLOT, &self.outline);
        write_entry(display, FILL_SLOT, &self.fill);
    }

    /// Move both sprites to the pointer. Only row and column are rewritten;
    /// pattern and color stay as `place` left them.
    pub fn track<D: DisplayRegisters>(&mut self, display: &mut D, at: PointerState) {
        for (slot, entry) in [(OUTLINE_SLOT, &mut self.outline), (FILL_SLOT, &mut self.fill)] {
            entry.row = at.y();
            entry.column = at.x();
            write_position(display, slot, at.y(), at.x());
        }
    }
}

fn entry_address(slot: u8) -> u16 {
    SPRITE_ATTRIBUTES + u16::from(slot) * SPRITE_ENTRY_BYTES
}

fn write_position<D: DisplayRegisters>(display: &mut D, slot: u8, row: u8, column: u8) {
    display.set_write_address(entry_address(slot));
    display.write_data(row);
    display.write_data(column);
}

fn write_entry<D: DisplayRegisters>(display: &mut D, slot: u8, entry: &OverlayEntry) {
    display.set_write_address(entry_address(slot));
    display.write_data(entry.row);
    display.write_data(entry.column);
    display.write_data(entry.pattern);
    display.write_data(entry.color);
}

/// Read an attribute entry back through the data port.
/// Nothing in the loop needs this; it is for checking where the cursor ended up.
pub fn read_entry<D: DisplayRegisters>(display: &mut D, slot: u8) -> OverlayEntry {
    display.set_read_address(entry_address(slot));
    OverlayEntry {
        row: display.read_data(),
        column: display.read_data(),
        pattern: display.read_data(),
        color: display.read_data(),
    }
}
