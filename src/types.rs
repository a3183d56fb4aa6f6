// Core types shared by the frame loop, the painter and the sprite cursor.

/// Visible bitmap width in pixels (also the x-axis span of the pointer).
pub const SCREEN_WIDTH: usize = 256;
/// Visible bitmap height in pixels.
pub const SCREEN_HEIGHT: usize = 192;

/// Largest pointer column.
pub const POINTER_MAX_X: u8 = (SCREEN_WIDTH - 1) as u8;
/// Largest pointer row.
pub const POINTER_MAX_Y: u8 = (SCREEN_HEIGHT - 1) as u8;

/// Absolute pointer position on the 256x192 bitmap.
/// Visual: this is the pixel the cursor tip sits on, and where LMB paints.
///
/// Fields are private so the only ways to get a value are [`PointerState::new`]
/// (which clamps) and the integrator, keeping `x <= 255` and `y <= 191`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerState {
    x: u8,
    y: u8,
}

impl PointerState {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y: y.min(POINTER_MAX_Y) }
    }

    /// Screen centre, where the cursor appears at startup.
    pub fn centered() -> Self {
        Self::new((SCREEN_WIDTH / 2) as u8, (SCREEN_HEIGHT / 2) as u8)
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::centered()
    }
}

/// Button bitmask reported by the pointing device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buttons(pub u8);

impl Buttons {
    pub const NONE: Buttons = Buttons(0x00);
    pub const LEFT: Buttons = Buttons(0x01);
    pub const RIGHT: Buttons = Buttons(0x02);

    pub fn contains(self, other: Buttons) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }
}

impl std::ops::BitOr for Buttons {
    type Output = Buttons;

    fn bitor(self, rhs: Buttons) -> Buttons {
        Buttons(self.0 | rhs.0)
    }
}

/// One frame's worth of input: relative motion plus the button state.
/// Produced fresh every frame and consumed immediately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSample {
    pub dx: i8,
    pub dy: i8,
    pub buttons: Buttons,
}

impl InputSample {
    pub fn new(dx: i8, dy: i8, buttons: Buttons) -> Self {
        Self { dx, dy, buttons }
    }

    pub fn motion(dx: i8, dy: i8) -> Self {
        Self { dx, dy, buttons: Buttons::NONE }
    }
}

/// A sprite attribute entry as the display controller stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayEntry {
    pub row: u8,
    pub column: u8,
    pub pattern: u8,
    pub color: u8,
}

/// Packed 0x00RRGGBB pixels for the window.
/// Visual: this is the image you actually see each frame.
#[derive(Clone)]
pub struct WindowBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl WindowBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_starts_at_screen_centre() {
        let p = PointerState::default();
        assert_eq!((p.x(), p.y()), (128, 96));
    }

    #[test]
    fn pointer_row_is_clamped_on_construction() {
        let p = PointerState::new(255, 250);
        assert_eq!((p.x(), p.y()), (255, 191));
    }

    #[test]
    fn buttons_contains_checks_individual_bits() {
        let both = Buttons::LEFT | Buttons::RIGHT;
        assert!(both.contains(Buttons::LEFT));
        assert!(both.contains(Buttons::RIGHT));
        assert!(!Buttons::LEFT.contains(Buttons::RIGHT));
        assert!(!Buttons::NONE.contains(Buttons::NONE));
    }
}
