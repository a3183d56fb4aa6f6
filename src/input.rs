// Pointing-device side of the loop.
// `InputDevice` is what the frame loop polls; `WindowMouse` feeds it from the
// host mouse inside the minifb window, turning absolute window positions into
// the relative deltas a real mouse would report.
use std::cell::RefCell;
use std::rc::Rc;

use minifb::{MouseButton, MouseMode, Window};

use crate::types::{Buttons, InputSample};

pub trait InputDevice {
    fn enable(&mut self);
    fn disable(&mut self);
    /// One sample per frame: motion since the previous call plus buttons.
    fn sample(&mut self) -> InputSample;
}

/// Keeps a device enabled for as long as it lives.
/// Dropping it disables the device, whichever way the loop ended.
pub struct InputSession<'a, I: InputDevice> {
    device: &'a mut I,
}

impl<'a, I: InputDevice> InputSession<'a, I> {
    pub fn open(device: &'a mut I) -> Self {
        device.enable();
        Self { device }
    }

    pub fn sample(&mut self) -> InputSample {
        self.device.sample()
    }
}

impl<I: InputDevice> Drop for InputSession<'_, I> {
    fn drop(&mut self) {
        self.device.disable();
    }
}

/// Host mouse as a relative pointing device.
pub struct WindowMouse {
    window: Rc<RefCell<Window>>,
    last: Option<(f32, f32)>, // position already reported, in screen pixels
    enabled: bool,
}

impl WindowMouse {
    pub fn new(window: Rc<RefCell<Window>>) -> Self {
        Self { window, last: None, enabled: false }
    }
}

impl InputDevice for WindowMouse {
    fn enable(&mut self) {
        self.enabled = true;
        self.last = None;
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.last = None;
    }

    fn sample(&mut self) -> InputSample {
        if !self.enabled {
            return InputSample::default();
        }

        let window = self.window.borrow();
        let now = window.get_mouse_pos(MouseMode::Pass);

        let mut buttons = Buttons::NONE;
        if window.get_mouse_down(MouseButton::Left) {
            buttons = buttons | Buttons::LEFT;
        }
        if window.get_mouse_down(MouseButton::Right) {
            buttons = buttons | Buttons::RIGHT;
        }

        let (dx, dy) = match (self.last, now) {
            (Some(last), Some(now)) => {
                let (dx, dy) = motion_between(last, now);
                // Keep the sub-pixel remainder for the next frame.
                self.last = Some((last.0 + f32::from(dx), last.1 + f32::from(dy)));
                (dx, dy)
            }
            (None, Some(now)) => {
                self.last = Some(now);
                (0, 0)
            }
            (_, None) => (0, 0),
        };

        InputSample::new(dx, dy, buttons)
    }
}

/// Whole-pixel motion from `last` to `now`, saturated to what a mouse packet holds.
pub fn motion_between(last: (f32, f32), now: (f32, f32)) -> (i8, i8) {
    (to_delta(now.0 - last.0), to_delta(now.1 - last.1))
}

fn to_delta(d: f32) -> i8 {
    d.trunc().clamp(f32::from(i8::MIN), f32::from(i8::MAX)) as i8
}
