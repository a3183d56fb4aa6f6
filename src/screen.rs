// The display controller attached to a real window.
// Visual effects provided here:
// 1) A window that shows whatever VRAM currently holds (bitmap + cursor).
// 2) Frame pacing: polling the status register for vblank is what scans a
//    frame out, so the loop runs at the window's target frame rate.
use std::cell::RefCell;
use std::rc::Rc;

use minifb::{Key, Scale, Window, WindowOptions};

use crate::error::Error;
use crate::render;
use crate::types::{WindowBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::vdp::{DisplayRegisters, Vdp};

pub struct Screen {
    vdp: Vdp,
    window: Rc<RefCell<Window>>, // the on-screen window you see (shared with the mouse)
    buffer: WindowBuffer,
    fault: Option<Error>,
}

impl Screen {
    /// Open a 256x192 window at the given zoom.
    /// Visual: a new window appears; it stays black until the first vblank.
    pub fn new(title: &str, scale: Scale, target_fps: u32) -> Result<Self, Error> {
        let options = WindowOptions { scale, ..WindowOptions::default() };
        let mut window = Window::new(title, SCREEN_WIDTH, SCREEN_HEIGHT, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(target_fps as usize);
        // Only the sprite arrow is shown over the canvas.
        window.set_cursor_visibility(false);

        Ok(Self {
            vdp: Vdp::new(),
            window: Rc::new(RefCell::new(window)),
            buffer: WindowBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT),
            fault: None,
        })
    }

    /// Shared handle for input devices that read the host mouse.
    pub fn window(&self) -> Rc<RefCell<Window>> {
        Rc::clone(&self.window)
    }

    pub fn vdp(&self) -> &Vdp {
        &self.vdp
    }

    /// Returns false when the user closes the window or a frame failed to present.
    pub fn is_open(&self) -> bool {
        self.fault.is_none() && self.window.borrow().is_open()
    }

    /// True while ESC is held down (we’ll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.borrow().is_key_down(Key::Escape)
    }

    /// The presentation error that closed the screen, if any.
    pub fn take_fault(&mut self) -> Option<Error> {
        self.fault.take()
    }

    /// Render VRAM, push it to the window, then flag the vertical blank.
    /// `update_with_buffer` waits out the frame-rate limit, so this blocks.
    fn scan_out_frame(&mut self) {
        let img = render::scan_out(&self.vdp);
        render::pack(&img, &mut self.buffer);

        if self.fault.is_none() {
            if let Err(e) = self.window.borrow_mut().update_with_buffer(
                &self.buffer.pixels,
                self.buffer.width,
                self.buffer.height,
            ) {
                self.fault = Some(Error::WindowUpdate(e.to_string()));
            }
        }
        self.vdp.raise_vblank();
    }
}

impl DisplayRegisters for Screen {
    fn set_read_address(&mut self, address: u16) {
        self.vdp.set_read_address(address);
    }

    fn set_write_address(&mut self, address: u16) {
        self.vdp.set_write_address(address);
    }

    fn read_data(&mut self) -> u8 {
        self.vdp.read_data()
    }

    fn write_data(&mut self, value: u8) {
        self.vdp.write_data(value);
    }

    fn write_register(&mut self, register: u8, value: u8) {
        self.vdp.write_register(register, value);
    }

    fn read_status(&mut self) -> u8 {
        if !self.vdp.vblank_pending() {
            self.scan_out_frame();
        }
        self.vdp.read_status()
    }
}
