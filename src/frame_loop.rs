// The per-frame control loop: wait for vblank, poll the mouse, move the
// pointer, move the cursor sprites, then paint or clear.
use crate::input::{InputDevice, InputSession};
use crate::overlay::CursorOverlay;
use crate::painter;
use crate::pointer;
use crate::types::{Buttons, InputSample, PointerState};
use crate::vdp::DisplayRegisters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Shutdown,
}

/// Owns everything that changes from frame to frame.
pub struct FrameLoop {
    pointer: PointerState,
    cursor: CursorOverlay,
    frames: u64,
    state: LoopState,
}

impl FrameLoop {
    pub fn new(start: PointerState) -> Self {
        Self {
            pointer: start,
            cursor: CursorOverlay::new(start),
            frames: 0,
            state: LoopState::Running,
        }
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn cursor(&self) -> &CursorOverlay {
        &self.cursor
    }

    /// Frames run so far. Diagnostic only.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Apply one sample: integrate, track, then paint/clear.
    pub fn step<D: DisplayRegisters>(&mut self, display: &mut D, sample: &InputSample) {
        self.pointer = pointer::integrate(self.pointer, sample);

        // Every frame, buttons or not.
        self.cursor.track(display, self.pointer);

        if sample.buttons.contains(Buttons::LEFT) {
            painter::set_pixel(display, self.pointer);
        }
        if sample.buttons.contains(Buttons::RIGHT) {
            painter::clear_all(display);
        }
    }

    /// One full iteration, synchronised to the next vertical blank.
    pub fn tick<D, I>(&mut self, display: &mut D, input: &mut InputSession<'_, I>)
    where
        D: DisplayRegisters,
        I: InputDevice,
    {
        display.wait_vblank();
        self.frames = self.frames.wrapping_add(1);

        let sample = input.sample();
        self.step(display, &sample);
    }

    /// Run until `shutdown_requested` says stop. It is checked between
    /// iterations only. The device is enabled for the duration of the run and
    /// disabled on the way out.
    pub fn run<D, I, F>(&mut self, display: &mut D, device: &mut I, mut shutdown_requested: F)
    where
        D: DisplayRegisters,
        I: InputDevice,
        F: FnMut(&D, &FrameLoop) -> bool,
    {
        if self.state == LoopState::Shutdown {
            return;
        }

        let mut session = InputSession::open(device);
        while !shutdown_requested(&*display, &*self) {
            self.tick(display, &mut session);
        }
        self.state = LoopState::Shutdown;
    }
}
