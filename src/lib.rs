// Mouse-driven freehand sketching on an emulated TMS9918-style bitmap screen.
// The frame loop and everything it touches live here so tests can drive them
// against a headless display; `main.rs` only wires in the window.

pub mod config;
pub mod error;
pub mod frame_loop;
pub mod input;
pub mod overlay;
pub mod painter;
pub mod pointer;
pub mod render;
pub mod screen;
pub mod setup;
pub mod types;
pub mod vdp;

pub use error::Error;
pub use frame_loop::{FrameLoop, LoopState};
pub use types::{Buttons, InputSample, PointerState};
