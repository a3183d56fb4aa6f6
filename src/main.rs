// What you SEE:
// • A 256x192 cyan canvas with a black-and-white arrow cursor.
// • Move the mouse: the cursor follows at 2/3 speed and stops at the edges.
// • Hold Left Mouse: you draw single black pixels under the cursor tip.
// • Right Mouse clears the canvas. ESC (or closing the window) quits.

use std::path::Path;
use std::time::{Duration, Instant};

use sprite_sketch::config::{SketchConfig, CONFIG_FILE};
use sprite_sketch::input::WindowMouse;
use sprite_sketch::screen::Screen;
use sprite_sketch::{setup, Error, FrameLoop, PointerState};

fn main() -> Result<(), Error> {
    /* --- Settings ---
       First run writes Sketch.toml next to you with the defaults. */
    let config = SketchConfig::load_or_initialize(Path::new(CONFIG_FILE))?;
    println!(
        "sprite-sketch: scale {}, {} fps target, colors {}/{}",
        config.window_scale, config.target_fps, config.screen_fg, config.screen_bg
    );

    /* --- Window + display controller ---
       Visual: window opens; blank until setup unblanks the display. */
    let mut screen = Screen::new("Sprite Sketch", config.scale(), config.target_fps)?;
    let mut mouse = WindowMouse::new(screen.window());

    /* --- Screen setup (bitmap mode, tables, cursor glyphs) ---
       Visual: empty canvas with the cursor in the middle. */
    let mut sketch = FrameLoop::new(PointerState::centered());
    setup::init_bitmap_screen(&mut screen, config.screen_fg, config.screen_bg, sketch.cursor());

    /* --- Stats (prints to terminal once per second) --- */
    let mut last_stats_time = Instant::now();
    let mut last_stats_frames = 0u64;

    /* ------------------------------ Main loop ------------------------------ */
    sketch.run(&mut screen, &mut mouse, |screen, sketch| {
        if !screen.is_open() || screen.esc_pressed() {
            return true;
        }

        let now = Instant::now();
        if config.stats && now.duration_since(last_stats_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_stats_time).as_secs_f32();
            let frames = sketch.frames() - last_stats_frames;
            let p = sketch.pointer();
            println!(
                "frames: {} ({:.1} fps) pointer: {},{}",
                sketch.frames(),
                frames as f32 / secs,
                p.x(),
                p.y()
            );
            last_stats_frames = sketch.frames();
            last_stats_time = now;
        }
        false
    });

    println!("sprite-sketch: stopped after {} frames", sketch.frames());

    match screen.take_fault() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
