// A tiny error type so we don't rely on anyhow/thiserror.
// Every variant states *where* things went wrong.
// The frame loop itself never fails; these only come from the host side
// (window, settings file).
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    WindowInit(String),   // Creating the window failed
    WindowUpdate(String), // Presenting a scanned-out frame failed
    ConfigRead(String),   // Reading Sketch.toml failed
    ConfigParse(String),  // Sketch.toml is not valid TOML for our settings
    ConfigWrite(String),  // Writing the default Sketch.toml failed
}

impl Display for Error {
    // This decides how the error is printed to your console.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::ConfigRead(s) => write!(f, "Config read error: {s}"),
            Error::ConfigParse(s) => write!(f, "Config parse error: {s}"),
            Error::ConfigWrite(s) => write!(f, "Config write error: {s}"),
        }
    }
}

impl std::error::Error for Error {}
