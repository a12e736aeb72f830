//! The module keeping track of the possible errors.
//!
//! The simulation itself cannot fail; only loading and saving settings can.

use std::error;
use std::fmt;
use std::io;

/// All possible error states of the settings layer.
#[derive(Debug)]
pub enum Error {
    /// The settings file could not be read or written.
    Io(io::Error),

    /// The settings file is not valid JSON for [`crate::Settings`].
    Parse(serde_json::Error),
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        use Error::*;

        match self {
            Io(err) => Some(err),
            Parse(err) => Some(err),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;

        match self {
            Io(err) => write!(f, "settings i/o failed: {err}"),
            Parse(err) => write!(f, "settings are not valid: {err}"),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err)
    }
}
