//! Platform setup errors
//!
//! The simulation itself never fails. These describe host pieces that were
//! missing at startup; the caller logs them and skips the dependent feature.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// No global `window` (not running in a browser)
    NoWindow,
    /// Window has no document
    NoDocument,
    /// Required element is absent from the page
    MissingElement {
        /// Element id that was looked up
        id: &'static str,
    },
    /// Element exists but has the wrong type
    WrongElementType {
        id: &'static str,
        expected: &'static str,
    },
    /// Canvas refused to hand out a 2D context
    NoContext2d,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::NoWindow => write!(f, "no global window"),
            SetupError::NoDocument => write!(f, "window has no document"),
            SetupError::MissingElement { id } => write!(f, "element #{} not found", id),
            SetupError::WrongElementType { id, expected } => {
                write!(f, "element #{} is not a {}", id, expected)
            }
            SetupError::NoContext2d => write!(f, "2d canvas context unavailable"),
        }
    }
}

impl std::error::Error for SetupError {}
