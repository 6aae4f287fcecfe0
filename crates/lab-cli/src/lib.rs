//! Library side of the `blood-report` binary: logging setup and rendering.

pub mod logging;
pub mod render;
