//! Audio output: the rodio-backed playback sink and its transport helpers.

mod sink;
mod transport;

pub use sink::RodioSink;
pub use transport::{fade_out, seek_by, step_volume, toggle_pause};
