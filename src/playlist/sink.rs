use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::metadata::TrackEntry;

/// Errors raised by a playback backend. The sequencer passes them through
/// without retrying or skipping.
#[derive(Debug, Error)]
pub enum PlaybackFault {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("no audio output device: {0}")]
    Output(#[from] rodio::StreamError),
}

/// Backend that turns a track into a playing resource.
pub trait PlaybackSink {
    type Resource;

    /// Start playing `entry`. Called only when no other resource is live.
    fn acquire(&mut self, entry: &TrackEntry) -> Result<Self::Resource, PlaybackFault>;

    /// Stop and tear down `resource`.
    fn release(&mut self, resource: Self::Resource);

    /// Whether `resource` reached its natural end. Pausing does not count.
    fn is_finished(&self, resource: &Self::Resource) -> bool;
}
