//! Playlist ordering and the sequencer that walks it.
//!
//! The sequencer owns the cursor and the single live playback resource.
//! Everything observable happens through [`PlaybackSink`].

mod order;
mod sequencer;
mod sink;

pub use order::sort_entries;
pub use sequencer::{Batch, Epoch, Sequencer, SequencerState, Transition};
pub use sink::{PlaybackFault, PlaybackSink};

#[cfg(test)]
mod tests;
