use log::{debug, info};

use crate::config::Tiebreak;
use crate::metadata::TrackEntry;

use super::order::sort_entries;
use super::sink::{PlaybackFault, PlaybackSink};

/// Token identifying one submission. Later submissions get larger epochs.
pub type Epoch = u64;

/// A resolved selection, tagged with the epoch it was requested under.
#[derive(Debug)]
pub struct Batch {
    pub epoch: Epoch,
    pub entries: Vec<TrackEntry>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SequencerState {
    Empty,
    /// Holds the cursor.
    Loaded(usize),
}

/// Result of a transition: the index that was loaded, `None` when nothing was.
pub type Transition = Result<Option<usize>, PlaybackFault>;

/// Ordered playlist, cursor and the one live playback resource.
///
/// Every transition that lands on an entry releases the previous resource
/// before acquiring the next. Navigation while empty is a no-op.
pub struct Sequencer<S: PlaybackSink> {
    sink: S,
    tiebreak: Tiebreak,
    entries: Vec<TrackEntry>,
    cursor: Option<usize>,
    live: Option<S::Resource>,
    epoch: Epoch,
}

impl<S: PlaybackSink> Sequencer<S> {
    pub fn new(sink: S, tiebreak: Tiebreak) -> Self {
        Self {
            sink,
            tiebreak,
            entries: Vec::new(),
            cursor: None,
            live: None,
            epoch: 0,
        }
    }

    pub fn state(&self) -> SequencerState {
        match self.cursor {
            Some(i) => SequencerState::Loaded(i),
            None => SequencerState::Empty,
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&TrackEntry> {
        self.cursor.and_then(|i| self.entries.get(i))
    }

    pub fn entries(&self) -> &[TrackEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_current(&self, epoch: Epoch) -> bool {
        epoch == self.epoch
    }

    /// Whether a playback resource is currently held.
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// The sink together with the live resource, for transport controls.
    pub fn active(&mut self) -> Option<(&mut S, &S::Resource)> {
        let live = self.live.as_ref()?;
        Some((&mut self.sink, live))
    }

    /// Start a new submission. Batches tagged with any earlier epoch are
    /// discarded from now on.
    pub fn begin_batch(&mut self) -> Epoch {
        self.epoch += 1;
        debug!("starting batch epoch {}", self.epoch);
        self.epoch
    }

    /// Replace the playlist with `entries` right away.
    pub fn submit(&mut self, entries: Vec<TrackEntry>) -> Transition {
        let epoch = self.begin_batch();
        self.submit_batch(Batch { epoch, entries })
    }

    /// Replace the playlist with a resolved batch, unless a newer submission
    /// has started since it was requested.
    pub fn submit_batch(&mut self, batch: Batch) -> Transition {
        if !self.is_current(batch.epoch) {
            debug!(
                "discarding stale batch epoch {} ({} entries), current is {}",
                batch.epoch,
                batch.entries.len(),
                self.epoch
            );
            return Ok(None);
        }

        self.release_live();
        let mut entries = batch.entries;
        sort_entries(&mut entries, self.tiebreak);
        self.entries = entries;

        if self.entries.is_empty() {
            self.cursor = None;
            info!("empty selection, nothing to play");
            return Ok(None);
        }

        info!("playlist ready with {} track(s)", self.entries.len());
        self.load(0)
    }

    pub fn next(&mut self) -> Transition {
        match self.cursor {
            Some(i) => self.load((i + 1) % self.entries.len()),
            None => Ok(None),
        }
    }

    pub fn prev(&mut self) -> Transition {
        match self.cursor {
            Some(i) => {
                let n = self.entries.len();
                self.load((i + n - 1) % n)
            }
            None => Ok(None),
        }
    }

    /// Move to `index`. Out of range or empty is a no-op.
    pub fn jump(&mut self, index: usize) -> Transition {
        if self.cursor.is_none() || index >= self.entries.len() {
            return Ok(None);
        }
        self.load(index)
    }

    /// The current track finished on its own; advance and wrap.
    pub fn completed(&mut self) -> Transition {
        if let Some(entry) = self.current() {
            debug!("finished {}", entry.title);
        }
        self.next()
    }

    /// Call [`Sequencer::completed`] if the live resource reached its end.
    pub fn poll_completed(&mut self) -> Transition {
        let finished = self
            .live
            .as_ref()
            .is_some_and(|r| self.sink.is_finished(r));
        if finished {
            self.completed()
        } else {
            Ok(None)
        }
    }

    /// Release the live resource and forget the playlist.
    pub fn dispose(&mut self) {
        self.release_live();
        self.entries.clear();
        self.cursor = None;
    }

    fn release_live(&mut self) {
        if let Some(resource) = self.live.take() {
            debug!("releasing playback resource");
            self.sink.release(resource);
        }
    }

    fn load(&mut self, index: usize) -> Transition {
        self.cursor = Some(index);
        self.release_live();

        let entry = &self.entries[index];
        info!(
            "loading track {}/{}: {} - {}",
            index + 1,
            self.entries.len(),
            entry.artist,
            entry.title
        );
        self.live = Some(self.sink.acquire(entry)?);
        Ok(Some(index))
    }
}

impl<S: PlaybackSink> Drop for Sequencer<S> {
    fn drop(&mut self) {
        self.release_live();
    }
}
