use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::config::MetadataSettings;
use crate::library::FileHandle;

use super::extract::{ExtractionFailure, TagExtractor};
use super::model::{TagFields, TrackEntry};

type Outcome = (usize, Result<TagFields, ExtractionFailure>);

/// Resolves a batch of files into `TrackEntry` records.
///
/// Every file gets its own worker thread; results are slotted back by input
/// index, so completion order never matters. A failed, panicked or
/// timed-out extraction degrades that one entry to defaults.
pub struct Resolver<E: TagExtractor> {
    extractor: Arc<E>,
    settings: MetadataSettings,
}

impl<E: TagExtractor> Clone for Resolver<E> {
    fn clone(&self) -> Self {
        Self {
            extractor: Arc::clone(&self.extractor),
            settings: self.settings.clone(),
        }
    }
}

impl<E: TagExtractor> Resolver<E> {
    pub fn new(extractor: E, settings: MetadataSettings) -> Self {
        Self {
            extractor: Arc::new(extractor),
            settings,
        }
    }

    fn timeout(&self) -> Option<Duration> {
        match self.settings.extraction_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    /// Resolve `files` into entries, returned in input order.
    pub fn resolve(&self, files: &[FileHandle]) -> Vec<TrackEntry> {
        let (tx, rx) = mpsc::channel::<Outcome>();

        for (i, file) in files.iter().enumerate() {
            let tx = tx.clone();
            let extractor = Arc::clone(&self.extractor);
            let file = file.clone();
            let spawned = thread::Builder::new()
                .name(format!("tags-{i}"))
                .spawn(move || {
                    let outcome = extractor.extract(&file);
                    // The receiver is gone once the batch timed out.
                    let _ = tx.send((i, outcome));
                });
            if let Err(e) = spawned {
                warn!("could not start tag reader for {}: {e}", files[i].path.display());
            }
        }
        drop(tx);

        let mut slots: Vec<Option<Result<TagFields, ExtractionFailure>>> =
            (0..files.len()).map(|_| None).collect();
        let mut pending = files.len();
        let deadline = self.timeout().map(|t| Instant::now() + t);

        while pending > 0 {
            let received = match deadline {
                Some(d) => rx.recv_timeout(d.saturating_duration_since(Instant::now())),
                None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };
            match received {
                Ok((i, outcome)) => {
                    if slots[i].is_none() {
                        pending -= 1;
                    }
                    slots[i] = Some(outcome);
                }
                Err(RecvTimeoutError::Timeout) => {
                    warn!("tag reading timed out with {pending} file(s) outstanding");
                    break;
                }
                // Every sender is dropped: remaining workers panicked or never started.
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        files
            .iter()
            .zip(slots)
            .enumerate()
            .map(|(i, (file, slot))| {
                let outcome = slot.unwrap_or_else(|| {
                    Err(if deadline.is_some_and(|d| Instant::now() >= d) {
                        ExtractionFailure::TimedOut(file.path.clone())
                    } else {
                        ExtractionFailure::WorkerLost(file.path.clone())
                    })
                });
                self.entry_for(file.clone(), i, outcome)
            })
            .collect()
    }

    fn entry_for(
        &self,
        file: FileHandle,
        index: usize,
        outcome: Result<TagFields, ExtractionFailure>,
    ) -> TrackEntry {
        match outcome {
            Ok(tags) => TrackEntry::from_tags(file, index, tags, &self.settings),
            Err(e) => {
                warn!("{e}; using defaults");
                debug!("fallback entry for {}", file.name);
                TrackEntry::fallback(file, index, &self.settings)
            }
        }
    }
}
