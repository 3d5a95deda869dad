use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use super::order::compare;
use super::*;
use crate::config::Tiebreak;
use crate::library::FileHandle;
use crate::metadata::TrackEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Acquire(String),
    Release(String),
}

/// Records acquire/release calls; resources are the track titles.
#[derive(Default, Clone)]
struct RecordingSink {
    log: Rc<RefCell<Vec<Event>>>,
    live: Rc<RefCell<usize>>,
    finished: Rc<RefCell<bool>>,
    fail_on: Option<String>,
}

impl RecordingSink {
    fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    fn loads(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Acquire(t) => Some(t),
                Event::Release(_) => None,
            })
            .collect()
    }
}

impl PlaybackSink for RecordingSink {
    type Resource = String;

    fn acquire(&mut self, entry: &TrackEntry) -> Result<String, PlaybackFault> {
        if self.fail_on.as_deref() == Some(entry.title.as_str()) {
            return Err(PlaybackFault::Open {
                path: entry.source.path.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "gone"),
            });
        }
        assert_eq!(*self.live.borrow(), 0, "acquire while a resource is live");
        *self.live.borrow_mut() += 1;
        *self.finished.borrow_mut() = false;
        self.log.borrow_mut().push(Event::Acquire(entry.title.clone()));
        Ok(entry.title.clone())
    }

    fn release(&mut self, resource: String) {
        *self.live.borrow_mut() -= 1;
        self.log.borrow_mut().push(Event::Release(resource));
    }

    fn is_finished(&self, _resource: &String) -> bool {
        *self.finished.borrow()
    }
}

fn entry(title: &str, file: &str, track_number: u32, input_index: usize) -> TrackEntry {
    TrackEntry {
        source: FileHandle::new(format!("/music/{file}")),
        title: title.into(),
        artist: "Unknown Artist".into(),
        album: "Unknown Album".into(),
        track_number,
        cover: None,
        input_index,
    }
}

fn numbered(n: usize) -> Vec<TrackEntry> {
    (0..n)
        .map(|i| entry(&format!("t{i:02}"), &format!("{i}.mp3"), i as u32 + 1, i))
        .collect()
}

fn titles<S: PlaybackSink>(seq: &Sequencer<S>) -> Vec<String> {
    seq.entries().iter().map(|e| e.title.clone()).collect()
}

#[test]
fn submit_sorts_by_track_number_and_loads_first() {
    let sink = RecordingSink::default();
    let mut seq = Sequencer::new(sink.clone(), Tiebreak::Title);

    let loaded = seq
        .submit(vec![
            entry("C", "c.mp3", 2, 0),
            entry("A", "a.mp3", 0, 1),
            entry("B", "b.mp3", 1, 2),
        ])
        .unwrap();

    assert_eq!(loaded, Some(0));
    assert_eq!(titles(&seq), vec!["A", "B", "C"]);
    assert_eq!(seq.state(), SequencerState::Loaded(0));
    assert_eq!(sink.loads(), vec!["A"]);
}

#[test]
fn missing_track_numbers_fall_back_to_title_order() {
    let mut seq = Sequencer::new(RecordingSink::default(), Tiebreak::Title);
    seq.submit(vec![entry("Zeta", "1.mp3", 0, 0), entry("Alpha", "2.mp3", 0, 1)])
        .unwrap();
    assert_eq!(titles(&seq), vec!["Alpha", "Zeta"]);
}

#[test]
fn filename_tiebreak_orders_by_file_name() {
    let mut seq = Sequencer::new(RecordingSink::default(), Tiebreak::Filename);
    seq.submit(vec![entry("Alpha", "b.mp3", 0, 0), entry("Zeta", "a.mp3", 0, 1)])
        .unwrap();
    assert_eq!(titles(&seq), vec!["Zeta", "Alpha"]);
}

#[test]
fn tiebreak_is_case_insensitive_then_exact_then_input_order() {
    let a = entry("apple", "x.mp3", 0, 0);
    let b = entry("Banana", "y.mp3", 0, 1);
    assert!(compare(&a, &b, Tiebreak::Title).is_lt());

    let upper = entry("Echo", "x.mp3", 0, 1);
    let lower = entry("echo", "y.mp3", 0, 0);
    assert!(compare(&upper, &lower, Tiebreak::Title).is_lt());

    let first = entry("Same", "x.mp3", 0, 0);
    let second = entry("Same", "x.mp3", 0, 1);
    assert!(compare(&first, &second, Tiebreak::Title).is_lt());
    assert!(compare(&second, &first, Tiebreak::Title).is_gt());
}

#[test]
fn next_and_prev_wrap_around() {
    let sink = RecordingSink::default();
    let mut seq = Sequencer::new(sink.clone(), Tiebreak::Title);
    seq.submit(numbered(3)).unwrap();

    assert_eq!(seq.prev().unwrap(), Some(2));
    assert_eq!(seq.next().unwrap(), Some(0));
    assert_eq!(seq.next().unwrap(), Some(1));
    assert_eq!(sink.loads(), vec!["t00", "t02", "t00", "t01"]);
}

#[test]
fn completion_advances_and_wraps() {
    let sink = RecordingSink::default();
    let mut seq = Sequencer::new(sink.clone(), Tiebreak::Title);
    seq.submit(numbered(2)).unwrap();

    assert_eq!(seq.poll_completed().unwrap(), None);

    *sink.finished.borrow_mut() = true;
    assert_eq!(seq.poll_completed().unwrap(), Some(1));
    assert_eq!(seq.poll_completed().unwrap(), None);

    assert_eq!(seq.completed().unwrap(), Some(0));
    assert_eq!(sink.loads(), vec!["t00", "t01", "t00"]);
}

#[test]
fn single_track_playlist_reloads_itself() {
    let sink = RecordingSink::default();
    let mut seq = Sequencer::new(sink.clone(), Tiebreak::Title);
    seq.submit(numbered(1)).unwrap();

    assert_eq!(seq.next().unwrap(), Some(0));
    assert_eq!(seq.prev().unwrap(), Some(0));
    assert_eq!(seq.completed().unwrap(), Some(0));
    assert_eq!(sink.loads().len(), 4);
}

#[test]
fn release_always_precedes_acquire() {
    let sink = RecordingSink::default();
    let mut seq = Sequencer::new(sink.clone(), Tiebreak::Title);
    seq.submit(numbered(2)).unwrap();
    seq.next().unwrap();
    seq.completed().unwrap();

    assert_eq!(
        sink.events(),
        vec![
            Event::Acquire("t00".into()),
            Event::Release("t00".into()),
            Event::Acquire("t01".into()),
            Event::Release("t01".into()),
            Event::Acquire("t00".into()),
        ]
    );
}

#[test]
fn empty_submit_is_inert() {
    let sink = RecordingSink::default();
    let mut seq = Sequencer::new(sink.clone(), Tiebreak::Title);
    seq.submit(numbered(2)).unwrap();

    assert_eq!(seq.submit(Vec::new()).unwrap(), None);
    assert_eq!(seq.state(), SequencerState::Empty);
    assert!(!seq.is_live());

    assert_eq!(seq.next().unwrap(), None);
    assert_eq!(seq.prev().unwrap(), None);
    assert_eq!(seq.completed().unwrap(), None);
    assert_eq!(seq.jump(0).unwrap(), None);
    assert_eq!(seq.poll_completed().unwrap(), None);

    assert_eq!(sink.loads(), vec!["t00"]);
    assert_eq!(*sink.live.borrow(), 0);
}

#[test]
fn fresh_sequencer_ignores_navigation() {
    let sink = RecordingSink::default();
    let mut seq = Sequencer::new(sink.clone(), Tiebreak::Title);
    assert_eq!(seq.state(), SequencerState::Empty);
    assert_eq!(seq.next().unwrap(), None);
    assert!(seq.current().is_none());
    assert!(sink.events().is_empty());
}

#[test]
fn jump_moves_cursor_and_ignores_out_of_range() {
    let sink = RecordingSink::default();
    let mut seq = Sequencer::new(sink.clone(), Tiebreak::Title);
    seq.submit(numbered(4)).unwrap();

    assert_eq!(seq.jump(2).unwrap(), Some(2));
    assert_eq!(seq.current().map(|e| e.title.as_str()), Some("t02"));
    assert_eq!(seq.jump(4).unwrap(), None);
    assert_eq!(seq.cursor(), Some(2));
}

#[test]
fn stale_batches_are_discarded() {
    let sink = RecordingSink::default();
    let mut seq = Sequencer::new(sink.clone(), Tiebreak::Title);

    let old = seq.begin_batch();
    let new = seq.begin_batch();
    assert!(new > old);

    // The newer batch lands first, then the older one arrives late.
    seq.submit_batch(Batch {
        epoch: new,
        entries: vec![entry("New", "n.mp3", 1, 0)],
    })
    .unwrap();
    let late = seq
        .submit_batch(Batch {
            epoch: old,
            entries: vec![entry("Old", "o.mp3", 0, 0)],
        })
        .unwrap();

    assert_eq!(late, None);
    assert_eq!(titles(&seq), vec!["New"]);
    assert_eq!(sink.loads(), vec!["New"]);
}

#[test]
fn outstanding_batch_is_discarded_after_direct_submit() {
    let mut seq = Sequencer::new(RecordingSink::default(), Tiebreak::Title);
    let pending = seq.begin_batch();
    seq.submit(numbered(2)).unwrap();

    seq.submit_batch(Batch {
        epoch: pending,
        entries: numbered(5),
    })
    .unwrap();
    assert_eq!(seq.len(), 2);
}

#[test]
fn playback_fault_moves_cursor_without_retry() {
    let sink = RecordingSink {
        fail_on: Some("t01".into()),
        ..RecordingSink::default()
    };
    let mut seq = Sequencer::new(sink.clone(), Tiebreak::Title);
    seq.submit(numbered(3)).unwrap();

    assert!(seq.next().is_err());
    assert_eq!(seq.cursor(), Some(1));
    assert!(!seq.is_live());
    assert_eq!(sink.loads(), vec!["t00"]);

    // Caller decides to skip.
    assert_eq!(seq.next().unwrap(), Some(2));
}

#[test]
fn dispose_and_drop_release_the_live_resource() {
    let sink = RecordingSink::default();
    let mut seq = Sequencer::new(sink.clone(), Tiebreak::Title);
    seq.submit(numbered(2)).unwrap();
    seq.dispose();
    assert_eq!(*sink.live.borrow(), 0);
    assert_eq!(seq.state(), SequencerState::Empty);

    seq.submit(numbered(2)).unwrap();
    assert_eq!(*sink.live.borrow(), 1);
    drop(seq);
    assert_eq!(*sink.live.borrow(), 0);
}

proptest::proptest! {
    #[test]
    fn next_n_times_returns_to_start(len in 1usize..40, start in 0usize..40) {
        let mut seq = Sequencer::new(RecordingSink::default(), Tiebreak::Title);
        seq.submit(numbered(len)).unwrap();
        let start = start % len;
        seq.jump(start).unwrap();

        for _ in 0..len {
            seq.next().unwrap();
        }
        proptest::prop_assert_eq!(seq.cursor(), Some(start));

        for _ in 0..len {
            seq.prev().unwrap();
        }
        proptest::prop_assert_eq!(seq.cursor(), Some(start));
    }

    #[test]
    fn next_then_prev_restores_cursor(len in 1usize..40, start in 0usize..40) {
        let mut seq = Sequencer::new(RecordingSink::default(), Tiebreak::Title);
        seq.submit(numbered(len)).unwrap();
        seq.jump(start % len).unwrap();

        let before = seq.cursor();
        seq.next().unwrap();
        seq.prev().unwrap();
        proptest::prop_assert_eq!(seq.cursor(), before);
    }

    #[test]
    fn submit_always_sorts_and_resets(
        numbers in proptest::collection::vec(0u32..5, 1..30),
    ) {
        let entries: Vec<TrackEntry> = numbers
            .iter()
            .enumerate()
            .map(|(i, n)| entry(&format!("song {}", (i * 7) % 11), &format!("{i}.mp3"), *n, i))
            .collect();

        let mut seq = Sequencer::new(RecordingSink::default(), Tiebreak::Title);
        seq.submit(numbered(3)).unwrap();
        seq.next().unwrap();
        seq.submit(entries).unwrap();

        proptest::prop_assert_eq!(seq.cursor(), Some(0));
        for pair in seq.entries().windows(2) {
            proptest::prop_assert!(compare(&pair[0], &pair[1], Tiebreak::Title).is_le());
        }
    }
}
