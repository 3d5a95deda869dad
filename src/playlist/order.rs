use std::cmp::Ordering;

use crate::config::Tiebreak;
use crate::metadata::TrackEntry;

fn tiebreak_key(entry: &TrackEntry, tiebreak: Tiebreak) -> &str {
    match tiebreak {
        Tiebreak::Title => &entry.title,
        Tiebreak::Filename => &entry.source.name,
    }
}

/// Track number, then tie-break key (case-insensitive, then exact), then
/// selection order.
pub(crate) fn compare(a: &TrackEntry, b: &TrackEntry, tiebreak: Tiebreak) -> Ordering {
    let (ka, kb) = (tiebreak_key(a, tiebreak), tiebreak_key(b, tiebreak));
    a.track_number
        .cmp(&b.track_number)
        .then_with(|| ka.to_lowercase().cmp(&kb.to_lowercase()))
        .then_with(|| ka.cmp(kb))
        .then_with(|| a.input_index.cmp(&b.input_index))
}

/// Sort `entries` into playlist order.
pub fn sort_entries(entries: &mut [TrackEntry], tiebreak: Tiebreak) {
    entries.sort_by(|a, b| compare(a, b, tiebreak));
}
