//! Metadata resolution: turn a selection of files into `TrackEntry` records.
//!
//! Tag reading is behind [`TagExtractor`]; [`Resolver`] fans the batch out
//! over worker threads and substitutes defaults for anything that fails.

mod extract;
mod model;
mod resolve;

pub use extract::{ExtractionFailure, LoftyExtractor, TagExtractor};
pub use model::{CoverImage, TagFields, TrackEntry};
pub use resolve::Resolver;
