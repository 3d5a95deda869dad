//! File selection and display helpers.
//!
//! `select` expands user-supplied paths into audio `FileHandle`s and
//! `display_from_fields` formats a resolved track for the "now playing" line.

mod display;
mod model;
mod scan;

pub use display::display_from_fields;
pub use model::FileHandle;
pub use scan::select;
