//! Layered settings: struct defaults, an optional TOML file and
//! `SPINDLE__*` environment overrides.

mod load;
mod schema;

pub use schema::*;
