use std::env;

use log::LevelFilter;

use crate::config::Settings;

/// Install the colog logger. Until settings are applied everything at
/// `info` and above is shown; `RUST_LOG` replaces both.
pub fn init() {
    let mut clog = colog::default_builder();
    let from_env = env::var("RUST_LOG").ok();
    match &from_env {
        Some(filters) => {
            clog.parse_filters(filters);
        }
        None => {
            clog.filter(None, LevelFilter::Trace);
        }
    }
    clog.init();
    if from_env.is_none() {
        log::set_max_level(LevelFilter::Info);
    }
}

/// Apply `log.level` from settings unless `RUST_LOG` is set.
pub fn apply(settings: &Settings) {
    if env::var_os("RUST_LOG").is_some() {
        return;
    }
    if let Some(level) = settings.log_level() {
        log::set_max_level(level);
    }
}
