use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::Context;
use log::info;

use crate::audio::RodioSink;
use crate::metadata::{LoftyExtractor, Resolver};
use crate::playlist::Sequencer;

mod control;
mod event_loop;
mod logging;
mod settings;

use event_loop::{EventLoop, RuntimeEvent};

pub fn run() -> anyhow::Result<()> {
    logging::init();
    let settings = settings::load_settings();
    logging::apply(&settings);

    let mut paths: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        paths.push(env::current_dir().context("no paths given and no current directory")?);
    }

    let sink = RodioSink::open(settings.audio.volume).context("opening audio output")?;
    let sequencer = Sequencer::new(sink, settings.playlist.tiebreak);
    let resolver = Resolver::new(LoftyExtractor, settings.metadata.clone());

    let (tx, rx) = mpsc::channel::<RuntimeEvent>();
    control::spawn_stdin_reader(tx.clone());
    info!("type `help` for commands");

    EventLoop {
        settings: &settings,
        paths: &paths,
        sequencer,
        resolver,
        tx,
        rx,
    }
    .run()
}
