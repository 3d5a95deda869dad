use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use log::{debug, error, info, warn};

use crate::audio::{self, RodioSink};
use crate::config::{Settings, UiSettings};
use crate::library::{display_from_fields, select};
use crate::metadata::{LoftyExtractor, Resolver, TrackEntry};
use crate::playlist::{Batch, Sequencer, SequencerState, Transition};

use super::control::{ControlCmd, HELP};

/// How often the loop wakes up to check whether the current track ended.
const TICK: Duration = Duration::from_millis(200);

/// Everything the loop reacts to, funneled through one channel.
#[derive(Debug)]
pub enum RuntimeEvent {
    Control(ControlCmd),
    Resolved(Batch),
}

pub struct EventLoop<'a> {
    pub settings: &'a Settings,
    pub paths: &'a [PathBuf],
    pub sequencer: Sequencer<RodioSink>,
    pub resolver: Resolver<LoftyExtractor>,
    pub tx: Sender<RuntimeEvent>,
    pub rx: Receiver<RuntimeEvent>,
}

impl EventLoop<'_> {
    /// Resolve the selection and play until `quit` or end of input.
    pub fn run(mut self) -> anyhow::Result<()> {
        self.request_batch();

        loop {
            match self.rx.recv_timeout(TICK) {
                Ok(RuntimeEvent::Resolved(batch)) => {
                    let t = self.sequencer.submit_batch(batch);
                    self.report(t);
                }
                Ok(RuntimeEvent::Control(ControlCmd::Quit)) => break,
                Ok(RuntimeEvent::Control(cmd)) => self.handle(cmd),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            let t = self.sequencer.poll_completed();
            self.report(t);
        }

        self.shutdown();
        Ok(())
    }

    /// Select files and resolve them in the background under a new epoch.
    fn request_batch(&mut self) {
        let files = select(self.paths, &self.settings.library);
        let epoch = self.sequencer.begin_batch();
        info!("resolving {} file(s)", files.len());

        let resolver = self.resolver.clone();
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name(format!("resolve-{epoch}"))
            .spawn(move || {
                let entries = resolver.resolve(&files);
                let _ = tx.send(RuntimeEvent::Resolved(Batch { epoch, entries }));
            });
        if let Err(e) = spawned {
            error!("could not start metadata resolution: {e}");
        }
    }

    fn handle(&mut self, cmd: ControlCmd) {
        match cmd {
            ControlCmd::Next => {
                let t = self.sequencer.next();
                self.report(t);
            }
            ControlCmd::Prev => {
                let t = self.sequencer.prev();
                self.report(t);
            }
            ControlCmd::Jump(i) => {
                if i >= self.sequencer.len() {
                    warn!("no track {} (playlist has {})", i + 1, self.sequencer.len());
                    return;
                }
                let t = self.sequencer.jump(i);
                self.report(t);
            }
            ControlCmd::TogglePause => {
                if let Some((_, player)) = self.sequencer.active() {
                    let paused = audio::toggle_pause(player);
                    println!("{}", if paused { "paused" } else { "playing" });
                }
            }
            ControlCmd::VolumeUp | ControlCmd::VolumeDown | ControlCmd::Volume(_) => {
                let step = i16::from(self.settings.audio.volume_step);
                let current = self.sequencer.sink().volume();
                let target = match cmd {
                    ControlCmd::VolumeUp => audio::step_volume(current, step),
                    ControlCmd::VolumeDown => audio::step_volume(current, -step),
                    ControlCmd::Volume(v) => v,
                    _ => current,
                };
                match self.sequencer.active() {
                    Some((sink, player)) => sink.set_volume(target, Some(player)),
                    None => self.sequencer.sink_mut().set_volume(target, None),
                }
                println!("volume {target}%");
            }
            ControlCmd::SeekBy(secs) => {
                if let Some((_, player)) = self.sequencer.active() {
                    match audio::seek_by(player, secs) {
                        Ok(pos) => debug!("seeked to {}s", pos.as_secs()),
                        Err(e) => warn!("seek failed: {e}"),
                    }
                }
            }
            ControlCmd::List => {
                for line in playlist_lines(
                    self.sequencer.entries(),
                    self.sequencer.cursor(),
                    &self.settings.ui,
                ) {
                    println!("{line}");
                }
            }
            ControlCmd::Reload => self.request_batch(),
            ControlCmd::Help => println!("{HELP}"),
            ControlCmd::Quit => {}
        }
    }

    /// Print the now-playing line for a load, or log a playback fault.
    fn report(&self, transition: Transition) {
        match transition {
            Ok(Some(index)) => {
                if let Some(entry) = self.sequencer.current() {
                    println!(
                        "{}",
                        now_playing_line(entry, index, self.sequencer.len(), &self.settings.ui)
                    );
                }
            }
            Ok(None) => {}
            Err(fault) => error!("{fault}"),
        }
    }

    fn shutdown(&mut self) {
        if let SequencerState::Loaded(i) = self.sequencer.state() {
            debug!("stopping at track {}", i + 1);
        }
        if let Some((_, player)) = self.sequencer.active() {
            audio::fade_out(player, self.settings.audio.quit_fade_out_ms);
        }
        self.sequencer.dispose();
        info!("bye");
    }
}

fn cover_summary(entry: &TrackEntry) -> Option<String> {
    entry
        .cover
        .as_ref()
        .map(|c| format!("[cover: {}, {} KiB]", c.mime, c.data.len().div_ceil(1024)))
}

/// `> [2/9] Artist - Title [cover: image/jpeg, 41 KiB]`
pub fn now_playing_line(entry: &TrackEntry, index: usize, len: usize, ui: &UiSettings) -> String {
    let mut line = format!(
        "> [{}/{}] {}",
        index + 1,
        len,
        display_from_fields(entry, &ui.now_playing_fields, &ui.now_playing_separator)
    );
    if let Some(cover) = cover_summary(entry) {
        line.push(' ');
        line.push_str(&cover);
    }
    line
}

/// One line per entry, the current one marked with `*`.
pub fn playlist_lines(
    entries: &[TrackEntry],
    cursor: Option<usize>,
    ui: &UiSettings,
) -> Vec<String> {
    if entries.is_empty() {
        return vec!["(playlist is empty)".to_string()];
    }
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let marker = if cursor == Some(i) { '*' } else { ' ' };
            format!(
                "{marker} {:>3}. {}",
                i + 1,
                display_from_fields(e, &ui.now_playing_fields, &ui.now_playing_separator)
            )
        })
        .collect()
}
