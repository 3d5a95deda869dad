//! Line-based control commands read from stdin.

use std::io::{self, BufRead};
use std::sync::mpsc::Sender;
use std::thread;

use log::{debug, warn};

use super::event_loop::RuntimeEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCmd {
    Next,
    Prev,
    /// Zero-based playlist position.
    Jump(usize),
    TogglePause,
    VolumeUp,
    VolumeDown,
    /// Absolute volume in percent.
    Volume(u8),
    /// Seconds, positive or negative.
    SeekBy(i64),
    List,
    Reload,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  n, next            next track
  p, prev            previous track
  j N, jump N        play track N (1-based)
  <space>, pause     pause / resume
  + / -              volume up / down
  vol N              set volume to N (0-100)
  seek S             move S seconds (e.g. seek -10)
  l, list            show the playlist
  r, reload          re-read the selection
  h, help            this text
  q, quit            exit";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<ControlCmd>, String> {
    // A lone space means pause; anything else is trimmed.
    if line.trim_end_matches(['\r', '\n']) == " " {
        return Ok(Some(ControlCmd::TogglePause));
    }

    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    if words.next().is_some() {
        return Err(format!("too many arguments in {:?}", line.trim()));
    }

    let cmd = match (head.to_ascii_lowercase().as_str(), arg) {
        ("n" | "next", None) => ControlCmd::Next,
        ("p" | "prev", None) => ControlCmd::Prev,
        ("j" | "jump", Some(n)) => {
            let n: usize = n.parse().map_err(|_| format!("not a track number: {n}"))?;
            if n == 0 {
                return Err("track numbers start at 1".to_string());
            }
            ControlCmd::Jump(n - 1)
        }
        ("pause" | "play" | "toggle", None) => ControlCmd::TogglePause,
        ("+", None) => ControlCmd::VolumeUp,
        ("-", None) => ControlCmd::VolumeDown,
        ("vol" | "volume", Some(v)) => match v.parse::<u8>() {
            Ok(v) if v <= 100 => ControlCmd::Volume(v),
            _ => return Err(format!("volume must be 0-100, got {v}")),
        },
        ("seek", Some(s)) => {
            let secs: i64 = s
                .trim_start_matches('+')
                .parse()
                .map_err(|_| format!("not a number of seconds: {s}"))?;
            ControlCmd::SeekBy(secs)
        }
        ("l" | "list", None) => ControlCmd::List,
        ("r" | "reload", None) => ControlCmd::Reload,
        ("h" | "help" | "?", None) => ControlCmd::Help,
        ("q" | "quit" | "exit", None) => ControlCmd::Quit,
        _ => return Err(format!("unknown command {:?} (try `help`)", line.trim())),
    };
    Ok(Some(cmd))
}

/// Read commands from stdin on a background thread. End of input is sent as
/// `Quit`.
pub fn spawn_stdin_reader(tx: Sender<RuntimeEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    warn!("stdin: {e}");
                    break;
                }
            };
            match parse(&line) {
                Ok(Some(cmd)) => {
                    if tx.send(RuntimeEvent::Control(cmd)).is_err() {
                        return;
                    }
                }
                Ok(None) => {}
                Err(msg) => warn!("{msg}"),
            }
        }
        debug!("stdin closed");
        let _ = tx.send(RuntimeEvent::Control(ControlCmd::Quit));
    });
}
