//! `PlaybackSink` implementation on top of `rodio`.
//!
//! Each acquired resource is one `rodio::Sink` attached to the shared
//! output stream's mixer. Releasing stops it, which frees the decoder.

use std::fs::File;
use std::io::BufReader;

use log::debug;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use crate::metadata::TrackEntry;
use crate::playlist::{PlaybackFault, PlaybackSink};

use super::transport::volume_from_percent;

pub struct RodioSink {
    stream: OutputStream,
    volume: u8,
}

impl RodioSink {
    /// Open the default output device.
    pub fn open(volume: u8) -> Result<Self, PlaybackFault> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped; that garbles the prompt.
        stream.log_on_drop(false);
        Ok(Self { stream, volume })
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Set the volume for the live player (if any) and every later one.
    pub fn set_volume(&mut self, percent: u8, player: Option<&Sink>) {
        self.volume = percent.min(100);
        if let Some(p) = player {
            p.set_volume(volume_from_percent(self.volume));
        }
    }
}

impl PlaybackSink for RodioSink {
    type Resource = Sink;

    fn acquire(&mut self, entry: &TrackEntry) -> Result<Sink, PlaybackFault> {
        let path = &entry.source.path;
        let file = File::open(path).map_err(|source| PlaybackFault::Open {
            path: path.clone(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|source| PlaybackFault::Decode {
            path: path.clone(),
            source,
        })?;

        let player = Sink::connect_new(self.stream.mixer());
        player.set_volume(volume_from_percent(self.volume));
        player.append(source);
        player.play();
        Ok(player)
    }

    fn release(&mut self, resource: Sink) {
        resource.stop();
        debug!("player stopped");
    }

    fn is_finished(&self, resource: &Sink) -> bool {
        resource.empty()
    }
}
