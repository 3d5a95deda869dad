//! Transport controls for the live player: pause, seek, fades.

use std::thread;
use std::time::Duration;

use rodio::Sink;
use rodio::source::SeekError;

/// Map a 0-100 percentage onto rodio's linear gain.
pub fn volume_from_percent(percent: u8) -> f32 {
    f32::from(percent.min(100)) / 100.0
}

/// Apply a signed change to a percentage, clamped to 0..=100.
pub fn step_volume(current: u8, delta: i16) -> u8 {
    (i16::from(current) + delta).clamp(0, 100) as u8
}

/// Position after moving `secs` from `pos`, never before the start.
pub fn seek_target(pos: Duration, secs: i64) -> Duration {
    let magnitude = Duration::from_secs(secs.unsigned_abs());
    if secs >= 0 {
        pos + magnitude
    } else {
        pos.saturating_sub(magnitude)
    }
}

/// Pause a playing player or resume a paused one. Returns `true` when the
/// player is now paused.
pub fn toggle_pause(player: &Sink) -> bool {
    if player.is_paused() {
        player.play();
        false
    } else {
        player.pause();
        true
    }
}

/// Move the playhead by `secs` (negative goes back). Returns the new position.
pub fn seek_by(player: &Sink, secs: i64) -> Result<Duration, SeekError> {
    let target = seek_target(player.get_pos(), secs);
    player.try_seek(target)?;
    Ok(target)
}

/// Ramp the volume down to silence over `fade_out_ms`, blocking the caller.
pub fn fade_out(player: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 || player.is_paused() {
        player.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    let start = player.volume();
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        player.set_volume(start * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    player.set_volume(0.0);
}
