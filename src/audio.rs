/// Fire-and-forget sound cues.
///
/// A sink may reject a cue; `dispatch` logs the failure and moves on so
/// playback never affects the game.

use std::io::Write;

use crate::entities::GameEvent;
use crate::error::{GameError, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sound {
    Shoot,
    Explosion,
    BossHit,
    BossSpawn,
}

impl Sound {
    pub fn for_event(event: &GameEvent) -> Option<Sound> {
        match event {
            GameEvent::Shoot => Some(Sound::Shoot),
            GameEvent::EnemyKilled { .. } | GameEvent::BossDefeated { .. } => {
                Some(Sound::Explosion)
            }
            GameEvent::BossHit { .. } => Some(Sound::BossHit),
            GameEvent::BossSpawn { .. } => Some(Sound::BossSpawn),
            _ => None,
        }
    }
}

pub trait AudioSink {
    fn play(&mut self, sound: Sound) -> Result<()>;
}

/// Plays nothing.
pub struct Muted;

impl AudioSink for Muted {
    fn play(&mut self, _sound: Sound) -> Result<()> {
        Ok(())
    }
}

/// Rings the terminal bell for the loud cues.  Shots and boss hits are
/// too frequent to ring for.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        TerminalBell { out }
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, sound: Sound) -> Result<()> {
        match sound {
            Sound::Explosion | Sound::BossSpawn => {
                self.out
                    .write_all(b"\x07")
                    .and_then(|_| self.out.flush())
                    .map_err(|e| GameError::Audio(e.to_string()))
            }
            Sound::Shoot | Sound::BossHit => Ok(()),
        }
    }
}

/// Play the cue for every event; failures are logged and ignored.
pub fn dispatch(sink: &mut dyn AudioSink, events: &[GameEvent]) {
    for sound in events.iter().filter_map(Sound::for_event) {
        if let Err(err) = sink.play(sound) {
            tracing::debug!(?sound, %err, "audio playback rejected");
        }
    }
}
