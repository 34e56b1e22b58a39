//! Audio sink capability and sound-cue dispatch
//!
//! The simulation emits events; `dispatch_events` maps the audible ones to
//! named cues and fires them at whatever `AudioSink` the shell provides.

use crate::resources::{Resources, SoundHandle};
use crate::sim::GameEvent;

/// Fire-and-forget sound output
pub trait AudioSink {
    fn play(&mut self, sound: SoundHandle, looped: bool);
}

/// Sink that swallows everything; used headless and in tests of the shell
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _sound: SoundHandle, _looped: bool) {}
}

/// Sink that records every play call for assertions
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub played: Vec<(SoundHandle, bool)>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, sound: SoundHandle, looped: bool) {
        self.played.push((sound, looped));
    }
}

fn cue_key(event: &GameEvent) -> Option<&'static str> {
    match event {
        GameEvent::BrickDestroyed => Some("bleep"),
        GameEvent::SolidBrickHit => Some("solid"),
        GameEvent::PowerupCaught(_) => Some("powerup"),
        _ => None,
    }
}

/// Play the cue for each audible event; silent events and unregistered
/// cues are skipped
pub fn dispatch_events(events: &[GameEvent], resources: &Resources, sink: &mut impl AudioSink) {
    for event in events {
        if let Some(key) = cue_key(event) {
            if let Some(sound) = resources.sound(key) {
                sink.play(sound, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PowerupKind;

    #[test]
    fn test_audible_events_map_to_cues() {
        let resources = Resources::with_defaults();
        let mut sink = RecordingAudio::default();

        let events = [
            GameEvent::BrickDestroyed,
            GameEvent::SolidBrickHit,
            GameEvent::PowerupCaught(PowerupKind::Speed),
        ];
        dispatch_events(&events, &resources, &mut sink);

        let expected: Vec<_> = ["bleep", "solid", "powerup"]
            .iter()
            .filter_map(|key| resources.sound(key))
            .map(|sound| (sound, false))
            .collect();
        assert_eq!(sink.played, expected);
    }

    #[test]
    fn test_silent_events_play_nothing() {
        let resources = Resources::with_defaults();
        let mut sink = RecordingAudio::default();

        let events = [
            GameEvent::WallBounce,
            GameEvent::PaddleHit,
            GameEvent::BallLost,
            GameEvent::LevelCleared,
            GameEvent::PowerupSpawned(PowerupKind::Sticky),
            GameEvent::PowerupExpired(PowerupKind::Sticky),
        ];
        dispatch_events(&events, &resources, &mut sink);

        assert!(sink.played.is_empty());
    }

    #[test]
    fn test_unregistered_cue_is_skipped() {
        // Empty registry: audible events resolve to no sound
        let resources = Resources::new();
        let mut sink = RecordingAudio::default();

        dispatch_events(&[GameEvent::BrickDestroyed], &resources, &mut sink);
        assert!(sink.played.is_empty());
    }
}
