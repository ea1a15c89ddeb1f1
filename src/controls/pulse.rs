use std::time::{Duration, Instant};

/// How long the feedback pulse stays on screen.
pub const PULSE_DURATION: Duration = Duration::from_millis(500);

/// Transient fade-out/scale-up pulse shown over the video when playback is
/// toggled by clicking the surface. Holds nothing but its start instant;
/// overlapping triggers simply restart it.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackPulse {
    started: Option<Instant>,
}

impl PlaybackPulse {
    pub fn new() -> Self {
        PlaybackPulse { started: None }
    }

    pub fn trigger(&mut self) {
        self.trigger_at(Instant::now());
    }

    pub fn trigger_at(&mut self, now: Instant) {
        self.started = Some(now);
    }

    /// Fraction of the pulse elapsed at `now`, or `None` once it finished.
    pub fn progress_at(&self, now: Instant) -> Option<f32> {
        let started = self.started?;
        let elapsed = now.saturating_duration_since(started);
        if elapsed >= PULSE_DURATION {
            return None;
        }
        Some(elapsed.as_secs_f32() / PULSE_DURATION.as_secs_f32())
    }

    /// Fades from fully opaque to invisible over the pulse.
    pub fn opacity(progress: f32) -> f32 {
        1.0 - progress
    }

    /// Scales the glyph up from 1x to 2x over the pulse.
    pub fn scale(progress: f32) -> f32 {
        1.0 + progress
    }
}

impl Default for PlaybackPulse {
    fn default() -> Self {
        Self::new()
    }
}
