use crate::player::event::MediaEvent;

/// The playback primitive the control overlay binds to.
///
/// Decode, rendering, buffering and timing all live behind this trait; the
/// overlay only reads and writes the handful of properties below. Writes are
/// requests: the backend is trusted to honor them or silently no-op, so none
/// of these methods report failure.
pub trait MediaPrimitive {
    fn paused(&self) -> bool;
    fn ended(&self) -> bool;
    fn muted(&self) -> bool;
    /// Output gain in `[0, 1]`.
    fn volume(&self) -> f64;
    /// Current playback offset in seconds.
    fn current_time(&self) -> f64;
    /// Total media length in seconds; `None` until metadata has loaded.
    fn duration(&self) -> Option<f64>;
    /// Whether the backend's own control presentation is active.
    fn builtin_controls(&self) -> bool;

    fn play(&mut self);
    fn pause(&mut self);
    fn set_current_time(&mut self, seconds: f64);
    fn set_volume(&mut self, volume: f64);
    fn set_muted(&mut self, muted: bool);
    fn set_builtin_controls(&mut self, enabled: bool);

    /// Drains all notifications that occurred since the last poll, oldest
    /// first.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}
