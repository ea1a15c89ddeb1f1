use tracing::debug;

use crate::player::event::MediaEvent;
use crate::player::primitive::MediaPrimitive;
use crate::types::surface::{ControlSurface, PlayIcon, SeekTooltip, VolumeIcon};
use crate::types::time::format_time;

/// Glue between one playback primitive and the custom control surface.
///
/// Every operation is a direct synchronous property read/write; the
/// primitive either honors a request or silently no-ops, so nothing here
/// returns a `Result`. User interactions call the public operations, and the
/// primitive's notifications are fed back through [`handle_event`], which
/// keeps the surface in sync in the other direction.
///
/// [`handle_event`]: PlaybackController::handle_event
pub struct PlaybackController<P: MediaPrimitive> {
    pub primitive: P,
    pub surface: ControlSurface,
    /// Volume to restore on unmute. Written exactly once per mute
    /// transition, consumed exactly once per unmute.
    last_volume: f64,
    /// Provisional seek target computed from pointer hover, committed by
    /// `skip_ahead` and cleared afterwards.
    pending_seek: Option<u64>,
}

impl<P: MediaPrimitive> PlaybackController<P> {
    /// Binds the overlay to `primitive`. When the capability probe
    /// succeeded, the backend's built-in control presentation is suppressed
    /// and the custom surface revealed; otherwise nothing is attached and
    /// the backend keeps its own controls.
    pub fn new(mut primitive: P, supported: bool) -> Self {
        let mut surface = ControlSurface::new();
        if supported {
            primitive.set_builtin_controls(false);
            surface.visible = true;
        } else {
            debug!("capability probe failed; leaving backend controls active");
        }
        let mut controller = PlaybackController {
            primitive,
            surface,
            last_volume: 1.0,
            pending_seek: None,
        };
        if controller.surface.visible {
            controller.surface.volume_slider = controller.primitive.volume();
            controller.on_volume_change();
        }
        controller
    }

    /// Starts playback when paused or ended, pauses otherwise. The icon and
    /// label update arrives via the resulting play/pause notification, not
    /// here.
    pub fn toggle_play(&mut self) {
        if self.primitive.paused() || self.primitive.ended() {
            self.primitive.play();
        } else {
            self.primitive.pause();
        }
    }

    /// Computes the seek preview for a pointer hovering the seek control.
    /// `offset_x` is the pointer position within the control,
    /// `surface_offset_x` the same pointer measured from the left edge of
    /// the video surface (where the tooltip is anchored).
    pub fn update_seek_tooltip(&mut self, offset_x: f32, control_width: f32, surface_offset_x: f32) {
        if control_width <= 0.0 {
            return;
        }
        let fraction = (offset_x / control_width).clamp(0.0, 1.0) as f64;
        let skip_to = (fraction * self.surface.seek.max as f64).round() as u64;
        self.pending_seek = Some(skip_to);
        self.surface.seek_tooltip = Some(SeekTooltip {
            text: format_time(skip_to).display(),
            offset_x: surface_offset_x,
        });
    }

    /// Drops the hover preview along with its pending target, e.g. when the
    /// pointer leaves the seek control.
    pub fn clear_seek_tooltip(&mut self) {
        self.pending_seek = None;
        self.surface.seek_tooltip = None;
    }

    /// Commits a seek to the pending hover target, falling back to the seek
    /// control's own value when the control was driven without a pointer
    /// (keyboard input). Position, seek control and progress indicator all
    /// end up equal.
    pub fn skip_ahead(&mut self) {
        let target = self.pending_seek.take().unwrap_or(self.surface.seek.value);
        self.primitive.set_current_time(target as f64);
        self.surface.seek.value = target;
        self.surface.progress.value = target;
        self.surface.seek_tooltip = None;
    }

    /// Applies a volume slider change. An adjusted volume always implies
    /// unmuted.
    pub fn update_volume(&mut self, volume: f64) {
        if self.primitive.muted() {
            self.primitive.set_muted(false);
        }
        self.primitive.set_volume(volume);
        self.surface.volume_slider = volume;
    }

    /// Inverts the muted flag. Muting remembers the current volume and
    /// drives the displayed slider to zero; unmuting restores the slider
    /// from the remembered value.
    pub fn toggle_mute(&mut self) {
        if self.primitive.muted() {
            self.primitive.set_muted(false);
            self.surface.volume_slider = self.last_volume;
        } else {
            self.last_volume = self.primitive.volume();
            self.primitive.set_muted(true);
            self.surface.volume_slider = 0.0;
        }
    }

    /// Dispatches one primitive notification to its handler. Handlers for
    /// the same notification run in the order they appear here. A controller
    /// whose surface was never revealed attaches nothing.
    pub fn handle_event(&mut self, event: MediaEvent) {
        if !self.surface.visible {
            return;
        }
        match event {
            MediaEvent::Play => self.on_play(),
            MediaEvent::Pause => self.on_pause(),
            MediaEvent::MetadataLoaded => self.on_metadata_loaded(),
            MediaEvent::TimeUpdate => self.on_time_update(),
            MediaEvent::VolumeChange => self.on_volume_change(),
        }
    }

    fn on_play(&mut self) {
        self.surface.play_icon = PlayIcon::Pause;
        self.surface.play_label = "Pause (k)".to_string();
    }

    fn on_pause(&mut self) {
        self.surface.play_icon = PlayIcon::Play;
        self.surface.play_label = "Play (k)".to_string();
    }

    fn on_metadata_loaded(&mut self) {
        let Some(duration) = self.primitive.duration() else {
            return;
        };
        let whole = duration.round().max(0.0) as u64;
        self.surface.seek.max = whole;
        self.surface.progress.max = whole;
        let formatted = format_time(whole);
        self.surface.duration_text = formatted.display();
        self.surface.duration_machine = formatted.machine();
    }

    fn on_time_update(&mut self) {
        let position = self.primitive.current_time().max(0.0).floor() as u64;
        let formatted = format_time(position);
        self.surface.elapsed_machine = formatted.machine();
        self.surface.elapsed = formatted;
        self.surface.seek.value = position;
        self.surface.progress.value = position;
    }

    fn on_volume_change(&mut self) {
        let volume = self.primitive.volume();
        let muted = self.primitive.muted();
        self.surface.volume_icon = if muted || volume == 0.0 {
            VolumeIcon::Muted
        } else if volume <= 0.5 {
            VolumeIcon::Low
        } else {
            VolumeIcon::High
        };
        self.surface.mute_label = if muted {
            "Unmute (m)".to_string()
        } else {
            "Mute (m)".to_string()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::event::MediaEvent;

    struct FakePrimitive {
        paused: bool,
        ended: bool,
        muted: bool,
        volume: f64,
        current_time: f64,
        duration: Option<f64>,
        builtin_controls: bool,
        events: Vec<MediaEvent>,
    }

    impl FakePrimitive {
        fn new() -> Self {
            FakePrimitive {
                paused: true,
                ended: false,
                muted: false,
                volume: 1.0,
                current_time: 0.0,
                duration: None,
                builtin_controls: true,
                events: Vec::new(),
            }
        }
    }

    impl MediaPrimitive for FakePrimitive {
        fn paused(&self) -> bool {
            self.paused
        }

        fn ended(&self) -> bool {
            self.ended
        }

        fn muted(&self) -> bool {
            self.muted
        }

        fn volume(&self) -> f64 {
            self.volume
        }

        fn current_time(&self) -> f64 {
            self.current_time
        }

        fn duration(&self) -> Option<f64> {
            self.duration
        }

        fn builtin_controls(&self) -> bool {
            self.builtin_controls
        }

        fn play(&mut self) {
            if self.ended {
                // Replay from the start, as the backend does.
                self.current_time = 0.0;
                self.ended = false;
            }
            self.paused = false;
            self.events.push(MediaEvent::Play);
        }

        fn pause(&mut self) {
            self.paused = true;
            self.events.push(MediaEvent::Pause);
        }

        fn set_current_time(&mut self, seconds: f64) {
            self.current_time = seconds;
            self.ended = false;
            self.events.push(MediaEvent::TimeUpdate);
        }

        fn set_volume(&mut self, volume: f64) {
            self.volume = volume.clamp(0.0, 1.0);
            self.events.push(MediaEvent::VolumeChange);
        }

        fn set_muted(&mut self, muted: bool) {
            if self.muted != muted {
                self.muted = muted;
                self.events.push(MediaEvent::VolumeChange);
            }
        }

        fn set_builtin_controls(&mut self, enabled: bool) {
            self.builtin_controls = enabled;
        }

        fn poll_events(&mut self) -> Vec<MediaEvent> {
            std::mem::take(&mut self.events)
        }
    }

    fn controller() -> PlaybackController<FakePrimitive> {
        PlaybackController::new(FakePrimitive::new(), true)
    }

    /// Drains the primitive's notifications into the controller, the way the
    /// app shell does once per frame.
    fn pump(controller: &mut PlaybackController<FakePrimitive>) {
        let events = controller.primitive.poll_events();
        for event in events {
            controller.handle_event(event);
        }
    }

    #[test]
    fn test_capability_success_reveals_custom_controls() {
        let controller = controller();
        assert!(!controller.primitive.builtin_controls());
        assert!(controller.surface.visible);
    }

    #[test]
    fn test_capability_failure_leaves_backend_controls() {
        let mut controller = PlaybackController::new(FakePrimitive::new(), false);
        assert!(controller.primitive.builtin_controls());
        assert!(!controller.surface.visible);

        // No handlers attached: notifications leave the surface untouched.
        let before = controller.surface.clone();
        controller.handle_event(MediaEvent::Play);
        controller.handle_event(MediaEvent::VolumeChange);
        assert_eq!(controller.surface, before);
    }

    #[test]
    fn test_toggle_play_starts_and_reflects() {
        let mut controller = controller();
        controller.toggle_play();
        pump(&mut controller);
        assert!(!controller.primitive.paused());
        assert_eq!(controller.surface.play_icon, PlayIcon::Pause);
        assert_eq!(controller.surface.play_label, "Pause (k)");

        controller.toggle_play();
        pump(&mut controller);
        assert!(controller.primitive.paused());
        assert_eq!(controller.surface.play_icon, PlayIcon::Play);
        assert_eq!(controller.surface.play_label, "Play (k)");
    }

    #[test]
    fn test_toggle_play_restarts_after_end() {
        let mut controller = controller();
        controller.primitive.paused = false;
        controller.primitive.ended = true;
        controller.toggle_play();
        assert!(!controller.primitive.paused());
        assert!(!controller.primitive.ended());
    }

    #[test]
    fn test_metadata_sets_duration_on_both_sliders() {
        let mut controller = controller();
        controller.primitive.duration = Some(65.4);
        controller.handle_event(MediaEvent::MetadataLoaded);
        assert_eq!(controller.surface.seek.max, 65);
        assert_eq!(controller.surface.progress.max, 65);
        assert_eq!(controller.surface.duration_text, "01:05");
        assert_eq!(controller.surface.duration_machine, "01m 05s");
    }

    #[test]
    fn test_time_update_keeps_sliders_in_lockstep() {
        let mut controller = controller();
        controller.primitive.duration = Some(100.0);
        controller.handle_event(MediaEvent::MetadataLoaded);

        for position in [0.0, 1.2, 59.9, 73.5, 100.0] {
            controller.primitive.current_time = position;
            controller.handle_event(MediaEvent::TimeUpdate);
            let floored = position.floor() as u64;
            assert_eq!(controller.surface.seek.value, floored);
            assert_eq!(controller.surface.progress.value, floored);
        }
        assert_eq!(controller.surface.elapsed.display(), "01:40");
        assert_eq!(controller.surface.elapsed_machine, "01m 40s");
    }

    #[test]
    fn test_seek_tooltip_computes_pending_target() {
        let mut controller = controller();
        controller.primitive.duration = Some(200.0);
        controller.handle_event(MediaEvent::MetadataLoaded);

        // Pointer halfway across a 400px control, 30px from the video edge.
        controller.update_seek_tooltip(200.0, 400.0, 30.0);
        let tooltip = controller.surface.seek_tooltip.clone().unwrap();
        assert_eq!(tooltip.text, "01:40");
        assert_eq!(tooltip.offset_x, 30.0);

        controller.skip_ahead();
        assert_eq!(controller.primitive.current_time, 100.0);
        assert_eq!(controller.surface.seek.value, 100);
        assert_eq!(controller.surface.progress.value, 100);
        assert!(controller.surface.seek_tooltip.is_none());
    }

    #[test]
    fn test_skip_ahead_falls_back_to_slider_value() {
        let mut controller = controller();
        controller.primitive.duration = Some(200.0);
        controller.handle_event(MediaEvent::MetadataLoaded);

        // Keyboard path: no hover ever happened, the control carries the
        // committed value itself.
        controller.surface.seek.value = 42;
        controller.skip_ahead();
        assert_eq!(controller.primitive.current_time, 42.0);
        assert_eq!(controller.surface.seek.value, 42);
        assert_eq!(controller.surface.progress.value, 42);
    }

    #[test]
    fn test_pending_seek_consumed_by_commit() {
        let mut controller = controller();
        controller.primitive.duration = Some(100.0);
        controller.handle_event(MediaEvent::MetadataLoaded);

        controller.update_seek_tooltip(100.0, 100.0, 0.0);
        controller.skip_ahead();
        assert_eq!(controller.primitive.current_time, 100.0);

        // The annotation was cleared; the next commit uses the slider value.
        controller.surface.seek.value = 7;
        controller.skip_ahead();
        assert_eq!(controller.primitive.current_time, 7.0);
    }

    #[test]
    fn test_seek_after_end_then_play_keeps_position() {
        let mut controller = controller();
        controller.primitive.duration = Some(100.0);
        controller.handle_event(MediaEvent::MetadataLoaded);

        controller.primitive.paused = true;
        controller.primitive.ended = true;
        controller.primitive.current_time = 100.0;

        // Seeking leaves the ended state, so the following play resumes at
        // the committed position instead of replaying from the start.
        controller.surface.seek.value = 30;
        controller.skip_ahead();
        assert!(!controller.primitive.ended());

        controller.toggle_play();
        assert!(!controller.primitive.paused());
        assert_eq!(controller.primitive.current_time, 30.0);
    }

    #[test]
    fn test_cleared_preview_never_commits_stale_target() {
        let mut controller = controller();
        controller.primitive.duration = Some(100.0);
        controller.handle_event(MediaEvent::MetadataLoaded);

        // Hover set a preview near the end, then the pointer left the
        // control; the commit must use the slider's own value.
        controller.update_seek_tooltip(90.0, 100.0, 0.0);
        controller.clear_seek_tooltip();
        controller.surface.seek.value = 25;
        controller.skip_ahead();
        assert_eq!(controller.primitive.current_time, 25.0);
        assert_eq!(controller.surface.progress.value, 25);
    }

    #[test]
    fn test_update_volume_clears_mute() {
        let mut controller = controller();
        controller.primitive.muted = true;
        controller.update_volume(0.3);
        assert!(!controller.primitive.muted());
        assert_eq!(controller.primitive.volume(), 0.3);
        assert_eq!(controller.surface.volume_slider, 0.3);
    }

    #[test]
    fn test_double_mute_restores_exact_volume() {
        let mut controller = controller();
        controller.update_volume(0.7);
        pump(&mut controller);

        controller.toggle_mute();
        assert!(controller.primitive.muted());
        assert_eq!(controller.surface.volume_slider, 0.0);

        controller.toggle_mute();
        assert!(!controller.primitive.muted());
        assert_eq!(controller.surface.volume_slider, 0.7);
    }

    #[test]
    fn test_volume_icon_thresholds() {
        let mut controller = controller();

        controller.update_volume(0.3);
        pump(&mut controller);
        assert_eq!(controller.surface.volume_icon, VolumeIcon::Low);

        controller.update_volume(0.5);
        pump(&mut controller);
        assert_eq!(controller.surface.volume_icon, VolumeIcon::Low);

        controller.update_volume(0.51);
        pump(&mut controller);
        assert_eq!(controller.surface.volume_icon, VolumeIcon::High);

        controller.update_volume(0.0);
        pump(&mut controller);
        assert_eq!(controller.surface.volume_icon, VolumeIcon::Muted);
    }

    #[test]
    fn test_volume_scenario_end_to_end() {
        let mut controller = controller();

        controller.update_volume(0.3);
        pump(&mut controller);
        assert!(!controller.primitive.muted());
        assert_eq!(controller.primitive.volume(), 0.3);
        assert_eq!(controller.surface.volume_icon, VolumeIcon::Low);
        assert_eq!(controller.surface.mute_label, "Mute (m)");

        controller.toggle_mute();
        pump(&mut controller);
        assert!(controller.primitive.muted());
        assert_eq!(controller.surface.volume_slider, 0.0);
        assert_eq!(controller.surface.volume_icon, VolumeIcon::Muted);
        assert_eq!(controller.surface.mute_label, "Unmute (m)");

        controller.toggle_mute();
        pump(&mut controller);
        assert!(!controller.primitive.muted());
        assert_eq!(controller.surface.volume_slider, 0.3);
        assert_eq!(controller.surface.volume_icon, VolumeIcon::Low);
        assert_eq!(controller.surface.mute_label, "Mute (m)");
    }

    #[test]
    fn test_playback_scenario_end_to_end() {
        let mut controller = controller();
        assert!(!controller.primitive.builtin_controls());
        assert!(controller.surface.visible);

        controller.primitive.duration = Some(120.0);
        controller.handle_event(MediaEvent::MetadataLoaded);
        assert_eq!(controller.surface.duration_text, "02:00");

        controller.toggle_play();
        pump(&mut controller);
        assert!(!controller.primitive.paused());
        assert_eq!(controller.surface.play_icon, PlayIcon::Pause);
        assert_eq!(controller.surface.play_label, "Pause (k)");
    }
}
