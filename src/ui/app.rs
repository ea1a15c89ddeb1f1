use eframe::egui;

use crate::controls::controller::PlaybackController;
use crate::controls::pulse::PlaybackPulse;
use crate::player::pipeline::GstPlayer;
use crate::player::primitive::MediaPrimitive;
use crate::ui::overlay;
use crate::ui::video_view::VideoView;

pub struct OverplayApp {
    pub controller: PlaybackController<GstPlayer>,
    pub pulse: PlaybackPulse,
    pub video: VideoView,
}

impl OverplayApp {
    pub fn new(controller: PlaybackController<GstPlayer>) -> Self {
        OverplayApp {
            controller,
            pulse: PlaybackPulse::new(),
            video: VideoView::new(),
        }
    }
}

impl eframe::App for OverplayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Backend notifications first, so this frame renders current state.
        let events = self.controller.primitive.poll_events();
        for event in events {
            self.controller.handle_event(event);
        }

        if self.controller.surface.visible {
            // Shortcuts matching the affordance labels.
            if ctx.input(|i| i.key_pressed(egui::Key::K)) {
                self.controller.toggle_play();
            }
            if ctx.input(|i| i.key_pressed(egui::Key::M)) {
                self.controller.toggle_mute();
            }
        }

        self.video
            .update_texture(self.controller.primitive.latest_frame(), ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical(|ui| {
                let video_response = self.video.show(ui, &self.pulse);
                if self.controller.surface.visible {
                    if video_response.clicked() {
                        self.controller.toggle_play();
                        self.pulse.trigger();
                    }
                    overlay::show(ui, &mut self.controller, video_response.rect);
                } else {
                    overlay::show_fallback(ui);
                }
            });
        });

        // eframe repaints reactively, so polling must be scheduled
        // explicitly or preroll metadata and backend-initiated changes sit
        // in the queue until the next input event.
        let interval = poll_interval(
            self.controller.primitive.paused(),
            self.controller.primitive.duration().is_some(),
        );
        ctx.request_repaint_after(interval);
    }
}

/// How soon the next frame should run: fast while playing or while preroll
/// has not reported a duration yet, slow while idle so backend-initiated
/// volume and state changes still surface without user input.
fn poll_interval(paused: bool, duration_known: bool) -> std::time::Duration {
    if !paused || !duration_known {
        std::time::Duration::from_millis(33)
    } else {
        std::time::Duration::from_millis(250)
    }
}
