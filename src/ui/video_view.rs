use std::time::Instant;

use eframe::egui;

use crate::controls::pulse::PlaybackPulse;
use crate::player::pipeline::VideoFrame;

/// Shows the latest decoded frame as an egui texture, with the playback
/// pulse drawn on top. The returned response carries the click that toggles
/// playback.
pub struct VideoView {
    texture: Option<egui::TextureHandle>,
}

impl VideoView {
    pub fn new() -> Self {
        VideoView { texture: None }
    }

    /// Uploads the most recent frame, keeping the previous texture when no
    /// new frame has arrived.
    pub fn update_texture(&mut self, frame: Option<VideoFrame>, ctx: &egui::Context) {
        if let Some(frame) = frame {
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [frame.width as usize, frame.height as usize],
                &frame.data,
            );
            self.texture =
                Some(ctx.load_texture("video_frame", image, egui::TextureOptions::default()));
        }
    }

    pub fn show(&self, ui: &mut egui::Ui, pulse: &PlaybackPulse) -> egui::Response {
        let width = ui.available_width();
        let size = egui::vec2(width, width * 9.0 / 16.0);

        let response = if let Some(texture) = &self.texture {
            ui.add(
                egui::Image::new(texture)
                    .fit_to_exact_size(size)
                    .sense(egui::Sense::click()),
            )
        } else {
            let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
            ui.painter().rect_filled(rect, 0.0, egui::Color32::BLACK);
            response
        };

        if let Some(progress) = pulse.progress_at(Instant::now()) {
            let center = response.rect.center();
            let radius = response.rect.height() * 0.12 * PlaybackPulse::scale(progress);
            let alpha = (PlaybackPulse::opacity(progress) * 160.0) as u8;
            let fill = egui::Color32::from_black_alpha(alpha);
            ui.painter().circle_filled(center, radius, fill);
            // Keep repainting until the pulse has run its 500ms course.
            ui.ctx().request_repaint();
        }

        response
    }
}

impl Default for VideoView {
    fn default() -> Self {
        Self::new()
    }
}
