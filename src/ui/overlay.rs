use eframe::egui;

use crate::controls::controller::PlaybackController;
use crate::player::primitive::MediaPrimitive;
use crate::types::surface::{PlayIcon, VolumeIcon};

/// Draws the custom control row under the video surface and routes
/// interactions into the controller. `video_rect` anchors the seek tooltip
/// relative to the video's bounding box.
pub fn show<P: MediaPrimitive>(
    ui: &mut egui::Ui,
    controller: &mut PlaybackController<P>,
    video_rect: egui::Rect,
) {
    // Passive progress indicator, numerically equal to the seek control.
    let fraction = if controller.surface.progress.max > 0 {
        controller.surface.progress.value as f32 / controller.surface.progress.max as f32
    } else {
        0.0
    };
    ui.add(egui::ProgressBar::new(fraction).desired_height(4.0));

    ui.horizontal(|ui| {
        let play_glyph = match controller.surface.play_icon {
            PlayIcon::Play => "▶",
            PlayIcon::Pause => "⏸",
        };
        let play_label = controller.surface.play_label.clone();
        if ui.button(play_glyph).on_hover_text(play_label).clicked() {
            controller.toggle_play();
        }

        ui.monospace(format!(
            "{} / {}",
            controller.surface.elapsed.display(),
            controller.surface.duration_text
        ));

        let max = controller.surface.seek.max.max(1);
        let mut seek_value = controller.surface.seek.value;
        let response = ui.add(
            egui::Slider::new(&mut seek_value, 0..=max)
                .show_value(false)
                .trailing_fill(true),
        );

        if let Some(pointer) = response.hover_pos() {
            controller.update_seek_tooltip(
                pointer.x - response.rect.left(),
                response.rect.width(),
                pointer.x - video_rect.left(),
            );
        } else {
            // Also mid-drag: once the pointer leaves the control the
            // preview is stale, and a commit must use the slider value.
            controller.clear_seek_tooltip();
        }

        // Committing on every change mirrors binding the seek to the input
        // event: scrubbing seeks continuously, not just on release.
        if response.changed() {
            controller.surface.seek.value = seek_value;
            controller.skip_ahead();
        }

        if let Some(tooltip) = &controller.surface.seek_tooltip {
            let pos = egui::pos2(
                video_rect.left() + tooltip.offset_x,
                response.rect.top() - 6.0,
            );
            ui.painter().text(
                pos,
                egui::Align2::CENTER_BOTTOM,
                &tooltip.text,
                egui::TextStyle::Small.resolve(ui.style()),
                ui.visuals().strong_text_color(),
            );
        }

        let volume_glyph = match controller.surface.volume_icon {
            VolumeIcon::Muted => "🔇",
            VolumeIcon::Low => "🔉",
            VolumeIcon::High => "🔊",
        };
        let mute_label = controller.surface.mute_label.clone();
        if ui.button(volume_glyph).on_hover_text(mute_label).clicked() {
            controller.toggle_mute();
        }

        let mut volume = controller.surface.volume_slider;
        if ui
            .add(egui::Slider::new(&mut volume, 0.0..=1.0).show_value(false))
            .changed()
        {
            controller.update_volume(volume);
        }
    });
}

/// Degraded presentation when the capability probe failed: nothing is bound,
/// the backend keeps whatever control surface it has.
pub fn show_fallback(ui: &mut egui::Ui) {
    ui.label("Custom controls unavailable; playback stays with the backend.");
}
