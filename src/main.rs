mod cli;
mod controls;
mod player;
mod types;
mod ui;

use clap::Parser;
use tracing::{error, info, warn};

use crate::cli::Args;
use crate::controls::controller::PlaybackController;
use crate::player::capability;
use crate::player::pipeline::GstPlayer;
use crate::ui::app::OverplayApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let media = args.media.or_else(|| {
        rfd::FileDialog::new()
            .add_filter("video", &["mp4", "mkv", "webm", "mov", "avi"])
            .pick_file()
    });
    let Some(media) = media else {
        info!("no media file selected");
        return Ok(());
    };

    let supported = capability::playback_supported();
    if !supported {
        warn!("format probe failed; the custom overlay stays hidden");
    }

    let player = match GstPlayer::new(&media) {
        Ok(player) => player,
        Err(err) => {
            error!(%err, path = %media.display(), "failed to build playback pipeline");
            return Ok(());
        }
    };

    let mut controller = PlaybackController::new(player, supported);
    controller.update_volume(args.volume.clamp(0.0, 1.0));

    let app = OverplayApp::new(controller);
    let native_options = eframe::NativeOptions::default();
    eframe::run_native("Overplay", native_options, Box::new(|_cc| Ok(Box::new(app))))
}
