use gstreamer as gst;
use thiserror::Error;

/// Failures while constructing the playback pipeline. Once the pipeline is
/// up, playback operations degrade to silent no-ops instead of erroring.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("playback backend initialization failed: {0}")]
    Init(#[from] gst::glib::Error),

    #[error("failed to build pipeline element: {0}")]
    ElementBuild(#[from] gst::glib::BoolError),

    #[error("pipeline refused state change: {0}")]
    StateChange(#[from] gst::StateChangeError),

    #[error("pipeline has no message bus")]
    MissingBus,
}
