use gstreamer as gst;
use tracing::{debug, warn};

/// Formats the player is expected to handle; the probe asks the registry
/// whether a decoder exists for any of them.
const PROBE_CAPS: &[&str] = &[
    "video/x-h264",
    "video/x-h265",
    "video/x-vp8",
    "video/x-vp9",
];

/// Reports whether the installed playback backend can decode the formats
/// this player is built around. A broken or absent runtime answers `false`
/// rather than erroring, so the caller can leave the backend's own controls
/// in place.
pub fn playback_supported() -> bool {
    if let Err(err) = gst::init() {
        warn!(%err, "playback backend unavailable");
        return false;
    }
    if gst::ElementFactory::find("playbin").is_none() {
        warn!("playbin element missing from registry");
        return false;
    }
    let decoders = gst::ElementFactory::factories_with_type(
        gst::ElementFactoryType::DECODER,
        gst::Rank::MARGINAL,
    );
    let supported = PROBE_CAPS.iter().any(|name| {
        let caps = gst::Caps::new_empty_simple(*name);
        decoders.iter().any(|factory| factory.can_sink_any_caps(&caps))
    });
    if !supported {
        debug!("no decoder found for any probed format");
    }
    supported
}
