use std::path::Path;
use std::sync::{Arc, Mutex};

use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;
use tracing::{debug, warn};

use crate::player::error::PlayerError;
use crate::player::event::MediaEvent;
use crate::player::primitive::MediaPrimitive;

/// One decoded RGBA frame pulled from the video sink.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Playback primitive backed by a GStreamer `playbin` pipeline.
///
/// An appsink negotiated to RGBA keeps the most recent frame available for
/// the UI; the bus plus cached property diffs are turned into the
/// notification stream of [`MediaPrimitive::poll_events`].
pub struct GstPlayer {
    playbin: gst::Element,
    bus: gst::Bus,
    frame: Arc<Mutex<Option<VideoFrame>>>,
    pending: Vec<MediaEvent>,
    paused: bool,
    ended: bool,
    builtin_controls: bool,
    duration_known: bool,
    last_second: u64,
    last_volume: f64,
    last_muted: bool,
}

impl GstPlayer {
    /// Builds a paused pipeline for the given media file. The pipeline
    /// prerolls in the background; `MetadataLoaded` arrives via polling once
    /// the duration is queryable.
    pub fn new(media: &Path) -> Result<Self, PlayerError> {
        gst::init()?;
        let uri = gst::glib::filename_to_uri(media, None)?;
        let playbin = gst::ElementFactory::make("playbin")
            .property("uri", uri.as_str())
            .build()?;

        let frame: Arc<Mutex<Option<VideoFrame>>> = Arc::new(Mutex::new(None));
        let sink_frame = frame.clone();
        let appsink = gst_app::AppSink::builder()
            .caps(
                &gst_video::VideoCapsBuilder::new()
                    .format(gst_video::VideoFormat::Rgba)
                    .build(),
            )
            .build();
        appsink.set_callbacks(
            gst_app::AppSinkCallbacks::builder()
                .new_sample(move |sink| {
                    let sample = sink.pull_sample().map_err(|_| gst::FlowError::Eos)?;
                    if let Some(decoded) = frame_from_sample(&sample) {
                        if let Ok(mut slot) = sink_frame.lock() {
                            *slot = Some(decoded);
                        }
                    }
                    Ok(gst::FlowSuccess::Ok)
                })
                .build(),
        );
        playbin.set_property("video-sink", &appsink);

        let bus = playbin.bus().ok_or(PlayerError::MissingBus)?;
        playbin.set_state(gst::State::Paused)?;

        let last_volume = playbin.property::<f64>("volume").clamp(0.0, 1.0);
        let last_muted = playbin.property::<bool>("mute");
        Ok(GstPlayer {
            playbin,
            bus,
            frame,
            pending: Vec::new(),
            paused: true,
            ended: false,
            builtin_controls: true,
            duration_known: false,
            last_second: 0,
            last_volume,
            last_muted,
        })
    }

    /// Most recent decoded frame, if any has arrived yet.
    pub fn latest_frame(&self) -> Option<VideoFrame> {
        self.frame.lock().ok().and_then(|slot| slot.clone())
    }

    fn drain_bus(&mut self) {
        while let Some(message) = self.bus.pop() {
            match message.view() {
                gst::MessageView::Eos(..) => {
                    self.ended = true;
                    self.paused = true;
                    self.pending.push(MediaEvent::Pause);
                }
                gst::MessageView::AsyncDone(..) => {
                    if !self.duration_known && self.duration().is_some() {
                        self.duration_known = true;
                        self.pending.push(MediaEvent::MetadataLoaded);
                    }
                }
                gst::MessageView::DurationChanged(..) => {
                    if self.duration().is_some() {
                        self.duration_known = true;
                        self.pending.push(MediaEvent::MetadataLoaded);
                    }
                }
                gst::MessageView::Error(err) => {
                    warn!(error = %err.error(), "pipeline error");
                }
                _ => {}
            }
        }
    }
}

fn frame_from_sample(sample: &gst::Sample) -> Option<VideoFrame> {
    let buffer = sample.buffer()?;
    let caps = sample.caps()?;
    let info = gst_video::VideoInfo::from_caps(caps).ok()?;
    let map = buffer.map_readable().ok()?;
    Some(VideoFrame {
        data: map.as_slice().to_vec(),
        width: info.width(),
        height: info.height(),
    })
}

fn clock_time_to_secs(time: gst::ClockTime) -> f64 {
    time.nseconds() as f64 / 1_000_000_000.0
}

impl MediaPrimitive for GstPlayer {
    fn paused(&self) -> bool {
        self.paused
    }

    fn ended(&self) -> bool {
        self.ended
    }

    fn muted(&self) -> bool {
        self.playbin.property::<bool>("mute")
    }

    fn volume(&self) -> f64 {
        self.playbin.property::<f64>("volume").clamp(0.0, 1.0)
    }

    fn current_time(&self) -> f64 {
        self.playbin
            .query_position::<gst::ClockTime>()
            .map(clock_time_to_secs)
            .unwrap_or(0.0)
    }

    fn duration(&self) -> Option<f64> {
        self.playbin
            .query_duration::<gst::ClockTime>()
            .map(clock_time_to_secs)
    }

    fn builtin_controls(&self) -> bool {
        self.builtin_controls
    }

    fn play(&mut self) {
        if self.ended {
            // Replay from the start, matching media-element semantics.
            self.set_current_time(0.0);
            self.ended = false;
        }
        match self.playbin.set_state(gst::State::Playing) {
            Ok(_) => {
                self.paused = false;
                self.pending.push(MediaEvent::Play);
            }
            Err(err) => warn!(%err, "play request refused"),
        }
    }

    fn pause(&mut self) {
        match self.playbin.set_state(gst::State::Paused) {
            Ok(_) => {
                self.paused = true;
                self.pending.push(MediaEvent::Pause);
            }
            Err(err) => warn!(%err, "pause request refused"),
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        let target = gst::ClockTime::from_nseconds((seconds.max(0.0) * 1_000_000_000.0) as u64);
        match self
            .playbin
            .seek_simple(gst::SeekFlags::FLUSH | gst::SeekFlags::KEY_UNIT, target)
        {
            // Seeking leaves the ended state, as on a media element; a
            // later play() must resume here instead of replaying from 0.
            Ok(()) => self.ended = false,
            Err(err) => warn!(%err, seconds, "seek refused"),
        }
    }

    fn set_volume(&mut self, volume: f64) {
        self.playbin.set_property("volume", volume.clamp(0.0, 1.0));
    }

    fn set_muted(&mut self, muted: bool) {
        self.playbin.set_property("mute", muted);
    }

    fn set_builtin_controls(&mut self, enabled: bool) {
        debug!(enabled, "builtin control presentation toggled");
        self.builtin_controls = enabled;
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        self.drain_bus();

        let second = self.current_time().max(0.0).floor() as u64;
        if second != self.last_second {
            self.last_second = second;
            self.pending.push(MediaEvent::TimeUpdate);
        }

        let volume = self.volume();
        let muted = self.muted();
        if volume != self.last_volume || muted != self.last_muted {
            self.last_volume = volume;
            self.last_muted = muted;
            self.pending.push(MediaEvent::VolumeChange);
        }

        std::mem::take(&mut self.pending)
    }
}
