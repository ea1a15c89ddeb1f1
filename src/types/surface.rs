use crate::types::time::{FormattedTime, format_time};

/// Which of the two mutually exclusive play-state glyphs is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    Play,
    Pause,
}

/// Which of the three mutually exclusive volume glyphs is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeIcon {
    Muted,
    Low,
    High,
}

/// Value/maximum pair backing both the seek control and the passive
/// progress indicator. The two must stay numerically equal after any sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderState {
    pub value: u64,
    pub max: u64,
}

impl SliderState {
    pub fn new() -> Self {
        SliderState { value: 0, max: 0 }
    }
}

impl Default for SliderState {
    fn default() -> Self {
        Self::new()
    }
}

/// Seek preview rendered while the pointer hovers the seek control.
/// `offset_x` is measured from the left edge of the video surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SeekTooltip {
    pub text: String,
    pub offset_x: f32,
}

/// Everything the control overlay displays, recomputed on each playback
/// notification and never cached across events.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlSurface {
    pub visible: bool,
    pub play_icon: PlayIcon,
    pub play_label: String,
    pub seek: SliderState,
    pub progress: SliderState,
    pub elapsed: FormattedTime,
    pub elapsed_machine: String,
    pub duration_text: String,
    pub duration_machine: String,
    pub volume_slider: f64,
    pub volume_icon: VolumeIcon,
    pub mute_label: String,
    pub seek_tooltip: Option<SeekTooltip>,
}

impl ControlSurface {
    pub fn new() -> Self {
        let zero = format_time(0);
        ControlSurface {
            visible: false,
            play_icon: PlayIcon::Play,
            play_label: "Play (k)".to_string(),
            seek: SliderState::new(),
            progress: SliderState::new(),
            elapsed_machine: zero.machine(),
            duration_text: zero.display(),
            duration_machine: zero.machine(),
            elapsed: zero,
            volume_slider: 1.0,
            volume_icon: VolumeIcon::High,
            mute_label: "Mute (m)".to_string(),
            seek_tooltip: None,
        }
    }
}

impl Default for ControlSurface {
    fn default() -> Self {
        Self::new()
    }
}
