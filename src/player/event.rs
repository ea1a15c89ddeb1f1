/// Notifications emitted by a playback primitive, in the order they occur.
///
/// `VolumeChange` covers both volume and mute transitions, programmatic or
/// backend-initiated. `TimeUpdate` fires whenever the floored playback
/// position moves. `MetadataLoaded` fires once the duration is known and may
/// fire again if the media source changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    Play,
    Pause,
    MetadataLoaded,
    TimeUpdate,
    VolumeChange,
}
