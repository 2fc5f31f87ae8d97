//! Segment-level buffer model for replaying sessions.

/// Fluid buffer model: each cycle fetches one segment of the chosen rendition
/// while playback drains the buffer in real time.
///
/// The first fetch is startup delay, not a stall: playback has not begun.
#[derive(Clone, Debug)]
pub struct PlaybackModel {
    segment_secs: f64,
    buffered_secs: f64,
    startup_secs: f64,
    stalled_secs: f64,
    started: bool,
}

impl PlaybackModel {
    pub fn new(segment_secs: f64) -> Self {
        Self {
            segment_secs,
            buffered_secs: 0.0,
            startup_secs: 0.0,
            stalled_secs: 0.0,
            started: false,
        }
    }

    pub fn buffered_secs(&self) -> f64 {
        self.buffered_secs
    }

    /// Time spent fetching the first segment.
    pub fn startup_secs(&self) -> f64 {
        self.startup_secs
    }

    /// Total time the buffer ran dry after playback started.
    pub fn stalled_secs(&self) -> f64 {
        self.stalled_secs
    }

    /// Downloads one segment encoded at `rendition_bps` over a link of
    /// `network_bps`; returns the download time in seconds.
    pub fn fetch(&mut self, rendition_bps: u64, network_bps: f64) -> f64 {
        let download = self.segment_secs * rendition_bps as f64 / network_bps.max(1.0);
        if self.started {
            self.drain(download);
        } else {
            self.startup_secs += download;
            self.started = true;
        }
        self.buffered_secs += self.segment_secs;
        download
    }

    /// Plays `secs` of media without fetching.
    pub fn play(&mut self, secs: f64) {
        if self.started {
            self.drain(secs);
        }
    }

    fn drain(&mut self, secs: f64) {
        let left = self.buffered_secs - secs;
        if left < 0.0 {
            self.stalled_secs -= left;
        }
        self.buffered_secs = left.max(0.0);
    }
}
