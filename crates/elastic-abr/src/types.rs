use std::{fmt, sync::Arc};

use derive_setters::Setters;

/// Stable identity of a rendition within a manifest.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RenditionId(Arc<str>);

impl RenditionId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RenditionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RenditionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RenditionId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

/// Encoded picture size in pixels.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// One encoded variant of the content, as advertised by the manifest.
///
/// Eligibility (disabled / excluded / incompatible) is not stored here; it is
/// owned by the host and queried through [`Eligibility`](crate::Eligibility).
#[derive(Clone, Debug, PartialEq, Setters)]
#[setters(prefix = "with_", strip_option)]
pub struct Rendition {
    #[setters(skip)]
    pub id: RenditionId,
    /// Advertised bandwidth in bits per second.
    pub bandwidth: Option<u64>,
    pub resolution: Option<Resolution>,
    /// Raw `CODECS` attribute, e.g. `"avc1.64001f,mp4a.40.2"`.
    #[setters(skip)]
    pub codecs: Option<String>,
}

impl Rendition {
    pub fn new(id: impl Into<RenditionId>) -> Self {
        Self {
            id: id.into(),
            bandwidth: None,
            resolution: None,
            codecs: None,
        }
    }

    #[must_use]
    pub fn with_codecs(mut self, codecs: impl Into<String>) -> Self {
        self.codecs = Some(codecs.into());
        self
    }

    /// Bandwidth used for ranking: a missing attribute ranks as infinitely expensive.
    pub fn ranked_bandwidth(&self) -> u64 {
        self.bandwidth.unwrap_or(u64::MAX)
    }

    pub fn width(&self) -> Option<u32> {
        self.resolution.map(|r| r.width)
    }

    pub fn height(&self) -> Option<u32> {
        self.resolution.map(|r| r.height)
    }
}

/// The set of renditions available for one piece of content.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Manifest {
    /// Variant streams in manifest order.
    pub renditions: Vec<Rendition>,
    /// Renditions of the active audio group, used when the manifest carries no video.
    pub audio_tracks: Vec<Rendition>,
}

impl Manifest {
    pub fn new(renditions: Vec<Rendition>) -> Self {
        Self {
            renditions,
            audio_tracks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_audio_tracks(mut self, audio_tracks: Vec<Rendition>) -> Self {
        self.audio_tracks = audio_tracks;
        self
    }

    pub fn find(&self, id: &RenditionId) -> Option<&Rendition> {
        self.renditions
            .iter()
            .chain(self.audio_tracks.iter())
            .find(|r| &r.id == id)
    }
}
