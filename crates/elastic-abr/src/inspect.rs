//! Manifest-level media inspection: audio-only detection and codec split.

use crate::types::{Manifest, Rendition};

/// Codec descriptors of a rendition split by track type.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CodecInfo {
    pub video: Option<String>,
    pub audio: Option<String>,
}

impl CodecInfo {
    pub fn has_video(&self) -> bool {
        self.video.is_some()
    }
}

#[cfg_attr(test, unimock::unimock(api = MediaInspectorMock))]
pub trait MediaInspector {
    /// The manifest carries no video variants.
    fn is_audio_only(&self, manifest: &Manifest) -> bool;

    fn codecs_for(&self, manifest: &Manifest, rendition: &Rendition) -> CodecInfo;
}

const VIDEO_FAMILIES: &[&str] = &[
    "avc1", "avc3", "hvc1", "hev1", "dvh1", "dvhe", "vp09", "vp9", "vp8", "av01", "theora",
];
const AUDIO_FAMILIES: &[&str] = &[
    "mp4a", "ac-3", "ec-3", "ac-4", "opus", "flac", "mp3", "vorbis", "alac",
];

/// Classifies the `CODECS` attribute by codec family.
///
/// Entries matching no known family are ignored. A rendition without a
/// `CODECS` attribute reports video when it advertises a resolution.
#[derive(Clone, Copy, Debug, Default)]
pub struct AttributeInspector;

impl AttributeInspector {
    fn family(entry: &str) -> &str {
        entry.split('.').next().unwrap_or(entry)
    }

    fn is_audio_entry(entry: &str) -> bool {
        let family = Self::family(entry).to_ascii_lowercase();
        AUDIO_FAMILIES.contains(&family.as_str())
    }

    /// Every `CODECS` entry names an audio codec. Missing attributes never qualify.
    fn is_audio_rendition(rendition: &Rendition) -> bool {
        let Some(codecs) = rendition.codecs.as_deref() else {
            return false;
        };
        let entries: Vec<&str> = codecs
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .collect();
        !entries.is_empty() && entries.iter().all(|e| Self::is_audio_entry(e))
    }

    fn classify(rendition: &Rendition) -> CodecInfo {
        let Some(codecs) = rendition.codecs.as_deref() else {
            return CodecInfo {
                video: rendition.resolution.map(|_| String::new()),
                audio: None,
            };
        };

        let mut video = Vec::new();
        let mut audio = Vec::new();
        for entry in codecs.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let family = Self::family(entry).to_ascii_lowercase();
            if VIDEO_FAMILIES.contains(&family.as_str()) {
                video.push(entry);
            } else if AUDIO_FAMILIES.contains(&family.as_str()) {
                audio.push(entry);
            }
        }

        CodecInfo {
            video: (!video.is_empty()).then(|| video.join(",")),
            audio: (!audio.is_empty()).then(|| audio.join(",")),
        }
    }
}

impl MediaInspector for AttributeInspector {
    /// Audio-only when every variant declares `CODECS` made solely of audio codecs.
    fn is_audio_only(&self, manifest: &Manifest) -> bool {
        !manifest.renditions.is_empty()
            && manifest.renditions.iter().all(Self::is_audio_rendition)
    }

    fn codecs_for(&self, _manifest: &Manifest, rendition: &Rendition) -> CodecInfo {
        Self::classify(rendition)
    }
}
