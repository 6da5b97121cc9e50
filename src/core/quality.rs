//! Filename attribute parsing and quality scoring.
//!
//! Extracts resolution, codec, and source tags from file or folder names and
//! combines them with file size into a single comparable score. Parsing and
//! scoring never fail: unrecognized text simply leaves a field unknown, and
//! unknown fields contribute zero to the score.

use serde::{Deserialize, Serialize};

/// Weight of the size factor in the total score.
const SIZE_WEIGHT: f64 = 0.30;
/// Weight of the codec factor in the total score.
const CODEC_WEIGHT: f64 = 0.25;
/// Weight of the resolution factor in the total score.
const RESOLUTION_WEIGHT: f64 = 0.30;
/// Weight of the source factor in the total score.
const SOURCE_WEIGHT: f64 = 0.15;

/// Resolution class parsed from a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    #[serde(rename = "480p")]
    R480p,
    #[serde(rename = "720p")]
    R720p,
    #[serde(rename = "1080p")]
    R1080p,
    #[serde(rename = "2160p")]
    R2160p,
    Unknown,
}

impl Resolution {
    /// Raw score points (0-400 scale).
    pub fn points(self) -> f64 {
        match self {
            Resolution::R2160p => 400.0,
            Resolution::R1080p => 300.0,
            Resolution::R720p => 200.0,
            Resolution::R480p => 100.0,
            Resolution::Unknown => 0.0,
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::R2160p => write!(f, "2160p"),
            Resolution::R1080p => write!(f, "1080p"),
            Resolution::R720p => write!(f, "720p"),
            Resolution::R480p => write!(f, "480p"),
            Resolution::Unknown => write!(f, "unknown"),
        }
    }
}

/// Video codec class parsed from a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    Hevc,
    Avc,
    Unknown,
}

impl Codec {
    /// Raw score points (0-100 scale).
    pub fn points(self) -> f64 {
        match self {
            Codec::Hevc => 100.0,
            Codec::Avc => 50.0,
            Codec::Unknown => 0.0,
        }
    }
}

impl std::fmt::Display for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Codec::Hevc => write!(f, "HEVC"),
            Codec::Avc => write!(f, "AVC"),
            Codec::Unknown => write!(f, "unknown"),
        }
    }
}

/// Release source class parsed from a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    BluRay,
    WebDl,
    WebRip,
    Dvd,
    Unknown,
}

impl Source {
    /// Raw score points (0-150 scale).
    pub fn points(self) -> f64 {
        match self {
            Source::BluRay => 150.0,
            Source::WebDl => 100.0,
            Source::WebRip => 80.0,
            Source::Dvd => 50.0,
            Source::Unknown => 0.0,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::BluRay => write!(f, "BluRay"),
            Source::WebDl => write!(f, "WEB-DL"),
            Source::WebRip => write!(f, "WEBRip"),
            Source::Dvd => write!(f, "DVD"),
            Source::Unknown => write!(f, "unknown"),
        }
    }
}

/// Quality attributes extracted from a file or folder name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityAttributes {
    pub resolution: Resolution,
    pub codec: Codec,
    pub source: Source,
}

impl QualityAttributes {
    /// Parse quality attributes from a name.
    ///
    /// Matching is case-insensitive substring search, independent per
    /// category, first match wins. A name may match all three categories or
    /// none; this function never fails.
    pub fn parse(name: &str) -> Self {
        let lower = name.to_lowercase();

        // 2160p/4k checked before the lower classes so names carrying both a
        // 4K tag and a downscale note resolve to the higher class.
        let resolution = if lower.contains("2160p") || lower.contains("4k") {
            Resolution::R2160p
        } else if lower.contains("1080p") {
            Resolution::R1080p
        } else if lower.contains("720p") {
            Resolution::R720p
        } else if lower.contains("480p") {
            Resolution::R480p
        } else {
            Resolution::Unknown
        };

        // HEVC tokens first: "hevc" contains the substring "avc".
        let codec = if lower.contains("hevc") || lower.contains("x265") || lower.contains("h265") {
            Codec::Hevc
        } else if lower.contains("x264") || lower.contains("h264") || lower.contains("avc") {
            Codec::Avc
        } else {
            Codec::Unknown
        };

        let source = if lower.contains("bluray") || lower.contains("blu-ray") {
            Source::BluRay
        } else if lower.contains("web-dl") || lower.contains("webdl") {
            Source::WebDl
        } else if lower.contains("webrip") {
            Source::WebRip
        } else if lower.contains("dvd") {
            Source::Dvd
        } else {
            Source::Unknown
        };

        Self {
            resolution,
            codec,
            source,
        }
    }

    /// Whether no category matched anything.
    pub fn is_all_unknown(&self) -> bool {
        self.resolution == Resolution::Unknown
            && self.codec == Codec::Unknown
            && self.source == Source::Unknown
    }
}

/// Quality score breakdown for a video file or folder.
///
/// All factors are pre-normalized to a 0-100 scale before weighting, so the
/// total is bounded to the same range. The computation is pure: identical
/// inputs always produce identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityScore {
    /// Combined weighted score (0-100).
    pub total: f64,
    /// Size factor (0-100).
    pub size_factor: f64,
    /// Codec factor (0-100).
    pub codec_factor: f64,
    /// Resolution factor (0-100).
    pub resolution_factor: f64,
    /// Source factor (0-100).
    pub source_factor: f64,
    /// Attributes the name-based factors were derived from.
    pub attributes: QualityAttributes,
}

/// Compute the quality score for a name and size in bytes.
///
/// Factor normalization:
/// - resolution points (0-400) divided by 4
/// - codec points already on the 0-100 scale
/// - source points (0-150) divided by 1.5
/// - size in MB clamped to 0-100, so anything >= 100MB saturates the size
///   factor. The cap deliberately de-emphasizes size differences between
///   reasonably large files so that size alone cannot outvote the
///   resolution and codec signals.
pub fn score(name: &str, size_bytes: u64) -> QualityScore {
    let attributes = QualityAttributes::parse(name);

    let resolution_factor = attributes.resolution.points() / 4.0;
    let codec_factor = attributes.codec.points();
    let source_factor = attributes.source.points() / 1.5;

    let size_mb = size_bytes as f64 / (1024.0 * 1024.0);
    let size_factor = size_mb.min(100.0);

    let total = size_factor * SIZE_WEIGHT
        + codec_factor * CODEC_WEIGHT
        + resolution_factor * RESOLUTION_WEIGHT
        + source_factor * SOURCE_WEIGHT;

    QualityScore {
        total,
        size_factor,
        codec_factor,
        resolution_factor,
        source_factor,
        attributes,
    }
}
