//! Title normalization for cross-library folder matching.
//!
//! Derives a canonical (title, year) key from a folder name by stripping the
//! quality and release-group tokens the attribute parser recognizes, so that
//! "Matrix (1999) 1080p BluRay" and "Matrix.1999.720p" produce the same key.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Pattern for a 4-digit release year (1900-2099).
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(19\d{2}|20\d{2})$").expect("valid regex"));

/// Pattern for bracketed release-group suffixes, e.g. "[YTS.MX]".
static BRACKET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").expect("valid regex"));

/// Pattern for separator runs collapsed to a single space.
static SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s._\-()\[\],]+").expect("valid regex"));

/// Pattern for whitespace runs, used by the exact-mode key.
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Quality and release noise tokens dropped from canonical titles.
///
/// Covers everything the attribute parser recognizes plus common audio and
/// release tags that never belong to a movie title.
const NOISE_TOKENS: &[&str] = &[
    // resolution
    "2160p", "4k", "uhd", "1080p", "720p", "480p",
    // codec
    "hevc", "x265", "h265", "x264", "h264", "avc",
    // source (hyphenated forms are unified before tokenizing)
    "bluray", "bdrip", "brrip", "webdl", "webrip", "dvdrip", "dvd", "hdtv", "remux",
    // color / bit depth
    "hdr", "hdr10", "dv", "10bit", "8bit",
    // audio
    "aac", "ac3", "dts", "ddp", "atmos", "truehd", "flac",
    // release flags
    "proper", "repack", "extended", "unrated", "imax", "multi",
];

/// Match mode for cross-library folder comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Literal comparison after lowercasing and whitespace collapsing only.
    Exact,
    /// Comparison on the canonical (title, year) key.
    Fuzzy,
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Exact => write!(f, "exact"),
            MatchMode::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

impl std::str::FromStr for MatchMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(MatchMode::Exact),
            "fuzzy" => Ok(MatchMode::Fuzzy),
            other => Err(crate::Error::other(format!(
                "Invalid match mode '{other}', expected 'exact' or 'fuzzy'"
            ))),
        }
    }
}

/// Canonical matching key for a movie folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchKey {
    /// Lowercased title with quality tags stripped and separators collapsed.
    pub title: String,
    /// Release year, if a 4-digit year token was present.
    pub year: Option<u16>,
}

impl std::fmt::Display for MatchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.year {
            Some(year) => write!(f, "{} ({})", self.title, year),
            None => write!(f, "{}", self.title),
        }
    }
}

/// Derive the canonical (title, year) key from a folder name.
///
/// Steps: drop bracketed suffixes, lowercase, unify hyphenated source tags,
/// split on separator runs, hold the first in-range year token aside, drop
/// quality/release noise tokens, rejoin the remainder with single spaces.
pub fn canonical_key(name: &str) -> MatchKey {
    let lower = BRACKET_RE.replace_all(name, " ").to_lowercase();
    let unified = lower.replace("blu-ray", "bluray").replace("web-dl", "webdl");

    let mut year: Option<u16> = None;
    let mut words: Vec<&str> = Vec::new();

    for token in SEPARATOR_RE.split(&unified) {
        if token.is_empty() {
            continue;
        }
        if year.is_none() && YEAR_RE.is_match(token) {
            // First in-range year token is the release year, not title text.
            year = token.parse::<u16>().ok();
            continue;
        }
        if NOISE_TOKENS.contains(&token) {
            continue;
        }
        words.push(token);
    }

    MatchKey {
        title: words.join(" "),
        year,
    }
}

/// Derive the exact-mode key: lowercase and collapse whitespace, nothing else.
///
/// Deliberately conservative: punctuation and quality tags are preserved, so
/// exact mode never unifies variant quality tags under one identity.
pub fn exact_key(name: &str) -> String {
    WHITESPACE_RE
        .replace_all(name.trim(), " ")
        .to_lowercase()
}
