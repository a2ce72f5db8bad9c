use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use chrono::DateTime;
use regex::Regex;
use serde::{Serialize, Deserialize};
use crate::core::error::{Error, ErrorKind};

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static tag pattern"));

/// 0-based rank of a frame in the corpus order fixed at index-build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position(pub u32);

impl Position {
    pub fn new(position: u32) -> Self {
        Position(position)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// `self + delta`, or `None` when the result leaves `[0, len)`.
    pub fn offset(&self, delta: i64, len: usize) -> Option<Position> {
        let target = i64::from(self.0).checked_add(delta)?;
        if target < 0 || target >= len as i64 {
            return None;
        }
        u32::try_from(target).ok().map(Position)
    }
}

impl From<u32> for Position {
    fn from(position: u32) -> Self {
        Position(position)
    }
}

/// Millisecond timestamp of a frame within its episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameId(pub u64);

impl FrameId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for FrameId {
    fn from(id: u64) -> Self {
        FrameId(id)
    }
}

/// Identity of a frame across the whole corpus. Displays as `season:episode:id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameKey {
    pub season: u32,
    pub episode: u32,
    pub id: FrameId,
}

impl FrameKey {
    pub fn new(season: u32, episode: u32, id: u64) -> Self {
        FrameKey { season, episode, id: FrameId(id) }
    }
}

impl fmt::Display for FrameKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}:{}", self.season, self.episode, self.id.0)
    }
}

impl FromStr for FrameKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::new(ErrorKind::InvalidInput, format!("invalid frame key '{}'", s));
        let mut parts = s.split(':');
        let (Some(season), Some(episode), Some(id), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        Ok(FrameKey {
            season: season.parse().map_err(|_| invalid())?,
            episode: episode.parse().map_err(|_| invalid())?,
            id: FrameId(id.parse().map_err(|_| invalid())?),
        })
    }
}

/// Per-position stored fields, as kept by the index payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFields {
    pub season: u32,
    pub episode: u32,
    pub html: String,
    #[serde(rename = "stillPath", default, skip_serializing_if = "Option::is_none")]
    pub still_path: Option<String>,
}

/// Which rendition of a frame image the host wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Thumbnail,
    Still,
}

impl AssetKind {
    pub fn suffix(&self) -> &'static str {
        match self {
            AssetKind::Thumbnail => "thumbnail",
            AssetKind::Still => "still",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            AssetKind::Thumbnail => "jpg",
            AssetKind::Still => "png",
        }
    }
}

/// One corpus entry: a still plus its caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub position: Position,
    pub id: FrameId,
    pub season: u32,
    pub episode: u32,
    pub html: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub still_path: Option<String>,
}

impl Frame {
    pub fn key(&self) -> FrameKey {
        FrameKey {
            season: self.season,
            episode: self.episode,
            id: self.id,
        }
    }

    /// Caption with markup removed.
    pub fn text(&self) -> String {
        TAG_PATTERN.replace_all(&self.html, "").into_owned()
    }

    /// Offset into the episode as `HH:MM:SS`.
    pub fn timestamp(&self) -> Option<String> {
        let millis = i64::try_from(self.id.0).ok()?;
        DateTime::from_timestamp_millis(millis).map(|t| t.format("%H:%M:%S").to_string())
    }

    /// Path of the image relative to the asset base, e.g. `3x07/123456_still.png`.
    pub fn asset_path(&self, kind: AssetKind) -> String {
        if let (AssetKind::Still, Some(path)) = (kind, &self.still_path) {
            return path.clone();
        }
        format!(
            "{}x{:02}/{}_{}.{}",
            self.season,
            self.episode,
            self.id.0,
            kind.suffix(),
            kind.extension()
        )
    }
}
