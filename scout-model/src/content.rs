//! Content identifiers as handed over by the host service.
//!
//! Series identifiers may carry the season and episode inline as
//! `base:season:episode`. Only that exact three-segment shape is decomposed;
//! anything else stays opaque.

use std::fmt;

use crate::media_type::ContentKind;
use crate::numbers::{EpisodeNumber, SeasonNumber};

/// Separator between the segments of a composite series identifier.
pub const COMPOSITE_DELIMITER: char = ':';

/// A series identifier decomposed into its base id, season and episode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeId {
    pub base_id: String,
    pub season: SeasonNumber,
    pub episode: EpisodeNumber,
}

impl CompositeId {
    /// Split `raw` into base id, season and episode.
    ///
    /// Returns `None` unless there are exactly three segments, the base id is
    /// non-empty and both trailing segments are unsigned integers.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut segments = raw.split(COMPOSITE_DELIMITER);
        let (Some(base), Some(season), Some(episode), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return None;
        };

        if base.trim().is_empty() {
            return None;
        }

        let season = season.trim().parse::<u16>().ok()?;
        let episode = episode.trim().parse::<u16>().ok()?;

        Some(Self {
            base_id: base.trim().to_string(),
            season: SeasonNumber::new(season),
            episode: EpisodeNumber::new(episode),
        })
    }
}

impl fmt::Display for CompositeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{COMPOSITE_DELIMITER}{}{COMPOSITE_DELIMITER}{}",
            self.base_id, self.season, self.episode
        )
    }
}

/// Reference to a piece of content, as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentRef {
    pub kind: ContentKind,
    pub external_id: String,
    pub series_number: Option<SeasonNumber>,
    pub episode_number: Option<EpisodeNumber>,
}

impl ContentRef {
    /// Build a reference, filling season and episode from a composite series
    /// identifier when one is present.
    pub fn new(kind: ContentKind, external_id: impl Into<String>) -> Self {
        let external_id = external_id.into();
        let composite = match kind {
            ContentKind::Series => CompositeId::parse(&external_id),
            ContentKind::Movie => None,
        };

        Self {
            kind,
            series_number: composite.as_ref().map(|c| c.season),
            episode_number: composite.as_ref().map(|c| c.episode),
            external_id,
        }
    }

    /// The decomposed identifier, for series references that carry one.
    pub fn composite(&self) -> Option<CompositeId> {
        match self.kind {
            ContentKind::Series => CompositeId::parse(&self.external_id),
            ContentKind::Movie => None,
        }
    }
}
