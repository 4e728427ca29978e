use crate::content::CompositeId;
use crate::media_type::ContentKind;
use crate::numbers::{EpisodeNumber, SeasonNumber};

/// Normalized metadata produced by a provider lookup.
///
/// Records are built per request and handed to the caller; nothing keeps a
/// copy.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetadataRecord {
    pub name: String,
    pub original_name: Option<String>,
    pub kind: ContentKind,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub series_number: Option<SeasonNumber>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub episode_number: Option<EpisodeNumber>,
}

impl MetadataRecord {
    pub fn movie(name: impl Into<String>, original_name: Option<String>) -> Self {
        Self {
            name: name.into(),
            original_name: normalize_original(original_name),
            kind: ContentKind::Movie,
            series_number: None,
            episode_number: None,
        }
    }

    pub fn episode(
        name: impl Into<String>,
        original_name: Option<String>,
        id: &CompositeId,
    ) -> Self {
        Self {
            name: name.into(),
            original_name: normalize_original(original_name),
            kind: ContentKind::Series,
            series_number: Some(id.season),
            episode_number: Some(id.episode),
        }
    }

    /// A record counts as a result only when it carries a usable name.
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
    }
}

fn normalize_original(original: Option<String>) -> Option<String> {
    original.filter(|value| !value.trim().is_empty())
}
