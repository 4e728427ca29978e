use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// Kind of content an identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ContentKind {
    /// A single movie
    Movie,
    /// A series, usually addressed down to one episode
    Series,
}

impl ContentKind {
    pub const ALL: [ContentKind; 2] = [ContentKind::Movie, ContentKind::Series];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Movie => "movie",
            ContentKind::Series => "series",
        }
    }

    /// Lenient parse used at the host boundary; unknown kinds map to `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl Display for ContentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("movie") {
            Ok(ContentKind::Movie)
        } else if trimmed.eq_ignore_ascii_case("series") {
            Ok(ContentKind::Series)
        } else {
            Err(ModelError::UnknownKind(s.to_string()))
        }
    }
}
