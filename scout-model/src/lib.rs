//! Core data model definitions shared across Scout crates.
#![allow(missing_docs)]

pub mod candidate;
pub mod content;
pub mod error;
pub mod media_type;
pub mod metadata;
pub mod numbers;

pub use candidate::{Candidate, CandidateIdent, RankedResult};
pub use content::{COMPOSITE_DELIMITER, CompositeId, ContentRef};
pub use error::ModelError;
pub use media_type::ContentKind;
pub use metadata::MetadataRecord;
pub use numbers::{EpisodeNumber, SeasonNumber};
