//! Metadata resolution and oracle-assisted reranking for content discovery.
//!
//! Two pipelines live here:
//!
//! - [`MetadataResolver`] runs an ordered cascade of [`MetadataProvider`]s
//!   per content kind and returns the first usable [`MetadataRecord`].
//! - [`RankFusionEngine`] asks a [`RankingOracle`] to pick the most relevant
//!   candidates, parses the free-text reply with [`parse_selection`], and
//!   merges the pick with the caller's ordering into a bounded
//!   [`RankedResult`].
//!
//! Neither pipeline returns errors. Provider and oracle failures degrade to
//! "unknown metadata" and to the caller's own top candidates respectively.
//!
//! [`MetadataRecord`]: scout_model::MetadataRecord
//! [`RankedResult`]: scout_model::RankedResult
#![allow(missing_docs)]

pub mod fusion;
pub mod oracle;
pub mod providers;
pub mod resolver;
pub mod scout;
pub mod selection;
pub mod size;

pub use fusion::{FusionOutcome, RankFusionEngine};
pub use oracle::{ChatCompletionsOracle, OracleError, RankingOracle};
pub use providers::{
    CinemetaProvider, MetadataProvider, ProviderError, TmdbProvider,
};
pub use resolver::{MetadataResolver, MetadataResolverBuilder};
pub use scout::Scout;
pub use selection::{NO_RELEVANT_SENTINEL, Selection, parse_selection};
pub use size::human_size;

pub use scout_config::{Config, FusionConfig, NoRelevantPolicy};
pub use scout_model::{
    Candidate, CandidateIdent, ContentKind, ContentRef, MetadataRecord,
    RankedResult,
};
