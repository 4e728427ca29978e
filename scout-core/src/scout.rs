use std::sync::Arc;

use scout_config::Config;
use scout_model::{Candidate, MetadataRecord, RankedResult};

use crate::fusion::RankFusionEngine;
use crate::oracle::{ChatCompletionsOracle, RankingOracle};
use crate::resolver::MetadataResolver;

/// Entry point for a host service: one resolver and one fusion engine.
#[derive(Debug, Clone)]
pub struct Scout {
    resolver: MetadataResolver,
    fusion: RankFusionEngine,
}

impl Scout {
    /// Wire an explicit resolver and fusion engine.
    pub fn new(resolver: MetadataResolver, fusion: RankFusionEngine) -> Self {
        Self { resolver, fusion }
    }

    /// Default wiring: TMDB then Cinemeta for metadata, the configured
    /// chat-completions endpoint as oracle.
    pub fn from_config(config: &Config) -> Self {
        let oracle: Arc<dyn RankingOracle> =
            Arc::new(ChatCompletionsOracle::new(&config.oracle));
        Self {
            resolver: MetadataResolver::from_config(config),
            fusion: RankFusionEngine::new(oracle, config.fusion),
        }
    }

    /// Resolve metadata for a host-supplied kind string and identifier.
    pub async fn resolve(
        &self,
        kind: &str,
        external_id: &str,
    ) -> Option<MetadataRecord> {
        self.resolver.resolve(kind, external_id).await
    }

    /// Fuse the oracle's pick with the caller's candidate order.
    pub async fn rerank(
        &self,
        candidates: &[Candidate],
        query: &str,
    ) -> RankedResult {
        self.fusion.fuse(candidates, query).await
    }

    pub fn resolver(&self) -> &MetadataResolver {
        &self.resolver
    }

    pub fn fusion(&self) -> &RankFusionEngine {
        &self.fusion
    }
}
