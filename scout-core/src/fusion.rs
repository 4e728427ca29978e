//! Merging an oracle pick with the caller's own ordering.
//!
//! The caller hands over candidates pre-sorted by local relevance. The
//! oracle's pick, when usable, goes first in the oracle's order; the rest of
//! the list fills up to the configured maximum. Whenever the oracle cannot
//! be trusted (it failed, timed out, or answered with nothing parseable) the
//! caller's top candidates are returned unchanged.

use std::fmt;
use std::sync::Arc;

use scout_config::constants::MAX_FUSION_RESULTS;
use scout_config::{FusionConfig, NoRelevantPolicy};
use scout_model::{Candidate, RankedResult};
use tracing::{debug, info, warn};

use crate::oracle::RankingOracle;
use crate::selection::{Selection, parse_selection};

/// Which branch of the fusion policy produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FusionOutcome {
    /// No candidates; the oracle was not consulted.
    EmptyInput,
    /// Oracle call failed; caller order kept.
    OracleFailed,
    /// Oracle said nothing is relevant; handled per [`NoRelevantPolicy`].
    NoneRelevant,
    /// Reply had no usable position; caller order kept.
    Unusable,
    /// Oracle pick merged with the caller order.
    Fused {
        /// Distinct candidates the oracle picked.
        selected: usize,
    },
}

/// Merges an oracle pick with the caller's candidate order.
#[derive(Clone)]
pub struct RankFusionEngine {
    oracle: Arc<dyn RankingOracle>,
    config: FusionConfig,
}

impl fmt::Debug for RankFusionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RankFusionEngine")
            .field("oracle", &self.oracle.name())
            .field("config", &self.config)
            .finish()
    }
}

impl RankFusionEngine {
    /// Engine consulting `oracle`, bounded by `config`.
    pub fn new(oracle: Arc<dyn RankingOracle>, config: FusionConfig) -> Self {
        Self { oracle, config }
    }

    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    /// Rank `candidates` for `query`. Never fails and never returns more
    /// than `max_results` entries, itself capped at [`MAX_FUSION_RESULTS`].
    pub async fn fuse(&self, candidates: &[Candidate], query: &str) -> RankedResult {
        self.fuse_with_outcome(candidates, query).await.0
    }

    /// Like [`fuse`](Self::fuse), also reporting which branch produced the
    /// result.
    pub async fn fuse_with_outcome(
        &self,
        candidates: &[Candidate],
        query: &str,
    ) -> (RankedResult, FusionOutcome) {
        if candidates.is_empty() {
            debug!(query, "no candidates to rank");
            return (RankedResult::empty(), FusionOutcome::EmptyInput);
        }

        let max = self.config.max_results.min(MAX_FUSION_RESULTS);
        let fallback = || RankedResult::collect_unique(candidates, max);

        let reply = match self.oracle.rank_query(candidates, query).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(
                    oracle = self.oracle.name(),
                    query,
                    error = %err,
                    "oracle call failed; keeping caller order"
                );
                return (fallback(), FusionOutcome::OracleFailed);
            }
        };

        match parse_selection(&reply, candidates.len()) {
            Selection::NoneRelevant => {
                let result = match self.config.no_relevant_items {
                    NoRelevantPolicy::Empty => RankedResult::empty(),
                    NoRelevantPolicy::Fallback => fallback(),
                };
                info!(
                    query,
                    policy = ?self.config.no_relevant_items,
                    returned = result.len(),
                    "oracle reported no relevant items"
                );
                (result, FusionOutcome::NoneRelevant)
            }
            Selection::Unusable => {
                warn!(
                    query,
                    reply = %reply,
                    "oracle reply had no valid positions; keeping caller order"
                );
                (fallback(), FusionOutcome::Unusable)
            }
            Selection::Picked(indices) => {
                let picked = indices.iter().filter_map(|&idx| candidates.get(idx));
                let result =
                    RankedResult::collect_unique(picked.chain(candidates), max);
                info!(
                    query,
                    selected = indices.len(),
                    returned = result.len(),
                    "fused oracle selection"
                );
                (
                    result,
                    FusionOutcome::Fused {
                        selected: indices.len(),
                    },
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::oracle::OracleError;

    enum Script {
        Reply(&'static str),
        Fail,
    }

    struct ScriptedOracle {
        script: Script,
        calls: AtomicUsize,
    }

    impl ScriptedOracle {
        fn new(script: Script) -> Arc<Self> {
            Arc::new(Self {
                script,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl RankingOracle for ScriptedOracle {
        async fn rank_query(
            &self,
            _candidates: &[Candidate],
            _query: &str,
        ) -> Result<String, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.script {
                Script::Reply(reply) => Ok(reply.to_string()),
                Script::Fail => Err(OracleError::Timeout(
                    std::time::Duration::from_secs(15),
                )),
            }
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    fn candidates(count: usize) -> Vec<Candidate> {
        (1..=count)
            .map(|n| {
                Candidate::new(
                    format!("id-{n}"),
                    format!("file-{n}.mkv"),
                    n as u64 * 1_000_000,
                    1.0 - n as f64 / 100.0,
                    n as u64,
                )
            })
            .collect()
    }

    fn idents(result: &RankedResult) -> Vec<&str> {
        result.idents().map(|ident| ident.as_str()).collect()
    }

    fn engine(oracle: Arc<ScriptedOracle>) -> RankFusionEngine {
        RankFusionEngine::new(oracle, FusionConfig::default())
    }

    #[tokio::test]
    async fn empty_input_skips_the_oracle() {
        let oracle = ScriptedOracle::new(Script::Reply("1"));
        let (result, outcome) =
            engine(oracle.clone()).fuse_with_outcome(&[], "query").await;

        assert!(result.is_empty());
        assert_eq!(outcome, FusionOutcome::EmptyInput);
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn oracle_failure_keeps_caller_top_ten() {
        let list = candidates(14);
        let (result, outcome) = engine(ScriptedOracle::new(Script::Fail))
            .fuse_with_outcome(&list, "query")
            .await;

        assert_eq!(outcome, FusionOutcome::OracleFailed);
        assert_eq!(result.as_slice(), &list[..10]);
    }

    #[tokio::test]
    async fn oracle_failure_with_short_list_returns_everything() {
        let list = candidates(3);
        let result = engine(ScriptedOracle::new(Script::Fail))
            .fuse(&list, "query")
            .await;
        assert_eq!(result.as_slice(), list.as_slice());
    }

    #[tokio::test]
    async fn picked_positions_lead_then_fill_in_original_order() {
        let list = candidates(6);
        let (result, outcome) = engine(ScriptedOracle::new(Script::Reply("2, 5, 1")))
            .fuse_with_outcome(&list, "query")
            .await;

        assert_eq!(outcome, FusionOutcome::Fused { selected: 3 });
        assert_eq!(
            idents(&result),
            ["id-2", "id-5", "id-1", "id-3", "id-4", "id-6"]
        );
    }

    #[tokio::test]
    async fn oversized_pick_is_truncated() {
        let list = candidates(15);
        let reply = "15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4";
        let result = engine(ScriptedOracle::new(Script::Reply(reply)))
            .fuse(&list, "query")
            .await;

        assert_eq!(result.len(), 10);
        assert_eq!(idents(&result)[0], "id-15");
        assert_eq!(idents(&result)[9], "id-6");
    }

    #[tokio::test]
    async fn no_relevant_items_returns_empty_by_default() {
        let list = candidates(6);
        let (result, outcome) =
            engine(ScriptedOracle::new(Script::Reply("NO_RELEVANT_ITEMS")))
                .fuse_with_outcome(&list, "query")
                .await;

        assert!(result.is_empty());
        assert_eq!(outcome, FusionOutcome::NoneRelevant);
    }

    #[tokio::test]
    async fn no_relevant_items_can_keep_fallback() {
        let list = candidates(12);
        let config = FusionConfig {
            no_relevant_items: NoRelevantPolicy::Fallback,
            ..FusionConfig::default()
        };
        let result = RankFusionEngine::new(ScriptedOracle::new(Script::Reply("")), config)
            .fuse(&list, "query")
            .await;

        assert_eq!(result.as_slice(), &list[..10]);
    }

    #[tokio::test]
    async fn unparseable_reply_keeps_caller_order() {
        let list = candidates(6);
        let (result, outcome) = engine(ScriptedOracle::new(Script::Reply("abc, xyz")))
            .fuse_with_outcome(&list, "query")
            .await;

        assert_eq!(outcome, FusionOutcome::Unusable);
        assert_eq!(result.as_slice(), list.as_slice());
    }

    #[tokio::test]
    async fn duplicate_identities_in_input_are_collapsed() {
        let mut list = candidates(4);
        list.push(list[0].clone());
        let result = engine(ScriptedOracle::new(Script::Reply("5, 1, 2")))
            .fuse(&list, "query")
            .await;

        assert_eq!(idents(&result), ["id-1", "id-2", "id-3", "id-4"]);
    }

    #[tokio::test]
    async fn custom_maximum_is_respected_on_every_path() {
        let list = candidates(8);
        let config = FusionConfig {
            max_results: 3,
            ..FusionConfig::default()
        };

        for script in [Script::Fail, Script::Reply("8, 7"), Script::Reply("??")] {
            let result = RankFusionEngine::new(ScriptedOracle::new(script), config)
                .fuse(&list, "query")
                .await;
            assert_eq!(result.len(), 3);
        }
    }

    #[tokio::test]
    async fn configured_maximum_never_exceeds_ten() {
        let list = candidates(30);
        let config = FusionConfig {
            max_results: 25,
            ..FusionConfig::default()
        };

        for script in [Script::Fail, Script::Reply("1, 2"), Script::Reply("??")] {
            let result = RankFusionEngine::new(ScriptedOracle::new(script), config)
                .fuse(&list, "query")
                .await;
            assert_eq!(result.len(), 10);
        }
    }
}
