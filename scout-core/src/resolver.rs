//! Cascading metadata resolution.
//!
//! Each content kind has its own ordered adapter list. Adapters are awaited
//! one at a time and the first non-empty record wins; later adapters are
//! never called.

use std::fmt;
use std::sync::Arc;

use scout_config::Config;
use scout_model::{ContentKind, ContentRef, MetadataRecord};
use tracing::{debug, info};

use crate::providers::{CinemetaProvider, MetadataProvider, TmdbProvider};

/// Ordered metadata adapters per content kind.
#[derive(Clone, Default)]
pub struct MetadataResolver {
    movie: Vec<Arc<dyn MetadataProvider>>,
    series: Vec<Arc<dyn MetadataProvider>>,
}

fn provider_names(list: &[Arc<dyn MetadataProvider>]) -> Vec<&'static str> {
    list.iter().map(|p| p.name()).collect()
}

impl fmt::Debug for MetadataResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataResolver")
            .field("movie", &provider_names(&self.movie))
            .field("series", &provider_names(&self.series))
            .finish()
    }
}

impl MetadataResolver {
    /// Start registering adapters.
    pub fn builder() -> MetadataResolverBuilder {
        MetadataResolverBuilder::default()
    }

    /// TMDB first, Cinemeta as fallback, for both kinds. The adapters share
    /// one HTTP client.
    pub fn from_config(config: &Config) -> Self {
        let http = reqwest::Client::new();
        let tmdb: Arc<dyn MetadataProvider> =
            Arc::new(TmdbProvider::with_client(&config.tmdb, http.clone()));
        let cinemeta: Arc<dyn MetadataProvider> =
            Arc::new(CinemetaProvider::with_client(&config.cinemeta, http));

        Self::builder().both(tmdb).both(cinemeta).build()
    }

    /// Adapters consulted for `kind`, in cascade order.
    pub fn providers(&self, kind: ContentKind) -> &[Arc<dyn MetadataProvider>] {
        match kind {
            ContentKind::Movie => &self.movie,
            ContentKind::Series => &self.series,
        }
    }

    /// Resolve using the kind string handed over by the host.
    ///
    /// Kinds other than `movie` and `series` resolve to `None` without
    /// touching any adapter.
    pub async fn resolve(
        &self,
        kind: &str,
        external_id: &str,
    ) -> Option<MetadataRecord> {
        let Some(kind) = ContentKind::parse(kind) else {
            debug!(kind, id = external_id, "unrecognized content kind");
            return None;
        };
        self.resolve_kind(kind, external_id).await
    }

    pub async fn resolve_ref(&self, content: &ContentRef) -> Option<MetadataRecord> {
        self.resolve_kind(content.kind, &content.external_id).await
    }

    /// Run the cascade for an already-parsed kind.
    pub async fn resolve_kind(
        &self,
        kind: ContentKind,
        external_id: &str,
    ) -> Option<MetadataRecord> {
        debug!(%kind, id = external_id, "resolving metadata");

        for provider in self.providers(kind) {
            if let Some(record) = provider.lookup(kind, external_id).await
                && !record.is_empty()
            {
                info!(
                    provider = provider.name(),
                    %kind,
                    id = external_id,
                    name = %record.name,
                    "metadata resolved"
                );
                return Some(record);
            }
        }

        debug!(%kind, id = external_id, "no provider produced metadata");
        None
    }
}

/// Registers adapters per kind. Order of registration is cascade order.
#[derive(Default)]
pub struct MetadataResolverBuilder {
    movie: Vec<Arc<dyn MetadataProvider>>,
    series: Vec<Arc<dyn MetadataProvider>>,
}

impl MetadataResolverBuilder {
    pub fn movie(mut self, provider: Arc<dyn MetadataProvider>) -> Self {
        self.movie.push(provider);
        self
    }

    pub fn series(mut self, provider: Arc<dyn MetadataProvider>) -> Self {
        self.series.push(provider);
        self
    }

    /// Register `provider` for movies and series alike.
    pub fn both(self, provider: Arc<dyn MetadataProvider>) -> Self {
        self.movie(Arc::clone(&provider)).series(provider)
    }

    pub fn build(self) -> MetadataResolver {
        MetadataResolver {
            movie: self.movie,
            series: self.series,
        }
    }
}

impl fmt::Debug for MetadataResolverBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataResolverBuilder")
            .field("movie", &provider_names(&self.movie))
            .field("series", &provider_names(&self.series))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;

    struct StubProvider {
        name: &'static str,
        answer: Option<MetadataRecord>,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn new(name: &'static str, answer: Option<MetadataRecord>) -> Arc<Self> {
            Arc::new(Self {
                name,
                answer,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MetadataProvider for StubProvider {
        async fn lookup(
            &self,
            _kind: ContentKind,
            _external_id: &str,
        ) -> Option<MetadataRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone()
        }

        fn name(&self) -> &'static str {
            self.name
        }
    }

    fn record(name: &str) -> MetadataRecord {
        MetadataRecord::movie(name, None)
    }

    #[tokio::test]
    async fn primary_hit_short_circuits_fallback() {
        let primary = StubProvider::new("primary", Some(record("Amélie")));
        let fallback = StubProvider::new("fallback", Some(record("Other")));
        let resolver = MetadataResolver::builder()
            .both(primary.clone())
            .both(fallback.clone())
            .build();

        let resolved = resolver.resolve("movie", "tt0211915").await;

        assert_eq!(resolved.map(|r| r.name), Some("Amélie".to_string()));
        assert_eq!(primary.calls(), 1);
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn primary_miss_falls_through_in_order() {
        let primary = StubProvider::new("primary", None);
        let fallback = StubProvider::new("fallback", Some(record("Fallback")));
        let resolver = MetadataResolver::builder()
            .both(primary.clone())
            .both(fallback.clone())
            .build();

        let resolved = resolver.resolve_kind(ContentKind::Movie, "tt1").await;

        assert_eq!(resolved.map(|r| r.name), Some("Fallback".to_string()));
        assert_eq!(primary.calls(), 1);
        assert_eq!(fallback.calls(), 1);
    }

    #[tokio::test]
    async fn empty_named_record_does_not_stop_the_cascade() {
        let primary = StubProvider::new("primary", Some(record("   ")));
        let fallback = StubProvider::new("fallback", Some(record("Named")));
        let resolver = MetadataResolver::builder()
            .both(primary)
            .both(fallback.clone())
            .build();

        let resolved = resolver.resolve("movie", "tt1").await;

        assert_eq!(resolved.map(|r| r.name), Some("Named".to_string()));
        assert_eq!(fallback.calls(), 1);
    }

    #[tokio::test]
    async fn all_misses_resolve_to_none() {
        let primary = StubProvider::new("primary", None);
        let fallback = StubProvider::new("fallback", None);
        let resolver = MetadataResolver::builder()
            .both(primary.clone())
            .both(fallback.clone())
            .build();

        assert!(resolver.resolve("series", "tt1:1:1").await.is_none());
        assert_eq!(primary.calls(), 1);
        assert_eq!(fallback.calls(), 1);
    }

    #[tokio::test]
    async fn unknown_kind_never_touches_providers() {
        let provider = StubProvider::new("primary", Some(record("Anything")));
        let resolver = MetadataResolver::builder().both(provider.clone()).build();

        for kind in ["channel", "tv", "", "MOVIES"] {
            assert!(resolver.resolve(kind, "tt1").await.is_none());
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn kinds_use_their_own_cascade() {
        let movie_only = StubProvider::new("movie-only", Some(record("Movie")));
        let series_only = StubProvider::new("series-only", None);
        let resolver = MetadataResolver::builder()
            .movie(movie_only.clone())
            .series(series_only.clone())
            .build();

        assert!(resolver.resolve("series", "tt1:1:2").await.is_none());
        assert_eq!(movie_only.calls(), 0);
        assert_eq!(series_only.calls(), 1);

        let content = ContentRef::new(ContentKind::Movie, "tt1");
        assert!(resolver.resolve_ref(&content).await.is_some());
        assert_eq!(movie_only.calls(), 1);
    }
}
