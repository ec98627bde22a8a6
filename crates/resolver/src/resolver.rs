//! Drives one resolution through search, disambiguation, detail fetch and the optional rating
//! fallback.

use crate::disambiguator;
use crate::models::{MovieDetail, MovieRecord, Ratings, SearchCandidate, SearchResults};
use crate::normalizer::normalize;
use crate::{RequestContext, ResolveError, ResolveStage};
use moviefinder_provider::{Endpoint, ProviderClient, TRANSIENT_FAILURE_MESSAGE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Resolves titles against a [ProviderClient]. Cheap to share between requests; each resolution
/// keeps its state in its own [RequestContext].
#[derive(Debug, Clone)]
pub struct MovieResolver<P: ProviderClient> {
    provider: P,
}

impl<P: ProviderClient> MovieResolver<P> {
    pub fn new(provider: P) -> Self {
        MovieResolver { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolve the title held by `context` into a [MovieRecord].
    ///
    /// On return the context is either [ResolveStage::Done] or [ResolveStage::Failed], with the
    /// error recorded in the latter case.
    pub async fn resolve(&self, context: &mut RequestContext) -> Result<MovieRecord, ResolveError> {
        match self.run(context).await {
            Ok(record) => {
                context.advance(ResolveStage::Done);
                info!(movie_id = ?context.resolved_id, "Resolved movie.");
                Ok(record)
            }
            Err(e) => {
                debug!(error = ?e, stage = ?context.stage(), "Resolution failed.");
                Err(context.fail(e))
            }
        }
    }

    async fn run(&self, context: &mut RequestContext) -> Result<MovieRecord, ResolveError> {
        if context.normalized_title.is_empty() {
            return Err(ResolveError::InvalidRequest);
        }

        context.advance(ResolveStage::Searching);
        let candidates = self.search(&context.normalized_title).await?;

        context.advance(ResolveStage::Disambiguating);
        let id = disambiguator::resolve(&candidates, context.year.as_deref())?;
        context.resolved_id = Some(id.clone());

        context.advance(ResolveStage::FetchingDetail);
        let mut detail = self.fetch_detail(&id).await?;
        if !detail.has_rating() {
            context.advance(ResolveStage::FetchingRating);
            detail.rating_raw = self.fetch_rating(&id).await;
        }

        context.advance(ResolveStage::Assembling);
        MovieRecord::try_from(detail)
    }

    /// Search by title and keep only the candidates whose title matches exactly once normalized.
    async fn search(&self, normalized_title: &str) -> Result<Vec<SearchCandidate>, ResolveError> {
        let value = self.provider.call(Endpoint::Search, normalized_title).await?;
        let results: SearchResults = decode(Endpoint::Search, value)?;
        let total = results.results.len();
        let candidates: Vec<SearchCandidate> = results
            .results
            .into_iter()
            .filter(|c| normalize(&c.title) == normalized_title)
            .collect();
        debug!(
            results = total,
            candidates = candidates.len(),
            "Filtered search results by title."
        );

        Ok(candidates)
    }

    /// Any failure here means the movie cannot be reported, so it is classified as not found.
    async fn fetch_detail(&self, id: &str) -> Result<MovieDetail, ResolveError> {
        let value = self
            .provider
            .call(Endpoint::Title, id)
            .await
            .map_err(|e| ResolveError::NotFound(e.to_string()))?;

        decode(Endpoint::Title, value)
            .map_err(|_| ResolveError::NotFound(String::from(TRANSIENT_FAILURE_MESSAGE)))
    }

    /// Never fails; a rating that cannot be fetched comes back empty and is later read as zero.
    async fn fetch_rating(&self, id: &str) -> String {
        let result = match self.provider.call(Endpoint::Ratings, id).await {
            Ok(value) => decode::<Ratings>(Endpoint::Ratings, value),
            Err(e) => Err(e.into()),
        };
        match result {
            Ok(ratings) => ratings.imdb,
            Err(e) => {
                warn!(movie_id = id, error = ?e, "Rating fallback failed; defaulting the rating.");
                String::new()
            }
        }
    }
}

fn decode<T: DeserializeOwned>(endpoint: Endpoint, value: Value) -> Result<T, ResolveError> {
    serde_json::from_value(value).map_err(|e| {
        warn!(
            provider.endpoint = endpoint.as_ref(),
            error = %e,
            "Provider response has an unexpected shape."
        );
        ResolveError::Transient
    })
}
