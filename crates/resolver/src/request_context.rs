use crate::normalizer::normalize;
use crate::ResolveError;
use tracing::debug;

/// Where a resolution currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStage {
    Idle,
    Searching,
    Disambiguating,
    FetchingDetail,
    /// Only entered when the detail record has no rating.
    FetchingRating,
    Assembling,
    Done,
    Failed,
}

/// State for a single resolution. Owned by whoever drives the resolution and discarded once it
/// finishes; nothing here is shared between requests.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub raw_title: String,
    pub normalized_title: String,
    /// Normalized; an empty year counts as no year.
    pub year: Option<String>,
    pub resolved_id: Option<String>,
    error: Option<ResolveError>,
    stage: ResolveStage,
}

impl RequestContext {
    pub fn new(raw_title: &str, raw_year: Option<&str>) -> Self {
        RequestContext {
            raw_title: String::from(raw_title),
            normalized_title: normalize(raw_title),
            year: raw_year.map(normalize).filter(|y| !y.is_empty()),
            resolved_id: None,
            error: None,
            stage: ResolveStage::Idle,
        }
    }

    pub fn stage(&self) -> ResolveStage {
        self.stage
    }

    pub fn error(&self) -> Option<&ResolveError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub(crate) fn advance(&mut self, next: ResolveStage) {
        debug!(from = ?self.stage, to = ?next, "Resolution stage changed.");
        self.stage = next;
    }

    /// Record `error` as the outcome. Only the first error is kept.
    pub(crate) fn fail(&mut self, error: ResolveError) -> ResolveError {
        self.advance(ResolveStage::Failed);
        if self.error.is_none() {
            self.error = Some(error.clone());
        }
        error
    }
}
