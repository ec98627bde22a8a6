//! Narrows the title matches of a search down to a single provider id.

use crate::models::SearchCandidate;
use crate::ResolveError;
use tracing::debug;

pub const NO_MATCH_MESSAGE: &str = "No movie with that title";
pub const YEAR_MISMATCH_MESSAGE: &str = "Year not match";
pub const SEVERAL_MATCHES_MESSAGE: &str = "Several matches. Enter a year for clarification.";

/// Pick the id of the one movie `candidates` refers to.
///
/// A lone candidate wins regardless of `wanted_year`. With several candidates the year decides;
/// if more than one candidate carries the wanted year, the last one scanned wins.
// TODO: confirm with the service owner whether first-match was the intended tie-break.
pub fn resolve(
    candidates: &[SearchCandidate],
    wanted_year: Option<&str>,
) -> Result<String, ResolveError> {
    match (candidates, wanted_year) {
        ([], _) => Err(ResolveError::NotFound(String::from(NO_MATCH_MESSAGE))),
        ([only], _) => Ok(only.id.clone()),
        (_, Some(wanted)) => {
            let mut resolved = None;
            for candidate in candidates {
                if candidate.year() == Some(wanted) {
                    resolved = Some(&candidate.id);
                }
            }
            debug!(
                candidates = candidates.len(),
                wanted_year = wanted,
                matched = resolved.is_some(),
                "Disambiguated candidates by year."
            );
            resolved
                .cloned()
                .ok_or_else(|| ResolveError::NotFound(String::from(YEAR_MISMATCH_MESSAGE)))
        }
        (_, None) => Err(ResolveError::NotFound(String::from(
            SEVERAL_MATCHES_MESSAGE,
        ))),
    }
}
