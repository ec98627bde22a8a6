use strum_macros::AsRefStr;

/// The provider endpoints used while resolving a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Endpoint {
    /// Search by title; answers with a `results` array.
    Search,
    /// Full detail record by provider id.
    Title,
    /// Ratings by provider id; answers with an `imDb` field.
    Ratings,
}
