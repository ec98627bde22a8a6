//! Turns a free-text title (and optional year) into one canonical [MovieRecord].

pub mod disambiguator;
pub mod models;
pub mod normalizer;
mod request_context;
mod resolve_error;
mod resolver;

pub use models::MovieRecord;
pub use request_context::{RequestContext, ResolveStage};
pub use resolve_error::{ResolveError, INVALID_REQUEST_MESSAGE};
pub use resolver::MovieResolver;
