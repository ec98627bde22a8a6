//! The list of environment variables used throughout the application.

// Provider environment variables
pub const API_KEY: &str = "MOVIEFINDER_API_KEY";
pub const SEARCH_URL: &str = "MOVIEFINDER_SEARCH_URL";
pub const TITLE_URL: &str = "MOVIEFINDER_TITLE_URL";
pub const RATINGS_URL: &str = "MOVIEFINDER_RATINGS_URL";
pub const HTTP_TIMEOUT_SECONDS: &str = "MOVIEFINDER_HTTP_TIMEOUT_SECONDS";

// Cache environment variables
pub const CACHE_BACKEND: &str = "MOVIEFINDER_CACHE_BACKEND";
pub const CACHE_DIR: &str = "MOVIEFINDER_CACHE_DIR";
pub const CACHE_TTL_SECONDS: &str = "MOVIEFINDER_CACHE_TTL_SECONDS";

// Web API environment variables
pub const WEB_HOST: &str = "MOVIEFINDER_WEB_HOST";
pub const WEB_PORT: &str = "MOVIEFINDER_WEB_PORT";

// Miscellaneous
pub const LOG_FILTER: &str = "MOVIEFINDER_LOG_FILTER";
