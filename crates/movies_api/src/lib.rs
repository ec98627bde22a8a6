//! Configuration and handling of movie lookups over HTTP.

use crate::movie_api_error::MovieApiError;
use actix_web::{web, HttpResponse};
use moviefinder_provider::ProviderClient;
use moviefinder_resolver::{MovieResolver, RequestContext, ResolveError};
use serde::Deserialize;
use tracing::debug;
use tracing_actix_web::RootSpan;

mod movie_api_error;
mod movie_finder_root_span;

pub use movie_finder_root_span::MovieFinderRootSpan;

/// The query string of `GET /movies`. Both values are free text.
#[derive(Deserialize, Debug)]
struct MovieQuery {
    title: Option<String>,
    year: Option<String>,
}

/// Configure the movie lookup endpoint.
///
/// A query string that cannot be read (a repeated `title`, for instance) is answered like a
/// missing title.
pub fn movies_config<P: ProviderClient + 'static>(cfg: &mut web::ServiceConfig) {
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "Unreadable query string.");
        MovieApiError::new("", ResolveError::InvalidRequest).into()
    });
    cfg.service(
        web::resource("/movies")
            .app_data(query_config)
            .route(web::get().to(index::<P>)),
    );
}

/// The root span is only available when the app is wrapped in `TracingLogger`.
async fn index<P: ProviderClient + 'static>(
    root_span: Option<RootSpan>,
    query: web::Query<MovieQuery>,
    resolver: web::Data<MovieResolver<P>>,
) -> Result<HttpResponse, MovieApiError> {
    let MovieQuery { title, year } = query.into_inner();
    let mut context = RequestContext::new(title.as_deref().unwrap_or_default(), year.as_deref());
    if let Some(span) = &root_span {
        span.record("movie_title", &context.normalized_title.as_str());
        if let Some(y) = &context.year {
            span.record("movie_year", &y.as_str());
        }
    }

    let result = resolver.resolve(&mut context).await;
    if let (Some(span), Some(id)) = (&root_span, &context.resolved_id) {
        span.record("movie_id", &id.as_str());
    }

    match result {
        Ok(record) => Ok(HttpResponse::Ok().json(record)),
        Err(e) => {
            debug!(stage = ?context.stage(), error = %e, "Answering with a failure response.");
            Err(MovieApiError::new(&context.raw_title, e))
        }
    }
}
