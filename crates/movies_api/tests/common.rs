use async_trait::async_trait;
use lazy_static::lazy_static;
use moviefinder_provider::{Endpoint, ProviderClient, ProviderError};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

lazy_static! {
    pub static ref INCEPTION_SEARCH: Value = json!({
        "searchType": "Movie",
        "expression": "inception",
        "results": [
            { "id": "tt1375666", "title": "Inception", "description": "(2010)" },
            { "id": "tt7321322", "title": "Inception: Jump Right Into the Action", "description": "(2010) (Video)" }
        ],
        "errorMessage": ""
    });
}

pub fn inception_detail(rating: &str) -> Value {
    json!({
        "id": "tt1375666",
        "title": "Inception",
        "originalTitle": "",
        "year": "2010",
        "directors": "Christopher Nolan",
        "genres": "Action, Adventure, Sci-Fi",
        "imDbRating": rating,
        "errorMessage": ""
    })
}

/// Fake implementation of [ProviderClient] that answers from a fixed table and captures every
/// request made to it.
#[derive(Clone, Default)]
pub struct StubProvider {
    responses: HashMap<(Endpoint, String), Result<Value, ProviderError>>,
    calls: Arc<Mutex<Vec<(Endpoint, String)>>>,
}

impl StubProvider {
    pub fn new() -> Self {
        StubProvider::default()
    }

    pub fn respond(mut self, endpoint: Endpoint, param: &str, response: Result<Value, ProviderError>) -> Self {
        self.responses.insert((endpoint, String::from(param)), response);
        self
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> Vec<(Endpoint, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProviderClient for StubProvider {
    async fn call(&self, endpoint: Endpoint, param: &str) -> Result<Value, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint, String::from(param)));
        self.responses
            .get(&(endpoint, String::from(param)))
            .cloned()
            .unwrap_or(Err(ProviderError::Transient))
    }
}
