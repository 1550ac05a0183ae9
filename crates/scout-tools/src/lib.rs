//! Search tools for scout.
//!
//! Three independent adapters normalize heterogeneous search backends behind
//! the uniform [`Tool`] interface: structured search and domain-restricted
//! search over Tavily, neural search over Exa. Each adapter issues one
//! outbound call and renders the reply as a bounded text block; backends are
//! never composed with each other.

pub mod domain;
pub mod exa;
pub mod tavily;

pub use domain::extract_domain;
pub use exa::{ExaClient, NeuralSearchTool};
pub use tavily::{DomainSearchTool, SearchDepth, StructuredSearchTool, TavilyClient};

use std::sync::Arc;

use scout_core::{Error, Tool};

/// Credentials for the search backends, injected at construction.
///
/// A `None` key is tolerated here and reported when the corresponding tool is
/// invoked.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    pub tavily_api_key: Option<String>,
    pub exa_api_key: Option<String>,
}

/// Create the full set of search tools.
pub fn create_search_tools(config: &SearchConfig) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(StructuredSearchTool::new(TavilyClient::new(
            config.tavily_api_key.clone(),
        ))),
        Arc::new(NeuralSearchTool::new(ExaClient::new(
            config.exa_api_key.clone(),
        ))),
        Arc::new(DomainSearchTool::new(TavilyClient::new(
            config.tavily_api_key.clone(),
        ))),
    ]
}

/// Truncate to at most `max` characters, respecting char boundaries.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Map an HTTP error status from a search backend to the error taxonomy.
pub(crate) fn classify_status(status: u16, body: String) -> Error {
    match status {
        401 => Error::auth(body),
        429 => Error::rate_limit(body),
        400 => Error::invalid_request(body),
        _ => Error::api(status, body),
    }
}
