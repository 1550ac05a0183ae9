//! Tavily-backed search tools: structured broad search and domain-restricted
//! search.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, info};

use scout_core::{Error, PropertySchema, Tool, ToolDefinition, ToolOutput, ToolParameters};

use crate::domain::extract_domain;
use crate::{classify_status, truncate_chars};

const DEFAULT_BASE_URL: &str = "https://api.tavily.com";
const SNIPPET_MAX_CHARS: usize = 200;
const DEFAULT_MAX_RESULTS: u32 = 10;

/// How much work Tavily puts into a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    #[default]
    Advanced,
}

/// Minimal client for the Tavily `/search` endpoint.
pub struct TavilyClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl TavilyClient {
    /// A missing key is not an error here; it surfaces when a search is
    /// attempted, matching how a misconfigured backend behaves.
    pub fn new(api_key: Option<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn search(&self, request: &TavilyRequest) -> Result<TavilyResponse, Error> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::auth("TAVILY_API_KEY is not set"))?;

        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::network(format!("Tavily request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, body));
        }

        response
            .json::<TavilyResponse>()
            .await
            .map_err(|e| Error::serialization(format!("Failed to parse Tavily response: {e}")))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TavilyRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_depth: Option<SearchDepth>,
    pub max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_answer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_domains: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TavilyResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub results: Vec<TavilyResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TavilyResult {
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub content: String,
}

// =============================================================================
// Structured Search Tool
// =============================================================================

/// Broad keyword search with an optional synthesized quick answer.
pub struct StructuredSearchTool {
    client: TavilyClient,
}

impl StructuredSearchTool {
    pub fn new(client: TavilyClient) -> Self {
        Self { client }
    }
}

#[derive(Deserialize)]
struct StructuredSearchArgs {
    query: String,
    #[serde(default)]
    search_depth: SearchDepth,
    #[serde(default = "default_max_results")]
    max_results: u32,
}

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}

#[async_trait]
impl Tool for StructuredSearchTool {
    fn name(&self) -> &str {
        "search_tavily"
    }

    fn description(&self) -> &str {
        "Search the web with Tavily for structured results and a synthesized quick answer. Best for broad overviews, market data, and business intelligence."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameters(
            ToolParameters::new()
                .add_property("query", PropertySchema::string("The search query"), true)
                .add_property(
                    "search_depth",
                    PropertySchema::enum_string(
                        "How thorough the search should be",
                        vec!["basic".to_string(), "advanced".to_string()],
                    )
                    .with_default(json!("advanced")),
                    false,
                )
                .add_property(
                    "max_results",
                    PropertySchema::integer("Maximum number of results to return")
                        .with_default(json!(DEFAULT_MAX_RESULTS)),
                    false,
                ),
        )
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolOutput, Error> {
        let args: StructuredSearchArgs = serde_json::from_value(arguments)
            .map_err(|e| Error::tool("search_tavily", format!("Invalid arguments: {e}")))?;

        info!(query = %args.query, "Tavily searching");

        let request = TavilyRequest {
            query: args.query.clone(),
            search_depth: Some(args.search_depth),
            max_results: args.max_results,
            include_answer: Some(true),
            include_domains: None,
        };

        match self.client.search(&request).await {
            Ok(response) => Ok(ToolOutput::success(format_structured(
                &args.query,
                &response,
            ))),
            Err(e) => {
                error!("Tavily error: {e}");
                Ok(ToolOutput::error(format!("Error: Tavily failed ({e})")))
            }
        }
    }
}

fn format_structured(query: &str, response: &TavilyResponse) -> String {
    if response.results.is_empty() {
        return format!("Notice: No Tavily results for '{query}'.");
    }

    let mut formatted = String::from("**Tavily Data:**\n");
    if let Some(answer) = response.answer.as_deref().filter(|a| !a.is_empty()) {
        formatted.push_str(&format!("Quick Summary: {answer}\n"));
    }

    for (i, r) in response.results.iter().enumerate() {
        formatted.push_str(&format!(
            "{}. {} - {}\nSnippet: {}\n",
            i + 1,
            r.title,
            r.url,
            truncate_chars(&r.content, SNIPPET_MAX_CHARS)
        ));
    }

    formatted
}

// =============================================================================
// Domain-Restricted Search Tool
// =============================================================================

/// Search confined to a caller-supplied set of domains.
///
/// Raw URLs are normalized to registrable hosts before being sent as the
/// inclusion filter. The `use_tool` engine hint is accepted for schema
/// compatibility; Tavily serves every domain-restricted query.
pub struct DomainSearchTool {
    client: TavilyClient,
}

impl DomainSearchTool {
    pub fn new(client: TavilyClient) -> Self {
        Self { client }
    }
}

#[derive(Deserialize)]
struct DomainSearchArgs {
    query: String,
    urls: Vec<String>,
    #[serde(default = "default_use_tool")]
    use_tool: String,
    #[serde(default = "default_max_results")]
    max_results: u32,
}

fn default_use_tool() -> String {
    "auto".to_string()
}

#[async_trait]
impl Tool for DomainSearchTool {
    fn name(&self) -> &str {
        "search_with_urls"
    }

    fn description(&self) -> &str {
        "Search within specific URLs/domains only. Guarantees results come from the supplied sites."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameters(
            ToolParameters::new()
                .add_property("query", PropertySchema::string("The search query"), true)
                .add_property(
                    "urls",
                    PropertySchema::array(
                        "URLs or domains to restrict the search to",
                        PropertySchema::string("A URL or domain"),
                    ),
                    true,
                )
                .add_property(
                    "use_tool",
                    PropertySchema::enum_string(
                        "Engine hint",
                        vec![
                            "auto".to_string(),
                            "tavily".to_string(),
                            "exa".to_string(),
                        ],
                    )
                    .with_default(json!("auto")),
                    false,
                )
                .add_property(
                    "max_results",
                    PropertySchema::integer("Maximum number of results to return")
                        .with_default(json!(DEFAULT_MAX_RESULTS)),
                    false,
                ),
        )
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolOutput, Error> {
        let args: DomainSearchArgs = serde_json::from_value(arguments)
            .map_err(|e| Error::tool("search_with_urls", format!("Invalid arguments: {e}")))?;

        let domains: Vec<String> = args.urls.iter().map(|u| extract_domain(u)).collect();
        info!(?domains, query = %args.query, "Domain-restricted search");
        debug!(use_tool = %args.use_tool, "engine hint does not affect routing");

        let request = TavilyRequest {
            query: args.query.clone(),
            search_depth: None,
            max_results: args.max_results,
            include_answer: None,
            include_domains: Some(domains.clone()),
        };

        match self.client.search(&request).await {
            Ok(response) => Ok(ToolOutput::success(format_domain_results(
                &domains, &response,
            ))),
            Err(e) => {
                error!("Domain search error: {e}");
                Ok(ToolOutput::error(format!(
                    "Error: Domain search failed ({e})"
                )))
            }
        }
    }
}

fn format_domain_results(domains: &[String], response: &TavilyResponse) -> String {
    if response.results.is_empty() {
        return format!("Notice: No data found within domains {domains:?}.");
    }

    let mut formatted = String::from("**Targeted Domain Results:**\n");
    for r in &response.results {
        formatted.push_str(&format!(
            "- {} ({}): {}\n",
            r.title,
            r.url,
            truncate_chars(&r.content, SNIPPET_MAX_CHARS)
        ));
    }

    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str, url: &str, content: &str) -> TavilyResult {
        TavilyResult {
            title: title.to_string(),
            url: url.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_format_structured_with_answer() {
        let response = TavilyResponse {
            answer: Some("Rust is a systems language.".to_string()),
            results: vec![
                result("Rust", "https://rust-lang.org", "A language empowering everyone"),
                result("Rust Book", "https://doc.rust-lang.org/book", "The book"),
            ],
        };

        let text = format_structured("X", &response);
        assert!(text.starts_with("**Tavily Data:**\n"));
        assert_eq!(
            text.matches("Quick Summary:").count(),
            1,
            "exactly one summary line"
        );
        assert!(text.contains("1. Rust - https://rust-lang.org"));
        assert!(text.contains("2. Rust Book - https://doc.rust-lang.org/book"));
        assert!(!text.contains("3. "));
    }

    #[test]
    fn test_format_structured_without_answer() {
        let response = TavilyResponse {
            answer: None,
            results: vec![result("A", "https://a.com", "body")],
        };

        let text = format_structured("q", &response);
        assert!(!text.contains("Quick Summary:"));
        assert!(text.contains("Snippet: body"));
    }

    #[test]
    fn test_format_structured_empty() {
        let response = TavilyResponse {
            answer: None,
            results: vec![],
        };

        assert_eq!(
            format_structured("rust 2024", &response),
            "Notice: No Tavily results for 'rust 2024'."
        );
    }

    #[test]
    fn test_format_structured_truncates_snippets() {
        let long = "x".repeat(500);
        let response = TavilyResponse {
            answer: None,
            results: vec![result("Long", "https://l.com", &long)],
        };

        let text = format_structured("q", &response);
        let snippet_line = text
            .lines()
            .find(|l| l.starts_with("Snippet: "))
            .unwrap();
        assert_eq!(snippet_line.chars().count(), "Snippet: ".len() + 200);
    }

    #[test]
    fn test_format_domain_results() {
        let domains = vec!["nu.edu.eg".to_string()];
        let response = TavilyResponse {
            answer: None,
            results: vec![result("Admissions", "https://nu.edu.eg/admissions", "Apply now")],
        };

        let text = format_domain_results(&domains, &response);
        assert!(text.starts_with("**Targeted Domain Results:**\n"));
        assert!(text.contains("- Admissions (https://nu.edu.eg/admissions): Apply now"));
    }

    #[test]
    fn test_format_domain_results_empty() {
        let domains = vec!["nu.edu.eg".to_string()];
        let response = TavilyResponse {
            answer: None,
            results: vec![],
        };

        let text = format_domain_results(&domains, &response);
        assert!(text.contains("No data found within domains"));
        assert!(text.contains("nu.edu.eg"));
    }

    #[test]
    fn test_domain_args_normalize_via_extract_domain() {
        let urls = vec!["https://www.nu.edu.eg/page".to_string()];
        let domains: Vec<String> = urls.iter().map(|u| extract_domain(u)).collect();
        assert_eq!(domains, vec!["nu.edu.eg".to_string()]);
    }

    #[test]
    fn test_request_serialization() {
        let request = TavilyRequest {
            query: "X".to_string(),
            search_depth: Some(SearchDepth::Advanced),
            max_results: 2,
            include_answer: Some(true),
            include_domains: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["query"], "X");
        assert_eq!(json["search_depth"], "advanced");
        assert_eq!(json["max_results"], 2);
        assert_eq!(json["include_answer"], true);
        assert!(json.get("include_domains").is_none());
    }

    #[test]
    fn test_response_deserialization_defaults() {
        let response: TavilyResponse =
            serde_json::from_str(r#"{"results": [{"url": "https://a.com"}]}"#).unwrap();
        assert!(response.answer.is_none());
        assert_eq!(response.results[0].title, "");
        assert_eq!(response.results[0].content, "");
    }

    #[tokio::test]
    async fn test_execute_rejects_malformed_arguments() {
        let tool = StructuredSearchTool::new(TavilyClient::new(None));
        let err = tool.execute(json!({"max_results": 2})).await.unwrap_err();
        assert!(err.to_string().contains("search_tavily"));
    }

    #[tokio::test]
    async fn test_execute_missing_key_becomes_error_text() {
        let tool = StructuredSearchTool::new(TavilyClient::new(None));
        let output = tool.execute(json!({"query": "X"})).await.unwrap();
        assert!(output.is_error);
        assert!(output.content.starts_with("Error: Tavily failed ("));
        assert!(output.content.contains("TAVILY_API_KEY"));
    }

    #[tokio::test]
    async fn test_execute_unreachable_backend_becomes_error_text() {
        let client =
            TavilyClient::new(Some("tvly-test".to_string())).with_base_url("http://127.0.0.1:9");
        let tool = StructuredSearchTool::new(client);
        let output = tool.execute(json!({"query": "X"})).await.unwrap();
        assert!(output.is_error);
        assert!(output.content.starts_with("Error: Tavily failed ("));
    }

    #[tokio::test]
    async fn test_domain_execute_missing_key_becomes_error_text() {
        let tool = DomainSearchTool::new(TavilyClient::new(None));
        let output = tool
            .execute(json!({"query": "X", "urls": ["https://www.nu.edu.eg/page"]}))
            .await
            .unwrap();
        assert!(output.is_error);
        assert!(output.content.starts_with("Error: Domain search failed ("));
    }
}
