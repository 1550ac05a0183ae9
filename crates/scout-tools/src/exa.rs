//! Exa-backed neural search tool.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use scout_core::{Error, PropertySchema, Tool, ToolDefinition, ToolOutput, ToolParameters};

use crate::{classify_status, truncate_chars};

const DEFAULT_BASE_URL: &str = "https://api.exa.ai";
const SNIPPET_MAX_CHARS: usize = 200;
const CONTENT_MAX_CHARS: u32 = 800;
const DEFAULT_NUM_RESULTS: u32 = 10;

/// Minimal client for the Exa `/search` endpoint, always requesting page
/// text alongside the ranked results.
pub struct ExaClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl ExaClient {
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

    pub async fn search(&self, request: &ExaRequest) -> Result<ExaResponse, Error> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::auth("EXA_API_KEY is not set"))?;

        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::network(format!("Exa request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, body));
        }

        response
            .json::<ExaResponse>()
            .await
            .map_err(|e| Error::serialization(format!("Failed to parse Exa response: {e}")))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaRequest {
    pub query: String,
    pub num_results: u32,
    pub use_autoprompt: bool,
    pub contents: ExaContentsSpec,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExaContentsSpec {
    pub text: ExaTextSpec,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaTextSpec {
    pub max_characters: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExaResponse {
    #[serde(default)]
    pub results: Vec<ExaResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExaResult {
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
    #[serde(default)]
    pub text: String,
}

// =============================================================================
// Neural Search Tool
// =============================================================================

/// Embedding-ranked search returning semantically relevant pages regardless
/// of keyword overlap.
pub struct NeuralSearchTool {
    client: ExaClient,
}

impl NeuralSearchTool {
    pub fn new(client: ExaClient) -> Self {
        Self { client }
    }
}

#[derive(Deserialize)]
struct NeuralSearchArgs {
    query: String,
    #[serde(default = "default_num_results")]
    num_results: u32,
    #[serde(default = "default_use_autoprompt")]
    use_autoprompt: bool,
}

fn default_num_results() -> u32 {
    DEFAULT_NUM_RESULTS
}

fn default_use_autoprompt() -> bool {
    true
}

#[async_trait]
impl Tool for NeuralSearchTool {
    fn name(&self) -> &str {
        "search_exa"
    }

    fn description(&self) -> &str {
        "Search the web with Exa's neural/semantic ranking. Best for hidden or deep content, technical depth, and academic insights."
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description()).with_parameters(
            ToolParameters::new()
                .add_property("query", PropertySchema::string("The search query"), true)
                .add_property(
                    "num_results",
                    PropertySchema::integer("Maximum number of results to return")
                        .with_default(json!(DEFAULT_NUM_RESULTS)),
                    false,
                )
                .add_property(
                    "use_autoprompt",
                    PropertySchema::boolean("Let Exa rewrite the query for better recall")
                        .with_default(json!(true)),
                    false,
                ),
        )
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolOutput, Error> {
        let args: NeuralSearchArgs = serde_json::from_value(arguments)
            .map_err(|e| Error::tool("search_exa", format!("Invalid arguments: {e}")))?;

        info!(query = %args.query, "Exa searching");

        let request = ExaRequest {
            query: args.query.clone(),
            num_results: args.num_results,
            use_autoprompt: args.use_autoprompt,
            contents: ExaContentsSpec {
                text: ExaTextSpec {
                    max_characters: CONTENT_MAX_CHARS,
                },
            },
        };

        match self.client.search(&request).await {
            Ok(response) => Ok(ToolOutput::success(format_neural(&args.query, &response))),
            Err(e) => {
                error!("Exa error: {e}");
                Ok(ToolOutput::error(format!("Error: Exa failed ({e})")))
            }
        }
    }
}

fn format_neural(query: &str, response: &ExaResponse) -> String {
    if response.results.is_empty() {
        return format!("Notice: No Exa results for '{query}'.");
    }

    let mut formatted = String::from("**Exa Neural Data:**\n");
    for (i, r) in response.results.iter().enumerate() {
        formatted.push_str(&format!(
            "{}. {} - {}\nText: {}...\n",
            i + 1,
            r.title.as_deref().unwrap_or("Untitled"),
            r.url,
            truncate_chars(&r.text, SNIPPET_MAX_CHARS)
        ));
    }

    formatted
}
