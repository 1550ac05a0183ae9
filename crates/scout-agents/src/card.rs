//! Discovery card: static metadata describing the orchestrator for other
//! agents.
//!
//! Informational only. Nothing in this workspace routes requests to the
//! advertised endpoint or enforces the advertised limits.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{Agent, OrchestratorAgent, SearchMode};

/// Endpoint advertised when the deployment does not configure one.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/a2a/task";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentCard {
    pub name: String,
    pub version: String,
    pub description: String,
    pub capabilities: Capabilities,
    pub url: String,
    pub authentication: Authentication,
    pub rate_limits: RateLimits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub description: String,
    pub parameters: BTreeMap<String, ParameterSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSpec {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ParameterSpec>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParameterSpec {
    fn string(description: impl Into<String>) -> Self {
        Self {
            schema_type: "string".to_string(),
            required: None,
            enum_values: None,
            default: None,
            items: None,
            description: Some(description.into()),
        }
    }

    fn integer(description: impl Into<String>) -> Self {
        Self {
            schema_type: "integer".to_string(),
            required: None,
            enum_values: None,
            default: None,
            items: None,
            description: Some(description.into()),
        }
    }

    fn string_array(description: impl Into<String>) -> Self {
        Self {
            schema_type: "array".to_string(),
            required: None,
            enum_values: None,
            default: None,
            items: Some(Box::new(Self {
                schema_type: "string".to_string(),
                required: None,
                enum_values: None,
                default: None,
                items: None,
                description: None,
            })),
            description: Some(description.into()),
        }
    }

    fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }

    fn with_enum(mut self, values: Vec<String>) -> Self {
        self.enum_values = Some(values);
        self
    }

    fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Authentication {
    pub schemes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimits {
    pub requests_per_minute: u32,
    pub requests_per_hour: u32,
}

/// Build the discovery card for the research orchestrator.
pub fn agent_card(endpoint: impl Into<String>) -> AgentCard {
    let agent = OrchestratorAgent::new();

    let mut parameters = BTreeMap::new();
    parameters.insert(
        "query".to_string(),
        ParameterSpec::string("The main research topic or question").required(),
    );
    parameters.insert(
        "search_mode".to_string(),
        ParameterSpec::string(
            "Research strategy: 'normal' for broad search, 'url' for domain-specific, 'hybrid' for combined depth.",
        )
        .with_enum(
            SearchMode::ALL
                .iter()
                .map(|m| m.as_str().to_string())
                .collect(),
        )
        .with_default(json!(SearchMode::default().as_str())),
    );
    parameters.insert(
        "domains".to_string(),
        ParameterSpec::string_array("Optional: specific domains to focus on or restrict to."),
    );
    parameters.insert(
        "max_results_per_tool".to_string(),
        ParameterSpec::integer("Depth of results per search engine.").with_default(json!(10)),
    );

    AgentCard {
        name: "scout-research-agent".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: agent.description().to_string(),
        capabilities: Capabilities {
            skills: vec![Skill {
                name: "autonomous_research".to_string(),
                description: "Executes multi-track research using parallel search engines (Tavily, Exa) and rigorous data synthesis.".to_string(),
                parameters,
            }],
        },
        url: endpoint.into(),
        authentication: Authentication {
            schemes: vec!["bearer".to_string(), "x-api-key".to_string()],
        },
        rate_limits: RateLimits {
            requests_per_minute: 10,
            requests_per_hour: 100,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_content() {
        let card = agent_card(DEFAULT_ENDPOINT);
        assert_eq!(card.name, "scout-research-agent");
        assert_eq!(card.url, DEFAULT_ENDPOINT);
        assert_eq!(card.rate_limits.requests_per_minute, 10);
        assert_eq!(card.rate_limits.requests_per_hour, 100);
        assert_eq!(card.authentication.schemes, vec!["bearer", "x-api-key"]);

        let skill = &card.capabilities.skills[0];
        assert_eq!(skill.name, "autonomous_research");
        assert_eq!(skill.parameters["query"].required, Some(true));
        assert_eq!(
            skill.parameters["search_mode"].enum_values.as_deref(),
            Some(&["normal".to_string(), "url".to_string(), "hybrid".to_string()][..])
        );
        assert_eq!(
            skill.parameters["domains"].items.as_ref().unwrap().schema_type,
            "string"
        );
    }

    #[test]
    fn test_card_serialization_shape() {
        let card = agent_card("https://scout.example.org/a2a/task");
        let json = serde_json::to_value(&card).unwrap();

        assert_eq!(json["url"], "https://scout.example.org/a2a/task");
        assert_eq!(json["capabilities"]["skills"][0]["name"], "autonomous_research");

        let params = &json["capabilities"]["skills"][0]["parameters"];
        assert_eq!(params["search_mode"]["type"], "string");
        assert_eq!(params["search_mode"]["default"], "normal");
        assert_eq!(params["max_results_per_tool"]["default"], 10);
        assert_eq!(params["domains"]["items"]["type"], "string");
        // Optional fields stay out of the wire shape entirely
        assert!(params["domains"].get("enum").is_none());
        assert!(params["domains"]["items"].get("description").is_none());
    }

    #[test]
    fn test_card_round_trip() {
        let card = agent_card(DEFAULT_ENDPOINT);
        let encoded = serde_json::to_string(&card).unwrap();
        let decoded: AgentCard = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(decoded.capabilities.skills.len(), 1);
    }
}
