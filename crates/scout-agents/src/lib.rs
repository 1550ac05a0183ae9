//! Agent definitions and discovery metadata for scout.
//!
//! This crate provides:
//! - `Agent` trait for defining agent behavior
//! - The research orchestrator agent definition
//! - The discovery card advertised to other agents

use serde::{Deserialize, Serialize};

mod card;
mod orchestrator;

pub use card::{
    agent_card, AgentCard, Authentication, Capabilities, ParameterSpec, RateLimits, Skill,
    DEFAULT_ENDPOINT,
};
pub use orchestrator::OrchestratorAgent;

/// Trait for agents.
///
/// An agent is a static definition: a system prompt that guides an external
/// LLM runtime plus the set of tools it is allowed to call. Nothing in this
/// crate executes the prompt.
pub trait Agent: Send + Sync {
    /// Get the agent name (e.g., "research_orchestrator")
    fn name(&self) -> &str;

    /// Get the agent description for display and discovery
    fn description(&self) -> &str;

    /// Get the system prompt for this agent
    fn system_prompt(&self) -> &str;

    /// Get the tool names this agent needs
    fn tool_names(&self) -> &[&str];
}

/// Research strategy requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Broad search across the open web
    #[default]
    Normal,
    /// Results restricted to caller-supplied domains
    Url,
    /// Broad search combined with mandatory domain-restricted validation
    Hybrid,
}

impl SearchMode {
    pub const ALL: [SearchMode; 3] = [SearchMode::Normal, SearchMode::Url, SearchMode::Hybrid];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Normal => "normal",
            SearchMode::Url => "url",
            SearchMode::Hybrid => "hybrid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_mode_serialization() {
        assert_eq!(serde_json::to_string(&SearchMode::Normal).unwrap(), "\"normal\"");
        assert_eq!(serde_json::to_string(&SearchMode::Url).unwrap(), "\"url\"");
        assert_eq!(serde_json::to_string(&SearchMode::Hybrid).unwrap(), "\"hybrid\"");

        let mode: SearchMode = serde_json::from_str("\"hybrid\"").unwrap();
        assert_eq!(mode, SearchMode::Hybrid);
    }

    #[test]
    fn test_search_mode_default() {
        assert_eq!(SearchMode::default(), SearchMode::Normal);
    }

    #[test]
    fn test_search_mode_as_str_matches_wire_form() {
        for mode in SearchMode::ALL {
            let wire = serde_json::to_string(&mode).unwrap();
            assert_eq!(wire, format!("\"{}\"", mode.as_str()));
        }
    }
}
