use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use scout_agents::{agent_card, Agent, OrchestratorAgent, DEFAULT_ENDPOINT};
use scout_core::ToolRegistry;
use scout_tools::create_search_tools;

mod config;

use config::Config;

/// Log level for tracing output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Most verbose: all tracing
    Trace,
    /// Verbose: request/response details
    Debug,
    /// Standard: one line per outbound search
    Info,
    /// Quiet: only warnings and errors
    Warn,
    /// Minimal: only errors
    Error,
}

impl LogLevel {
    fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Parser)]
#[command(name = "scout")]
#[command(author, version, about = "Scout: research-agent search toolkit", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Write JSON logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Config file path (default: ~/.config/scout/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one of the search tools
    Search {
        #[command(subcommand)]
        backend: SearchBackend,
    },
    /// Print the agent discovery card as JSON
    Card,
    /// Print the registered tool definitions as JSON
    Tools,
    /// Print the orchestrator system prompt
    Prompt,
}

#[derive(Subcommand)]
enum SearchBackend {
    /// Structured web search with a synthesized quick answer
    Tavily {
        /// The search query
        #[arg(short, long)]
        query: String,

        /// Search depth (basic or advanced)
        #[arg(long, default_value = "advanced")]
        depth: String,

        /// Maximum number of results
        #[arg(long, default_value_t = 10)]
        max_results: u32,
    },
    /// Neural/semantic search
    Exa {
        /// The search query
        #[arg(short, long)]
        query: String,

        /// Maximum number of results
        #[arg(long, default_value_t = 10)]
        num_results: u32,

        /// Disable query autoprompting
        #[arg(long)]
        no_autoprompt: bool,
    },
    /// Search restricted to specific domains
    Domains {
        /// The search query
        #[arg(short, long)]
        query: String,

        /// URL or domain to include (repeatable)
        #[arg(short, long = "url", required = true)]
        urls: Vec<String>,

        /// Engine hint (auto, tavily, exa)
        #[arg(long, default_value = "auto")]
        engine: String,

        /// Maximum number of results
        #[arg(long, default_value_t = 10)]
        max_results: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::new(cli.log_level.as_filter());
    if let Some(log_path) = &cli.log_file {
        let file = std::fs::File::create(log_path)
            .with_context(|| format!("Failed to create log file: {log_path:?}"))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::sync::Mutex::new(file)))
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match &cli.command {
        Commands::Search { backend } => run_search(&config, backend).await,
        Commands::Card => print_card(&config),
        Commands::Tools => print_tools(&config),
        Commands::Prompt => print_prompt(),
    }
}

fn build_registry(config: &Config) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    for tool in create_search_tools(&config.resolved_search()) {
        registry.register(tool);
    }
    tracing::debug!(tools = registry.len(), "Registered search tools");
    registry
}

async fn run_search(config: &Config, backend: &SearchBackend) -> Result<()> {
    let registry = build_registry(config);

    let (name, arguments) = match backend {
        SearchBackend::Tavily {
            query,
            depth,
            max_results,
        } => (
            "search_tavily",
            json!({
                "query": query,
                "search_depth": depth,
                "max_results": max_results,
            }),
        ),
        SearchBackend::Exa {
            query,
            num_results,
            no_autoprompt,
        } => (
            "search_exa",
            json!({
                "query": query,
                "num_results": num_results,
                "use_autoprompt": !no_autoprompt,
            }),
        ),
        SearchBackend::Domains {
            query,
            urls,
            engine,
            max_results,
        } => (
            "search_with_urls",
            json!({
                "query": query,
                "urls": urls,
                "use_tool": engine,
                "max_results": max_results,
            }),
        ),
    };

    let tool = registry
        .get(name)
        .with_context(|| format!("Unknown tool: {name}"))?;
    let output = tool.execute(arguments).await?;

    println!("{}", output.content);
    if output.is_error {
        std::process::exit(1);
    }
    Ok(())
}

fn print_card(config: &Config) -> Result<()> {
    let endpoint = config
        .card
        .endpoint
        .clone()
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let card = agent_card(endpoint);
    println!("{}", serde_json::to_string_pretty(&card)?);
    Ok(())
}

fn print_tools(config: &Config) -> Result<()> {
    let registry = build_registry(config);
    println!("{}", serde_json::to_string_pretty(&registry.definitions())?);
    Ok(())
}

fn print_prompt() -> Result<()> {
    let agent = OrchestratorAgent::new();
    println!("{}", agent.system_prompt());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_orchestrator_tools() {
        let registry = build_registry(&Config::default());
        let agent = OrchestratorAgent::new();
        for name in agent.tool_names() {
            assert!(
                registry.get(name).is_some(),
                "orchestrator declares {name} but the registry does not provide it"
            );
        }
    }

    #[test]
    fn test_cli_parses_domain_search() {
        let cli = Cli::try_parse_from([
            "scout",
            "search",
            "domains",
            "--query",
            "admissions",
            "--url",
            "https://www.nu.edu.eg/page",
            "--url",
            "www.mit.edu",
        ])
        .unwrap();

        match cli.command {
            Commands::Search {
                backend: SearchBackend::Domains { urls, engine, .. },
            } => {
                assert_eq!(urls.len(), 2);
                assert_eq!(engine, "auto");
            }
            _ => panic!("expected domain search"),
        }
    }

    #[test]
    fn test_cli_requires_url_for_domain_search() {
        let result = Cli::try_parse_from(["scout", "search", "domains", "--query", "q"]);
        assert!(result.is_err());
    }
}
