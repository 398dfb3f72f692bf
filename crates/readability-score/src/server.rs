//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes scoring over MCP on stdio so assistants can ask for readability
//! statistics without shelling out.
//!
//! # Architecture
//!
//! The MCP server is a presentation layer. It holds the same scorer the CLI
//! commands build from configuration; each `#[tool]` method delegates to the
//! core library and only converts errors and serializes results.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use readability_score_core::config::Config;
use readability_score_core::{
    ScoreError, ScoreRequest, SimpleWordList, SyllableProvider, TextScorer, markdown,
    minimum_age_from_us_grade,
};

use crate::commands::{self, syllables::count_words};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `score_text` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ScoreTextParams {
    /// The text to score.
    pub text: String,
    /// Hyphenation locale. Defaults to the configured locale.
    pub locale: Option<String>,
    /// Whether to reduce markdown to prose before scoring.
    #[serde(default)]
    pub strip_markdown: bool,
    /// Score a 30-sentence sample of long texts. Defaults to configuration.
    pub sample: Option<bool>,
    /// Simple words to count. Overrides the configured list.
    pub simple_words: Option<Vec<String>>,
}

/// Parameters for the `count_syllables` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CountSyllablesParams {
    /// Words to hyphenate.
    pub words: Vec<String>,
    /// Hyphenation locale. Defaults to the configured locale.
    pub locale: Option<String>,
}

/// Parameters for the `minimum_age` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct MinimumAgeParams {
    /// US grade level.
    pub grade: f64,
}

/// MCP server exposing readability scoring.
#[derive(Clone)]
pub struct ProjectServer {
    scorer: Arc<TextScorer>,
    locale: String,
    sample_long_text: bool,
    simple_words: Option<Arc<SimpleWordList>>,
    max_input_bytes: Option<usize>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Map scoring errors to MCP errors: caller mistakes are invalid params.
fn to_mcp_error(err: &ScoreError) -> McpError {
    match err {
        ScoreError::ResourceUnavailable { .. }
        | ScoreError::Encoding(_)
        | ScoreError::EmptyInput { .. } => McpError::invalid_params(err.to_string(), None),
        _ => McpError::internal_error(err.to_string(), None),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_router]
impl ProjectServer {
    /// Create a server with default configuration.
    pub fn new() -> Self {
        let config = Config::default();
        let limit = config.input_limit();
        Self::with_parts(&config, None, limit)
    }

    /// Create a server from loaded configuration.
    ///
    /// # Errors
    ///
    /// Fails when the configured simple-word list cannot be read.
    pub fn from_config(config: &Config, max_input_bytes: Option<usize>) -> anyhow::Result<Self> {
        let simple_words = commands::load_simple_words(None, config)?;
        Ok(Self::with_parts(config, simple_words, max_input_bytes))
    }

    fn with_parts(
        config: &Config,
        simple_words: Option<SimpleWordList>,
        max_input_bytes: Option<usize>,
    ) -> Self {
        Self {
            scorer: Arc::new(commands::build_scorer(config, &[])),
            locale: config.locale.clone(),
            sample_long_text: config.sample_long_text,
            simple_words: simple_words.map(Arc::new),
            max_input_bytes,
            tool_router: Self::tool_router(),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "locale": self.locale,
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}\nlocale: {}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
                self.locale,
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Compute readability statistics.
    #[tool(
        description = "Compute raw readability statistics for text: sentence, word, letter, syllable, polysyllable and simple-word counts plus per-sentence and per-word averages."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn score_text(
        &self,
        Parameters(params): Parameters<ScoreTextParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "score_text",
            strip_md = params.strip_markdown,
            "executing MCP tool"
        );

        if let Some(max) = self.max_input_bytes
            && params.text.len() > max
        {
            return Err(McpError::invalid_params(
                format!("input too large: {} bytes (limit: {max} bytes)", params.text.len()),
                None,
            ));
        }

        let request_words: Option<SimpleWordList> =
            params.simple_words.as_ref().map(|w| w.iter().collect());
        let simple_words = request_words
            .as_ref()
            .or(self.simple_words.as_deref());

        let prose;
        let text = if params.strip_markdown {
            prose = markdown::to_prose(&params.text);
            prose.as_str()
        } else {
            params.text.as_str()
        };
        let locale = params.locale.as_deref().unwrap_or(&self.locale);
        let request = ScoreRequest::new(text, locale)
            .with_simple_words(simple_words)
            .with_sampling(params.sample.unwrap_or(self.sample_long_text));

        let result = self
            .scorer
            .score(&request)
            .map_err(|e| to_mcp_error(&e))?;

        tracing::info!(
            tool = "score_text",
            words = result.word_count,
            sentences = result.sentence_count,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(&result)?)]))
    }

    /// Count syllables in individual words.
    #[tool(description = "Count syllables in words using the locale's hyphenation dictionary.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn count_syllables(
        &self,
        Parameters(params): Parameters<CountSyllablesParams>,
    ) -> Result<CallToolResult, McpError> {
        let locale = params.locale.as_deref().unwrap_or(&self.locale);
        tracing::debug!(tool = "count_syllables", %locale, "executing MCP tool");

        let splitter = self
            .scorer
            .syllable_provider()
            .splitter(locale)
            .map_err(|e| to_mcp_error(&e))?;
        let counts = count_words(&params.words, splitter.as_ref());

        tracing::info!(tool = "count_syllables", words = counts.len(), "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(to_json(&counts)?)]))
    }

    /// Convert a US grade level to a minimum reader age.
    #[tool(description = "Convert a US grade level to the minimum reader age (grade + 5, rounded half up).")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn minimum_age(
        &self,
        Parameters(params): Parameters<MinimumAgeParams>,
    ) -> Result<CallToolResult, McpError> {
        let age = minimum_age_from_us_grade(params.grade);
        let json = serde_json::json!({ "grade": params.grade, "minimum_age": age });

        tracing::info!(tool = "minimum_age", age, "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(to_json(&json)?)]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use score_text for readability statistics of prose.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
