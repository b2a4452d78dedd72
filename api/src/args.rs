use std::time::Duration;

use clap::{Args as ClapArgs, Parser, ValueEnum};
use mealplanner_core::domain::common::{
    GenerationConfig, LLMConfig, LlmProvider, MealPlannerConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "mealplanner", version, about = "Personalized 7-day meal planner")]
pub struct Args {
    #[command(flatten)]
    pub log: LogArgs,

    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3333"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    Openai,
    Anthropic,
}

impl From<ProviderArg> for LlmProvider {
    fn from(value: ProviderArg) -> Self {
        match value {
            ProviderArg::Openai => LlmProvider::OpenAI,
            ProviderArg::Anthropic => LlmProvider::Anthropic,
        }
    }
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "llm-provider", env = "LLM_PROVIDER", value_enum, default_value = "openai")]
    pub provider: ProviderArg,

    #[arg(long = "openai-api-key", env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long = "openai-model", env = "OPENAI_MODEL", default_value = "gpt-3.5-turbo")]
    pub openai_model: String,

    #[arg(
        long = "openai-base-url",
        env = "OPENAI_BASE_URL",
        default_value = "https://api.openai.com"
    )]
    pub openai_base_url: String,

    #[arg(long = "anthropic-api-key", env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub anthropic_api_key: Option<String>,

    #[arg(
        long = "anthropic-model",
        env = "ANTHROPIC_MODEL",
        default_value = "claude-3-sonnet-20240229"
    )]
    pub anthropic_model: String,

    #[arg(
        long = "anthropic-base-url",
        env = "ANTHROPIC_BASE_URL",
        default_value = "https://api.anthropic.com"
    )]
    pub anthropic_base_url: String,

    /// Seconds before an in-flight provider call is abandoned.
    #[arg(long = "llm-timeout-secs", env = "LLM_TIMEOUT_SECS", default_value_t = 120)]
    pub timeout_secs: u64,

    /// Surface invalid model output immediately instead of re-prompting once.
    #[arg(long = "disable-correction", env = "LLM_DISABLE_CORRECTION", default_value_t = false)]
    pub disable_correction: bool,
}

impl From<Args> for MealPlannerConfig {
    fn from(args: Args) -> Self {
        MealPlannerConfig {
            llm: LLMConfig {
                provider: args.llm.provider.into(),
                openai_api_key: args.llm.openai_api_key,
                openai_model: args.llm.openai_model,
                openai_base_url: args.llm.openai_base_url,
                anthropic_api_key: args.llm.anthropic_api_key,
                anthropic_model: args.llm.anthropic_model,
                anthropic_base_url: args.llm.anthropic_base_url,
                request_timeout: Duration::from_secs(args.llm.timeout_secs),
            },
            generation: GenerationConfig {
                correct_invalid_output: !args.llm.disable_correction,
            },
        }
    }
}
