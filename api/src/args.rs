use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use nutrisnap_core::{
    domain::common::{LLMConfig, MealLogBackend, MealLogConfig, NutrisnapConfig},
    infrastructure::llm::gemini_client::DEFAULT_GEMINI_BASE_URL,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "nutrisnap-api", version, about = "NutriSnap food photo nutrition API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LLMArgs,

    #[command(flatten)]
    pub meal_log: MealLogArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix for every route, e.g. `/api`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000,http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LLMArgs {
    #[arg(
        long = "gemini-api-key",
        env = "GEMINI_API_KEY",
        default_value = "",
        hide_env_values = true
    )]
    pub gemini_api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub gemini_model: String,

    #[arg(long = "gemini-base-url", env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,

    #[arg(long = "scan-temperature", env = "SCAN_TEMPERATURE", default_value_t = 0.1)]
    pub scan_temperature: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MealLogBackendArg {
    File,
    Memory,
}

impl From<MealLogBackendArg> for MealLogBackend {
    fn from(value: MealLogBackendArg) -> Self {
        match value {
            MealLogBackendArg::File => MealLogBackend::File,
            MealLogBackendArg::Memory => MealLogBackend::Memory,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct MealLogArgs {
    #[arg(
        long = "meal-log-backend",
        env = "MEAL_LOG_BACKEND",
        value_enum,
        default_value_t = MealLogBackendArg::File
    )]
    pub backend: MealLogBackendArg,

    #[arg(long = "meal-log-path", env = "MEAL_LOG_PATH", default_value = "nutrisnap-meal-log.json")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    /// `tracing` env-filter directives.
    #[arg(
        long = "log-filter",
        env = "LOG_FILTER",
        default_value = "info,nutrisnap_api=debug,nutrisnap_core=debug"
    )]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for NutrisnapConfig {
    fn from(args: Args) -> Self {
        NutrisnapConfig {
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_base_url,
                scan_temperature: args.llm.scan_temperature,
            },
            meal_log: MealLogConfig {
                backend: args.meal_log.backend.into(),
                path: args.meal_log.path,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_map_to_core_config() {
        let args = Args::parse_from([
            "nutrisnap-api",
            "--gemini-api-key",
            "secret",
            "--gemini-model",
            "gemini-1.5-pro",
            "--scan-temperature",
            "0.3",
            "--meal-log-backend",
            "memory",
            "--meal-log-path",
            "/tmp/meals.json",
            "--allowed-origins",
            "http://a.test,http://b.test",
        ]);

        assert_eq!(args.server.allowed_origins, vec!["http://a.test", "http://b.test"]);

        let config = NutrisnapConfig::from(args);
        assert_eq!(config.llm.gemini_api_key, "secret");
        assert_eq!(config.llm.gemini_model, "gemini-1.5-pro");
        assert!((config.llm.scan_temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.meal_log.backend, MealLogBackend::Memory);
        assert_eq!(config.meal_log.path, PathBuf::from("/tmp/meals.json"));
    }
}
