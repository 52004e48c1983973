pub mod logging;
pub mod session;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use descarte_agent::{GuidanceGuard, OpenAiClient};
use descarte_core::config::{AppConfig, ConfigOverrides, LoadOptions};

use crate::session::{Session, SessionSummary};

#[derive(Debug, Parser)]
#[command(
    name = "descarte",
    version,
    about = "Orientação para destinação de embalagens de defensivos agrícolas",
    long_about = "Interactive assistant that checks a pesticide packaging type against Lei nº 14.785/2023 \
                  and asks an LLM for structured disposal guidance. Type `sair` to quit.",
    after_help = "Environment:\n  OPENAI_API_KEY       provider credential (required)\n  DESCARTE_LLM_MODEL   model override\n  DESCARTE_LOG_LEVEL   trace|debug|info|warn|error"
)]
pub struct Cli {
    #[arg(long, help = "Path to a descarte.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, help = "Model identifier sent to the provider")]
    model: Option<String>,
    #[arg(long, help = "Log level written to stderr")]
    log_level: Option<String>,
}

impl Cli {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                llm_model: self.model.clone(),
                log_level: self.log_level.clone(),
                ..ConfigOverrides::default()
            },
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.load_options()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("config validation failed: {error}");
            return ExitCode::from(2);
        }
    };
    logging::init_logging(&config);

    match interactive(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("descarte: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn interactive(config: &AppConfig) -> Result<SessionSummary> {
    let client = OpenAiClient::from_config(&config.llm)?;
    let session = Session::new(GuidanceGuard::new(client));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("could not start async runtime")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    runtime
        .block_on(session.run(stdin.lock(), stdout.lock()))
        .context("terminal i/o failed")
}
