mod ui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use courier_engine::{Agent, Config, OllamaModel};
use courier_shared::{ToolBox, toolbelts};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(
    name = "courier",
    version,
    about = "Tool-calling agent backed by a local Ollama model"
)]
struct Cli {
    /// Config file (defaults to ~/.config/courier/config.json)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Ollama base URL
    #[arg(long)]
    endpoint: Option<String>,
    #[arg(long)]
    model: Option<String>,
    /// Leave the Bangkok weather tool out of the catalogue
    #[arg(long)]
    no_weather: bool,
    /// Ask a single question and exit
    prompt: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    debug!(?config, "Loaded config");

    let toolbox = ToolBox::from_tools(&toolbelts::get_tools(config.weather))?;
    let backend = OllamaModel::from_config(&config)?;
    let agent = Agent::new(toolbox, backend);

    if cli.prompt.is_empty() {
        ui::interactive(&agent).await
    } else {
        ui::single_prompt(&agent, &cli.prompt.join(" ")).await
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    config.apply_env()?;

    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    if cli.no_weather {
        config.weather = false;
    }
    Ok(config)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}
