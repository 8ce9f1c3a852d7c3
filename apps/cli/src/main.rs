mod config;
mod main_lib;

use config::Config;
use main_lib::{build_state, init_tracing, load_dashboard};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing();

    let state = build_state(&config)?;
    let snapshot = load_dashboard(&state, &config).await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
