mod app;
mod commands;
mod config;
mod effects;
mod render;

use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = config::AppConfig::load(config_path.as_deref())?;

    marquee_logging::initialize(
        config.logging.destination.into(),
        marquee_logging::parse_level(&config.logging.level),
        &config.logging.file,
    );

    app::run_app(config)
}
