//! kino-blog binary: opens the blog database, creating the schema if needed,
//! and optionally seeds the demo dataset and runs the tag-assignment job.

mod config;

use kino_blog::{Blog, BlogError};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, StartupConfig};

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("KINO_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Runs the configured startup jobs against an open blog.
fn run_startup(blog: &Blog, startup: &StartupConfig) -> Result<(), BlogError> {
    if startup.seed {
        if blog.is_empty()? {
            blog.seed()?;
        } else {
            tracing::info!("database already has data, skipping seed");
        }
    }

    if startup.assign_tags {
        blog.assign_tags()?;
    }

    Ok(())
}

fn main() {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("config.toml"));

    let config = config::load_config(selected_config_path)
        .expect("failed to load configuration — check the config file syntax");

    init_tracing(&config);

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        "resolved startup configuration path"
    );

    let blog = Blog::open(&config.database.path, config.database.runtime_settings())
        .expect("failed to open blog database — check database.path in config");

    tracing::info!(path = %config.database.path, "blog database ready");

    if let Err(err) = run_startup(&blog, &config.startup) {
        tracing::error!(error = %err, "startup job failed");
        std::process::exit(1);
    }
}
