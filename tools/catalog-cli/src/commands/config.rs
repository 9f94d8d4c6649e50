//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Path => config_path(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    ctx.output.kv("page_size", &ctx.config.api.page_size.to_string());
    match ctx.config.api.timeout_secs {
        Some(secs) => ctx.output.kv("timeout_secs", &secs.to_string()),
        None => ctx.output.kv("timeout_secs", "none"),
    }

    ctx.output.info("[images]");
    ctx.output.kv(
        "max_upload_bytes",
        &ctx.config.images.upload_limit().to_string(),
    );
    ctx.output
        .kv("search_results", &ctx.config.images.search_results.to_string());
    for pattern in &ctx.config.images.remote_patterns {
        let port = pattern.port.map(|p| format!(":{}", p)).unwrap_or_default();
        ctx.output.list_item(&format!(
            "{}://{}{}{}",
            pattern.protocol, pattern.hostname, port, pattern.pathname
        ));
    }

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = ctx.config.get_value(key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

/// Edits the file itself, so environment overrides are not written back.
fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(path) = &ctx.config_path else {
        bail!("No config file found. Run `catalog config init` to create one.");
    };

    let mut config = CliConfig::load(path)?;
    config.set_value(key, value)?;
    config.save(path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));
    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config(&ctx.config.api.base_url))?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn config_path(ctx: &Context) -> Result<()> {
    match &ctx.config_path {
        Some(path) => println!("{}", path.display()),
        None => bail!("No config file found. Run `catalog config init` to create one."),
    }
    Ok(())
}
