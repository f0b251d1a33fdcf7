//! Config commands

use anyhow::{Context, Result, bail};
use dropcheck_core::Config;

/// Show the effective configuration and where it came from
pub async fn cmd_config_show() -> Result<()> {
  let cwd = std::env::current_dir()?;
  let config = Config::load(&cwd);

  let project_config = Config::project_config_path(&cwd);
  let user_config = Config::user_config_path();

  if project_config.exists() {
    println!("Using project config: {:?}", project_config);
  } else if let Some(ref user_path) = user_config
    && user_path.exists()
  {
    println!("Using user config: {:?}", user_path);
  } else {
    println!("Using default configuration (no config file found)");
  }
  println!();

  let toml_str = toml::to_string_pretty(&config)?;
  println!("{}", toml_str);

  Ok(())
}

/// Write a commented default config to ./dropcheck.toml
pub async fn cmd_config_init() -> Result<()> {
  let cwd = std::env::current_dir()?;
  let config_path = Config::project_config_path(&cwd);

  if config_path.exists() {
    bail!(
      "Config file already exists: {:?}. Delete it first if you want to regenerate",
      config_path
    );
  }

  std::fs::write(&config_path, Config::generate_template())
    .with_context(|| format!("Failed to write {:?}", config_path))?;

  println!("Created project config: {:?}", config_path);
  println!("Edit the file to customize settings.");

  Ok(())
}
