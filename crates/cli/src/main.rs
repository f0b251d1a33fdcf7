//! dropcheck CLI - drag-and-drop placement training server and client

use anyhow::{Context, Result};
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use dropcheck_core::{Config, ObjectId, Placement, ScenarioId};
use std::path::PathBuf;

mod client;
mod commands;
mod format;
mod logging;

use client::ApiClient;
use commands::{
  DropPoint, Gesture, cmd_config_init, cmd_config_show, cmd_play, cmd_scenario, cmd_scenarios, cmd_serve,
  cmd_status, cmd_validate, parse_drop_point, parse_placement,
};
use logging::{init_cli_logging, init_server_logging};

#[derive(Parser)]
#[command(name = "dropcheck")]
#[command(about = "Drag-and-drop placement training: serve scenarios and check placements")]
#[command(after_help = "\
QUICK START:
  dropcheck serve --foreground        # Serve the demo catalog on port 5000
  dropcheck scenario 1                # Show a scenario
  dropcheck play 1 --move 1:1         # Place object 1 in zone 1 and check

CONFIG LOCATIONS:
  Project: ./dropcheck.toml
  User:    ~/.config/dropcheck/config.toml")]
struct Cli {
  /// Server base URL (default: client.base_url from config)
  #[arg(long, global = true, value_name = "URL")]
  server: Option<String>,

  #[command(subcommand)]
  command: Commands,
}

/// Subcommands for `dropcheck config`
#[derive(Subcommand)]
enum ConfigCommand {
  /// Show current effective configuration
  Show,
  /// Write a default ./dropcheck.toml
  Init,
}

#[derive(Subcommand)]
enum Commands {
  /// Start the HTTP server
  Serve {
    /// JSON catalog with zones, objects and scenarios (default: built-in demo)
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,
    /// Interface to bind
    #[arg(long)]
    host: Option<String>,
    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
    /// Log to the console instead of the log file
    #[arg(long)]
    foreground: bool,
  },
  /// Show a scenario with its zones and objects
  Scenario {
    id: ScenarioId,
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
  /// List a customer's scenarios
  Scenarios {
    customer: String,
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
  /// Score placements directly
  #[command(after_help = "\
EXAMPLES:
  dropcheck validate --place 1:1 --place 2:3")]
  Validate {
    /// Placement as OBJECT:ZONE (repeatable)
    #[arg(long = "place", value_name = "OBJECT:ZONE", value_parser = parse_placement)]
    placements: Vec<Placement>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
  /// Play a scenario: replay drag gestures, then submit for checking
  #[command(after_help = "\
Gestures are applied in the order they are given.

EXAMPLES:
  dropcheck play 1 --move 1:1 --move 2:3
  dropcheck play 1 --drop 2@900,100 --remove 1
  dropcheck play 2 --catalog catalog.json --move 4:1")]
  Play {
    id: ScenarioId,
    /// Drag OBJECT onto ZONE (repeatable)
    #[arg(long = "move", value_name = "OBJECT:ZONE", value_parser = parse_placement)]
    moves: Vec<Placement>,
    /// Drag OBJECT and release it at canvas coordinates X,Y (repeatable)
    #[arg(long = "drop", value_name = "OBJECT@X,Y", value_parser = parse_drop_point)]
    drops: Vec<DropPoint>,
    /// Take a placed OBJECT back out of its zone (repeatable)
    #[arg(long = "remove", value_name = "OBJECT")]
    removes: Vec<ObjectId>,
    /// Score locally against this catalog instead of a server
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
  /// Show server status
  Status {
    /// Output as JSON
    #[arg(long)]
    json: bool,
  },
  /// Manage configuration
  Config {
    #[command(subcommand)]
    command: ConfigCommand,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  // Parse through ArgMatches so `play` can recover the order of its gestures
  let matches = Cli::command().get_matches();
  let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

  let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
  let mut config = Config::load(&cwd);
  if let Some(server) = cli.server {
    config.client.base_url = server;
  }

  // File logging for a background server, console-only for everything else
  let _guard = match &cli.command {
    Commands::Serve { foreground, .. } => init_server_logging(&config.server, *foreground),
    _ => {
      init_cli_logging();
      None
    }
  };

  let client = || ApiClient::new(&config.client).context("Failed to build HTTP client");

  match cli.command {
    Commands::Serve {
      catalog,
      host,
      port,
      foreground: _,
    } => {
      let mut server = config.server.clone();
      if let Some(catalog) = catalog {
        server.catalog = Some(catalog);
      }
      if let Some(host) = host {
        server.host = host;
      }
      if let Some(port) = port {
        server.port = port;
      }
      cmd_serve(&server).await
    }
    Commands::Scenario { id, json } => cmd_scenario(&client()?, id, json).await,
    Commands::Scenarios { customer, json } => cmd_scenarios(&client()?, &customer, json).await,
    Commands::Validate { placements, json } => cmd_validate(&client()?, &placements, json).await,
    Commands::Play {
      id,
      moves,
      drops,
      removes,
      catalog,
      json,
    } => {
      let gestures = order_gestures(matches.subcommand_matches("play"), moves, drops, removes);
      cmd_play(&client()?, catalog.as_deref(), id, &gestures, json).await
    }
    Commands::Status { json } => cmd_status(&client()?, json).await,
    Commands::Config { command } => match command {
      ConfigCommand::Show => cmd_config_show().await,
      ConfigCommand::Init => cmd_config_init().await,
    },
  }
}

/// Interleave `play` gestures by their position on the command line. Without matches the
/// gestures keep their per-kind order: moves, then drops, then removals.
fn order_gestures(
  matches: Option<&ArgMatches>,
  moves: Vec<Placement>,
  drops: Vec<DropPoint>,
  removes: Vec<ObjectId>,
) -> Vec<Gesture> {
  let mut tagged: Vec<(usize, Gesture)> = Vec::new();
  let mut push = |id: &str, gestures: Vec<Gesture>| {
    let indices: Vec<usize> = matches
      .and_then(|m| m.indices_of(id))
      .map(|i| i.collect())
      .unwrap_or_default();
    for (n, gesture) in gestures.into_iter().enumerate() {
      tagged.push((indices.get(n).copied().unwrap_or(usize::MAX), gesture));
    }
  };

  push("moves", moves.into_iter().map(Gesture::Move).collect());
  push("drops", drops.into_iter().map(Gesture::Drop).collect());
  push("removes", removes.into_iter().map(Gesture::Remove).collect());

  // Stable, so untagged gestures keep their per-kind order
  tagged.sort_by_key(|(index, _)| *index);
  tagged.into_iter().map(|(_, gesture)| gesture).collect()
}
