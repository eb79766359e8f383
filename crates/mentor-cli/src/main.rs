//! `mentor`: command-line client for the Mentor learning assistant.
//!
//! # Usage
//!
//! ```text
//! mentor start --subject Python --days 7
//! mentor explain "list comprehensions" --module 2
//! mentor --config ~/.config/mentor/cli.toml notes 2 --query loops
//! ```

mod client;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://127.0.0.1:8000";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "mentor", about = "Command-line client for the Mentor learning assistant")]
struct Args {
  /// Path to a TOML config file (url, timeout_secs).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the mentor server (default: http://127.0.0.1:8000).
  #[arg(long, env = "MENTOR_URL")]
  url: Option<String>,

  /// Print raw JSON instead of formatted text.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Generate a new study plan and make it current.
  Start {
    #[arg(long)]
    subject: String,
    #[arg(long, default_value = "beginner")]
    level:   String,
    #[arg(long, default_value_t = 7)]
    days:    u32,
    #[arg(long)]
    name:    Option<String>,
  },
  /// Print the current study plan.
  Plan,
  /// Explain a topic in depth.
  Explain {
    topic:  String,
    #[arg(long, default_value_t = 0)]
    module: i64,
  },
  /// Ask the tutor a question.
  Ask {
    question: String,
    #[arg(long, default_value_t = 0)]
    module:   i64,
  },
  /// Generate a quiz for a module.
  Quiz {
    #[arg(long, default_value_t = 0)]
    module:    i64,
    #[arg(long, default_value_t = 5)]
    questions: u32,
  },
  /// A short learning card for a topic.
  Brief { topic: String },
  /// List (or search) the notes kept for a module.
  Notes {
    module: i64,
    #[arg(long)]
    query:  Option<String>,
  },
  /// List the resources saved for a module.
  Resources { module: i64 },
  /// Save a resource link for a module.
  AddResource {
    module:  i64,
    #[arg(long)]
    title:   String,
    #[arg(long)]
    url:     String,
    #[arg(long)]
    snippet: Option<String>,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:          String,
  #[serde(default)]
  timeout_secs: Option<u64>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url:     args
      .url
      .clone()
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| DEFAULT_URL.to_string()),
    timeout_secs: file_cfg.timeout_secs.unwrap_or(120),
  };

  let client = ApiClient::new(api_config)?;
  run(&client, args.command, args.json).await
}

async fn run(client: &ApiClient, command: Command, json: bool) -> Result<()> {
  match command {
    Command::Start { subject, level, days, name } => {
      let started = client.start(&subject, &level, days, name.as_deref()).await?;
      if json {
        return print_json(&started);
      }
      let s = &started.summary;
      println!("{} ({}, {} modules)\n", s.theme, s.level, s.total_modules);
      print!("{}", render::plan(&started.study_plan));
    }
    Command::Plan => {
      let plan = client.plan().await?;
      if json {
        return print_json(&plan);
      }
      print!("{}", render::plan(&plan));
    }
    Command::Explain { topic, module } => {
      let ex = client.explain(&topic, module).await?;
      if json {
        return print_json(&ex);
      }
      println!("{}", ex.explanation_md);
    }
    Command::Ask { question, module } => {
      let answer = client.ask(&question, module).await?;
      if json {
        return print_json(&answer);
      }
      println!("{}", answer.answer);
    }
    Command::Quiz { module, questions } => {
      let quiz = client.quiz(module, questions).await?;
      if json {
        return print_json(&quiz);
      }
      print!("{}", render::quiz(&quiz));
    }
    Command::Brief { topic } => {
      let brief = client.brief(&topic).await?;
      if json {
        return print_json(&brief);
      }
      println!("{brief}");
    }
    Command::Notes { module, query } => {
      let notes = client.notes(module, query.as_deref()).await?;
      if json {
        return print_json(&notes);
      }
      print!("{}", render::notes(&notes));
    }
    Command::Resources { module } => {
      let resources = client.resources(module).await?;
      if json {
        return print_json(&resources);
      }
      print!("{}", render::resources(&resources));
    }
    Command::AddResource { module, title, url, snippet } => {
      let resource = client
        .add_resource(module, &title, &url, snippet.as_deref())
        .await?;
      if json {
        return print_json(&resource);
      }
      println!("saved resource #{} for module {}", resource.id, resource.module_id);
    }
  }
  Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value).context("serialising output")?);
  Ok(())
}
