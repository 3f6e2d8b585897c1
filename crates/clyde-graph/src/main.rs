//! CLI for clyde: run one turn of the graph, or call a bridged tool directly.
//!
//! Config comes from `clyde.toml` (or `--config`), then env, then flags.
//! Logs go to stderr; stdout carries the node's echo and the final reply.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clyde_graph::{Clyde, ClydeConfig, Message, DEFAULT_CONFIG_FILE, DEFAULT_THREAD_ID};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "clyde")]
#[command(about = "Single-node conversational agent with bridged search and imagine tools")]
struct Args {
    /// Path to the TOML config
    #[arg(long, short, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Model name (overrides config and CLYDE_MODEL)
    #[arg(long)]
    model: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Send one message and print the reply. Reads stdin when no prompt is given.
    Chat {
        prompt: Vec<String>,

        /// Conversation thread id
        #[arg(long, default_value = DEFAULT_THREAD_ID)]
        thread: String,

        /// System prompt for this turn (overrides config)
        #[arg(long)]
        system: Option<String>,
    },
    /// Call a tool through the bridge without the model
    Tool {
        /// `search` or `imagine`
        name: String,
        /// The tool's single string argument
        input: String,
    },
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "clyde_graph=info,clyde=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("read prompt from stdin")?;
    Ok(buf)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();
    let args = Args::parse();

    let mut config = ClydeConfig::read(&args.config)
        .with_context(|| format!("load {}", args.config.display()))?
        .apply_env();
    if let Some(model) = args.model {
        config.model.name = model;
    }

    let command = args.command.unwrap_or(Command::Chat {
        prompt: Vec::new(),
        thread: DEFAULT_THREAD_ID.to_string(),
        system: None,
    });

    let clyde = Clyde::from_config(&config)?;

    match command {
        Command::Chat {
            prompt,
            thread,
            system,
        } => {
            let prompt = if prompt.is_empty() {
                read_stdin()?
            } else {
                prompt.join(" ")
            };
            let prompt = prompt.trim();
            if prompt.is_empty() {
                anyhow::bail!("empty prompt");
            }

            let mut messages = Vec::new();
            if let Some(system) = system.or(config.agent.system_prompt.clone()) {
                messages.push(Message::system(system));
            }
            messages.push(Message::user(prompt));

            tracing::info!(thread = %thread, model = %config.model.name, "running turn");
            let reply = clyde
                .invoke(messages, &thread)
                .await
                .context("invoke failed")?;
            println!("{reply}");
        }
        Command::Tool { name, input } => {
            let value = clyde
                .call_tool(&name, serde_json::Value::String(input))
                .await
                .with_context(|| format!("tool {name} failed"))?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }

    Ok(())
}
