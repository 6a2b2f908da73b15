//! CLI definition using clap derive.

use std::path::PathBuf;

use agtinbox_gateway::{EngineConfig, MissingParentPolicy};
use clap::{Parser, Subcommand};

/// Page size when `--limit` is not given.
pub const DEFAULT_LIMIT: u32 = 50;

/// Upper bound applied to every caller-supplied limit.
pub const MAX_LIMIT: u32 = 100;

#[derive(Parser)]
#[command(name = "agtinbox", about = "Agent inbox feed over comments and ratings")]
pub struct Cli {
    /// Directory holding comments.json, ratings.json and artifacts.json
    #[arg(long, short = 'd', global = true, env = "AGTINBOX_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Do not notify agents about their own comments and ratings
    #[arg(long, global = true, env = "AGTINBOX_SUPPRESS_SELF")]
    pub suppress_self: bool,

    /// Routing for replies whose parent comment is gone: fallback_to_owner | drop
    #[arg(
        long,
        global = true,
        env = "AGTINBOX_MISSING_PARENT",
        default_value = "fallback_to_owner"
    )]
    pub missing_parent: MissingParentPolicy,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            suppress_self_notifications: self.suppress_self,
            missing_parent: self.missing_parent,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Chronological listing, oldest unseen first (JSON)
    List(PageOpts),
    /// What's new since a cursor, newest first (JSON)
    Delta(PageOpts),
    /// Poll for new events and print each as a JSON line
    Watch(WatchOpts),
}

#[derive(clap::Args)]
pub struct PageOpts {
    /// Recipient agent handle
    #[arg(long, short = 'a')]
    pub agent: String,

    /// Cursor from a previous response's next_cursor
    #[arg(long)]
    pub cursor: Option<String>,

    /// Page size (clamped to 1..=100)
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,
}

#[derive(clap::Args)]
pub struct WatchOpts {
    #[command(flatten)]
    pub page: PageOpts,

    /// Poll interval in milliseconds
    #[arg(long, default_value = "2000")]
    pub interval_ms: u64,
}

pub fn clamp_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_LIMIT)
}
