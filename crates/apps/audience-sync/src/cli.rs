//! Command-line arguments

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Keep a Mailchimp audience in sync with a local membership list
#[derive(Debug, Parser)]
#[command(name = "audience-sync", version)]
pub struct Cli {
    /// Mailchimp config file (defaults to ~/.config/audience-sync/mailchimp.json, then MAILCHIMP_* env vars)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log every HTTP request
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List audience members
    Members,
    /// List audience segments
    Segments,
    /// Create empty static segments
    CreateSegments {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Delete members from the audience
    Delete {
        #[arg(required = true)]
        emails: Vec<String>,
    },
    /// Subscribe one person to the audience
    Subscribe {
        email: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
    /// Attach tags to a member (or detach with --remove)
    Tag {
        email: String,
        #[arg(required = true)]
        tags: Vec<String>,
        #[arg(long)]
        remove: bool,
    },
    /// Reconcile the audience with a JSON file of people and segments
    Sync {
        /// File with `{"people": [{"email", "first_name", "last_name"}], "segments": [...]}`
        desired: PathBuf,
    },
}
