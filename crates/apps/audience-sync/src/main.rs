//! audience-sync - Mailchimp audience synchronization tool
//!
//! Thin command-line front end over the `mailchimp` crate.

use anyhow::Result;
use clap::Parser;
use log::{error, warn};
use std::path::Path;
use mailchimp::{
    BatchSummary, DesiredState, MailchimpClient, MailchimpConfig, Person, TagUpdate, synchronize,
};

mod cli;

use cli::{Cli, Command};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    // Bootstrap config directory
    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    if let Err(e) = run(Cli::parse()) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = match &cli.config {
        Some(path) => MailchimpConfig::from_file(path)?,
        None => {
            if !MailchimpConfig::is_available() {
                if let Some(path) = MailchimpConfig::default_config_path() {
                    warn!("{}", config_hint(&path));
                }
            }
            MailchimpConfig::load()?
        }
    };
    if cli.debug {
        settings.debug = true;
    }

    let client = MailchimpClient::new(&settings)?;

    match cli.command {
        Command::Members => {
            for member in client.fetch_members()? {
                let tags: Vec<&str> = member.tags.iter().map(String::as_str).collect();
                println!("{}\t{}\t{}", member.email_address, member.status, tags.join(","));
            }
        }
        Command::Segments => {
            for segment in client.fetch_segments()? {
                println!("{}\t{}\t{}", segment.id, segment.name, segment.member_count);
            }
        }
        Command::CreateSegments { names } => {
            print_summary(client.create_segments(&names)?);
        }
        Command::Delete { emails } => {
            print_summary(client.delete(&emails)?);
        }
        Command::Subscribe {
            email,
            first_name,
            last_name,
        } => {
            let person = Person {
                email,
                first_name,
                last_name,
            };
            print_summary(client.subscribe(&[person])?);
        }
        Command::Tag {
            email,
            tags,
            remove,
        } => {
            let updates: Vec<TagUpdate> = tags
                .into_iter()
                .map(|name| {
                    if remove {
                        TagUpdate::inactive(name)
                    } else {
                        TagUpdate::active(name)
                    }
                })
                .collect();
            client.update_tags(&email, &updates)?;
            println!("updated {} tags of {}", updates.len(), email);
        }
        Command::Sync { desired } => {
            let desired: DesiredState = config::load_state_file(&desired)?;
            let stats = synchronize(&client, &desired)?;
            println!(
                "fetched {}, subscribed {}, deleted {}, segments created {}, errored operations {} ({}ms)",
                stats.members_fetched,
                stats.subscribed,
                stats.deleted,
                stats.segments_created,
                stats.errored_operations(),
                stats.duration_ms
            );
        }
    }

    Ok(())
}

/// How to provide settings when neither the config file nor the env vars exist
fn config_hint(path: &Path) -> String {
    format!(
        "To configure Mailchimp access, either:\n\
         1. Write {{\"list_id\": ..., \"api_key\": ...}} to: {}\n\
         2. Or set environment variables: MAILCHIMP_LIST_ID and MAILCHIMP_API_KEY\n\
         3. Or pass --config <path>",
        path.display()
    )
}

fn print_summary(summary: Option<BatchSummary>) {
    match summary {
        Some(summary) => println!("{}", summary),
        None => println!("nothing to do"),
    }
}
