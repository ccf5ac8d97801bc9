use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use indexmap::IndexMap;

use crate::config::{Config, Formatters};
use crate::processor::{BatchOutput, CollectedRecords, process_backups};
use crate::render::write_reports;
use crate::store::ensure_directories;
use crate::utils::{format_path_with_tilde, resolve_config_path};

const TOP_LABELS: usize = 10;

#[derive(Parser)]
#[command(name = "chat-reader")]
#[command(version)]
#[command(about = "Extract AI assistant chats from editor state backups into tagged Markdown", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub options: GlobalOptions,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Config file (defaults to ./chatreader.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory containing state database backups
    #[arg(long, global = true)]
    pub backup_dir: Option<PathBuf>,

    /// Directory Markdown reports are written to
    #[arg(long, global = true)]
    pub target_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract, analyze and write every conversation (default)
    Process,
    /// Show statistics without writing any files
    Stats,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.options)?;

    match cli.command.unwrap_or(Commands::Process) {
        Commands::Process => process(&config),
        Commands::Stats => show_stats(&config),
    }
}

/// Load the config file and apply command-line overrides
pub fn load_config(options: &GlobalOptions) -> Result<Config> {
    let path = resolve_config_path(options.config.as_deref());
    let mut config = Config::load_or_default(path.as_deref())?;

    if let Some(dir) = &options.backup_dir {
        config.directories.backup = dir.clone();
    }
    if let Some(dir) = &options.target_dir {
        config.directories.target = dir.clone();
    }

    Ok(config)
}

fn process(config: &Config) -> Result<()> {
    let directories = &config.directories;
    ensure_directories(&directories.backup, &directories.target)?;

    let (_, output) = process_backups(&directories.backup, config, Utc::now())?;
    let written = write_reports(
        &directories.target,
        &output.conversations,
        &Formatters::default(),
        config.analysis.min_text_length,
    );

    println!("Processing completed!");
    println!("Total conversations processed: {}", output.summary.conversations);
    println!("Successfully saved {} conversations", written.saved);
    if written.failed > 0 {
        println!("Failed to save {} conversations", written.failed);
    }
    println!("Output directory: {}", format_path_with_tilde(&directories.target));

    Ok(())
}

fn show_stats(config: &Config) -> Result<()> {
    let (collected, output) = process_backups(&config.directories.backup, config, Utc::now())?;
    print!("{}", format_stats(&collected, &output, config.analysis.min_text_length));
    Ok(())
}

/// Context labels across kept conversations, most frequent first (ties in first-seen order)
pub fn top_labels(output: &BatchOutput, limit: usize) -> Vec<(String, usize)> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for processed in &output.conversations {
        let context = &processed.metadata.context;
        for label in context.technologies.iter().chain(context.categories.iter()) {
            *counts.entry(format!("#{}", label)).or_insert(0) += 1;
        }
    }

    let mut labels: Vec<(String, usize)> = counts.into_iter().collect();
    labels.sort_by(|a, b| b.1.cmp(&a.1));
    labels.truncate(limit);
    labels
}

pub fn format_stats(
    collected: &CollectedRecords,
    output: &BatchOutput,
    min_text_length: usize,
) -> String {
    let summary = &output.summary;
    let mut lines = vec![
        "Chat Reader Statistics".to_string(),
        "======================".to_string(),
        format!("Backups read: {} ({} failed)", collected.backups_read, collected.backups_failed),
        format!("Records: {}", summary.records),
        format!("  Parse failures: {}", summary.parse_failures),
        format!("  Unrecognized: {}", summary.unrecognized),
        format!("Conversations: {}", summary.conversations),
        format!("  Kept: {}", summary.kept()),
        format!("  Suppressed (< {} characters): {}", min_text_length, summary.suppressed),
    ];

    let labels = top_labels(output, TOP_LABELS);
    if !labels.is_empty() {
        lines.push("Top tags:".to_string());
        lines.extend(labels.iter().map(|(label, count)| format!("  {} {}", label, count)));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
