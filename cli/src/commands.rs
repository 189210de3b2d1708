pub mod allocate;
pub mod report;
pub mod search;
pub mod submit;

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use sourcing_common::config::{Config, DEFAULT_SEARCH_LIMIT};
use sourcing_common::ordering::OrderGateway;
use sourcing_core::catalog::JsonCatalog;
use sourcing_core::outbox::{InMemoryOrders, JsonOutbox};
use sourcing_core::service::SourcingService;

#[derive(Parser)]
#[command(name = "sourcing")]
#[command(about = "Cost allocation and savings tracking for sourcing requests.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Reduce output, repeat to reduce further
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Show debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON file holding the product catalog
    #[arg(long, global = true, default_value = "catalog.json")]
    pub catalog: PathBuf,

    /// Directory receiving submitted orders
    #[arg(long, global = true, default_value = "outbox")]
    pub outbox: PathBuf,

    /// Maximum number of search results
    #[arg(long, global = true, default_value_t = DEFAULT_SEARCH_LIMIT)]
    pub limit: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Prorate a draft's order costs over its items
    #[command(alias = "a")]
    Allocate { draft: PathBuf },
    /// Search the product catalog by SKU or name
    #[command(alias = "s")]
    Search { query: String },
    /// Allocate a draft and submit it as a new order
    #[command(alias = "u")]
    Submit {
        draft: PathBuf,
        /// Keep the order in memory instead of writing it to the outbox
        #[arg(long)]
        dry_run: bool,
    },
    /// Summarize realized savings over exported orders
    #[command(alias = "r")]
    Report { orders: PathBuf },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            quiet: self.quiet,
            catalog: self.catalog.clone(),
            outbox: self.outbox.clone(),
            search_limit: self.limit,
            dry_run: matches!(self.command, Commands::Submit { dry_run: true, .. }),
        }
    }
}

/// Wires the service to the JSON catalog and to the outbox, or memory on a dry run.
pub async fn build_service(cfg: &Config) -> anyhow::Result<SourcingService> {
    let catalog = JsonCatalog::load(&cfg.catalog)
        .await
        .context("product catalog is required to resolve draft items")?;

    let gateway: Box<dyn OrderGateway> = if cfg.dry_run {
        Box::new(InMemoryOrders::new())
    } else {
        Box::new(JsonOutbox::new(&cfg.outbox))
    };

    Ok(SourcingService::new(Box::new(catalog), gateway).with_search_limit(cfg.search_limit))
}
