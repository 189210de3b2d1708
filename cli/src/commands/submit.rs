use std::path::Path;

use colored::*;
use sourcing_common::config::Config;

use crate::commands::{allocate, build_service};
use crate::draft::Draft;
use crate::terminal::{print, spinner};

pub async fn submit(path: &Path, cfg: &Config) -> anyhow::Result<()> {
    let service = build_service(cfg).await?;
    let mut cart = Draft::load(path).await?.into_cart(&service).await?;

    allocate::print_allocation(&cart, cfg);

    let spinner = spinner::start("Submitting sourcing request...");
    let result = service.submit(&mut cart).await;
    spinner.finish_and_clear();
    let order_id = result?;

    let target = if cfg.dry_run {
        "memory (dry run)".to_string()
    } else {
        cfg.outbox.display().to_string()
    };
    print::blank();
    print::print_status(format!(
        "Created sourcing request {} in {}",
        order_id.to_string().green().bold(),
        target
    ));
    Ok(())
}
