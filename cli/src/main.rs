mod commands;
mod draft;
mod terminal;

use commands::{CommandLine, Commands, allocate, report, search, submit};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init(commands.verbose)?;

    let cfg = commands.config();

    let outcome = match commands.command {
        Commands::Allocate { draft } => {
            print::header("cost allocation", cfg.quiet);
            allocate::allocate(&draft, &cfg).await
        }
        Commands::Search { query } => {
            print::header("catalog search", cfg.quiet);
            search::search(&query, &cfg).await
        }
        Commands::Submit { draft, .. } => {
            print::header("submitting sourcing request", cfg.quiet);
            submit::submit(&draft, &cfg).await
        }
        Commands::Report { orders } => {
            print::header("savings report", cfg.quiet);
            report::report(&orders, &cfg).await
        }
    };

    print::end_of_program(cfg.quiet);
    outcome
}
