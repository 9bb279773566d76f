mod commands;
mod terminal;

use commands::{CommandLine, Commands, probe, scan};
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose, commands.quiet);

    match commands.command {
        Commands::Scan(args) => scan::scan(args, commands.quiet).await,
        Commands::Probe { host, port, timeout } => {
            probe::probe(&host, port, timeout, commands.quiet).await
        }
    }
}
