use anyhow::Result;
use clap::Parser;
use floodcast::cli::{Cli, Commands};
use floodcast::commands::{self, CommandContext};
use floodcast::observability::{init_tracing, install_panic_hook};

fn main() -> Result<()> {
    install_panic_hook();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // init runs before config discovery so a broken config can be replaced
    if let Commands::Init { force } = cli.command {
        return commands::init::init_config(force);
    }

    let ctx = CommandContext::from_cli(&cli)?;
    match cli.command {
        Commands::Score {
            rainfall,
            elevation,
        } => commands::score::run(&ctx, rainfall, elevation),
        Commands::Assess {
            location,
            name,
            readings,
        } => commands::assess::run(&ctx, location, name, readings),
        Commands::Batch { input, output } => {
            commands::batch::run(&ctx, &input, output.as_deref())
        }
        Commands::Events(command) => commands::events::run(&ctx, command),
        Commands::Subscriptions(command) => commands::subscriptions::run(&ctx, command),
        Commands::Alerts(command) => commands::alerts::run(&ctx, command),
        Commands::Init { .. } => Ok(()),
    }
}
