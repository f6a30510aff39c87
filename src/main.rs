use anyhow::Result;
use clap::Parser;

use vocab_bot::cli::commands::{CommandOptions, configure, export, lookup, providers, run};
use vocab_bot::cli::{Args, Command};
use vocab_bot::config::ResolveOptions;
use vocab_bot::translation::print_languages;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let options = CommandOptions {
        config: args.config,
        resolve: ResolveOptions {
            to: args.to,
            provider: args.provider,
            model: args.model,
        },
    };

    match args.command {
        None | Some(Command::Run) => run::run_bot(options).await?,
        Some(Command::Lookup { word }) => lookup::run_lookup(options, &word).await?,
        Some(Command::Export { file, output }) => {
            export::run_export(options, file.as_deref(), &output).await?;
        }
        Some(Command::Languages) => print_languages(),
        Some(Command::Providers { provider }) => {
            providers::print_providers(&options.config_manager()?, provider.as_deref())?;
        }
        Some(Command::Configure { show }) => {
            let manager = options.config_manager()?;
            if show {
                configure::show_config(&manager)?;
            } else {
                configure::run_configure(&manager)?;
            }
        }
    }

    Ok(())
}
