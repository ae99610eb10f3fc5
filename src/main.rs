use clap::Parser;
use fundless::cli::{check, run, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => check::execute(&cli.config)?,
        command => run::execute(&cli.config, command).await?,
    }
    Ok(())
}
