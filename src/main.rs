use clap::Parser;
use request_chain::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Comments(args) => cli::comments::run(args).await,
    }
}
