use anyhow::Result;
use bookleaf::cli::{Cli, Command};
use bookleaf::{converter, merge};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Command::Split(args) => converter::convert(&args),
        Command::Merge(args) => merge::merge_markdown(&args.folder, &args.output).map(|_| ()),
    }
}
