//! `tasks` - command-line front end for the task API

mod commands;

use anyhow::Result;
use clap::Parser;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("TASKS_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("task_core=debug,tasks=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();
    commands::run(cli).await
}
