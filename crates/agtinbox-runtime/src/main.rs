//! agtinbox: agent inbox runtime binary.
//! Reads file-backed comment/rating collections and serves the merged,
//! per-recipient feed through `list`, `delta` and `watch`.

use clap::Parser;

use agtinbox_gateway::Paginator;

mod cli;
mod cmd_page;
mod cmd_watch;
mod store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    let filter = std::env::var("AGTINBOX_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = args.engine_config();
    tracing::debug!(?config, data_dir = %args.data_dir.display(), "engine configured");
    let paginator = Paginator::new(config);

    match &args.command {
        cli::Command::List(opts) => {
            cmd_page::cmd_page(
                &paginator,
                &args.data_dir,
                opts,
                cmd_page::PageMode::Chronological,
            )
            .await?;
        }
        cli::Command::Delta(opts) => {
            cmd_page::cmd_page(&paginator, &args.data_dir, opts, cmd_page::PageMode::Delta)
                .await?;
        }
        cli::Command::Watch(opts) => {
            cmd_watch::cmd_watch(&paginator, &args.data_dir, opts).await?;
        }
    }

    Ok(())
}
