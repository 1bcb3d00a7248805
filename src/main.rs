//! docgauge CLI entry point.

use clap::Parser;

use docgauge::cli::{self, Cli};

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    if let Err(err) = cli::run(args).await {
        cli::handle_error(err);
    }
}
