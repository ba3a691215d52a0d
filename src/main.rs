use clap::Parser;

use pkgsearch::cli::{self, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = cli::run(cli).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
