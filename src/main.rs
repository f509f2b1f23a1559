use clap::Parser;
use rentbuy::api::{self, Cli};

#[tokio::main]
async fn main() {
    rentbuy::logging::init_logging("info");

    let cli = Cli::parse();
    if let Err(e) = api::run(cli).await {
        tracing::error!(error = %e, "rentbuy failed");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
