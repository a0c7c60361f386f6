//! Binary entry point for the Mece room server.

use std::net::IpAddr;

use clap::Parser;
use mece::constants::DEFAULT_PORT;
use mece::server::{self, ServerConfig};
use mece::init_logging;

/// Room server for the Mece virtual office
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Interface to listen on
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = ServerConfig {
        host: args.host,
        port: args.port,
    };
    server::serve(config, server::office_server()).await?;
    Ok(())
}
