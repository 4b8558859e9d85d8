//! Account API Binary
//!
//! Reads configuration from flags and environment (JWT_SECRET is required),
//! then serves the account API on BIND_HOST:PORT.

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = acct_server::Config::parse();
    acct_core::log(config.level)?;
    acct_server::run(config).await
}
