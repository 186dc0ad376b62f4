//! Entrypoint for the `wallvault` binary.

use std::process;

#[tokio::main]
async fn main() {
    let exit_code = wallvault_cli::run().await;
    process::exit(exit_code);
}
