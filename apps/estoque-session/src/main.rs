//! # Estoque CLI Entry Point
//!
//! Prints the dashboard counters and a weekly report of the demo store.
//!
//! ```text
//! estoque                  # low-stock report
//! estoque expiring         # batches expired or about to expire
//! RUST_LOG=debug estoque   # with command logs on stderr
//! ```

#[tokio::main]
async fn main() {
    // The actual setup is in lib.rs for better testability
    if let Err(err) = estoque_session::run(std::env::args().nth(1)).await {
        eprintln!("estoque: {}", err);
        std::process::exit(1);
    }
}
