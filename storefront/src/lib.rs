//! Terminal storefront: remote product catalog, client side search/sort, and a cart that
//! survives restarts.
//!
//!
//!
//! # Flow
//! - Load the cart from its storage slot, corrupt data starts an empty cart
//! - Fetch the catalog once, show a spinner while waiting
//! - Read one command per line, mutate state, render the current view
//! - Every cart mutation writes the slot immediately, an empty cart removes it
//!
//!
//!
//! # Failures
//! Only two are expected.
//! - Catalog fetch fails: the products view shows the message and waits for `retry`
//! - Stored cart is unreadable: logged, slot removed, cart starts empty
//!
//! Bad commands are answered and the loop keeps going.
//!
//!
//!
//! # Logging
//!
//! Logs go to stderr so they do not tear the rendered views.
//! ```sh
//! RUST_LOG=storefront=debug,cart=debug cargo run
//! ```
use std::io::{Write, stdout};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader, stdin},
    signal,
};
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod search;
pub mod state;
pub mod views;

#[cfg(test)]
pub(crate) mod test_utils;

use cart::Storage;
use commands::Command;
use config::Config;
use error::AppError;
use state::{Outcome, State};

pub fn init_tracing() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

pub async fn start(config: Config) -> Result<(), AppError> {
    info!("Initializing state...");
    let mut state = State::new(config)?;

    info!(
        "Cart slot {} holds {} entries",
        state.cart.slot(),
        state.cart.count()
    );

    state.reload().await;
    println!("{}", state.render());

    run(&mut state, BufReader::new(stdin()), shutdown_signal()).await?;

    println!("Storefront shutting down...");
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Reload,
    Quit,
}

/// Reads commands until `quit`, end of input, or `shutdown` resolves.
///
/// Lines are decoded lossily, so stray bytes become an unknown command instead of an error.
async fn run<S, R, F>(state: &mut State<S>, input: R, shutdown: F) -> Result<(), AppError>
where
    S: Storage,
    R: AsyncBufRead + Unpin,
    F: Future<Output = ()>,
{
    let mut lines = input.split(b'\n');
    tokio::pin!(shutdown);

    loop {
        prompt();

        let segment = tokio::select! {
            segment = lines.next_segment() => segment?,
            _ = &mut shutdown => return Ok(()),
        };

        let Some(segment) = segment else {
            debug!("End of input");
            return Ok(());
        };

        match handle_line(state, &String::from_utf8_lossy(&segment)) {
            Step::Continue => {}
            Step::Quit => return Ok(()),
            Step::Reload => {
                let reloaded = tokio::select! {
                    _ = state.reload() => true,
                    _ = &mut shutdown => false,
                };

                if !reloaded {
                    return Ok(());
                }
                println!("{}", state.render());
            }
        }
    }
}

fn handle_line<S: Storage>(state: &mut State<S>, line: &str) -> Step {
    let outcome = Command::parse(line).and_then(|command| match command {
        Some(command) => state.apply(command).map(Some),
        None => Ok(None),
    });

    match outcome {
        Ok(None) => {}
        Ok(Some(Outcome::Render)) => println!("{}", state.render()),
        Ok(Some(Outcome::Message(message))) => println!("{message}"),
        Ok(Some(Outcome::Reload)) => return Step::Reload,
        Ok(Some(Outcome::Quit)) => return Step::Quit,
        Err(e) => {
            debug!("Rejected {line:?}: {e}");
            println!("{e}");
        }
    }

    Step::Continue
}

fn prompt() {
    print!("> ");

    if let Err(e) = stdout().flush() {
        error!("Failed to flush prompt: {e}");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
