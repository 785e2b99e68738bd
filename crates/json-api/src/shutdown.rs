//! Graceful shutdown on SIGINT/SIGTERM.

use std::{fmt, io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;

/// Window for in-flight requests, checkouts included, to finish before the server stops.
pub(crate) const GRACE_PERIOD: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install {signal} handler: {source}")]
    Install {
        signal: ShutdownSignal,
        #[source]
        source: io::Error,
    },
}

/// The signal that asked the server to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShutdownSignal {
    Interrupt,
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Interrupt => "ctrl_c",
            Self::Terminate => "terminate",
        })
    }
}

impl ShutdownSignal {
    fn install_error(self) -> impl FnOnce(io::Error) -> ShutdownSignalError {
        move |source| ShutdownSignalError::Install {
            signal: self,
            source,
        }
    }
}

async fn interrupt() -> Result<(), ShutdownSignalError> {
    signal::ctrl_c()
        .await
        .map_err(ShutdownSignal::Interrupt.install_error())
}

#[cfg(unix)]
async fn terminate() -> Result<(), ShutdownSignalError> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignal::Terminate.install_error())?
        .recv()
        .await;

    Ok(())
}

#[cfg(windows)]
async fn terminate() -> Result<(), ShutdownSignalError> {
    signal::windows::ctrl_close()
        .map_err(ShutdownSignal::Terminate.install_error())?
        .recv()
        .await;

    Ok(())
}

/// Wait for the first shutdown signal.
async fn wait_for_signal() -> Result<ShutdownSignal, ShutdownSignalError> {
    tokio::select! {
        result = interrupt() => result.map(|()| ShutdownSignal::Interrupt),
        result = terminate() => result.map(|()| ShutdownSignal::Terminate),
    }
}

pub(crate) async fn listen(handle: ServerHandle) -> Result<(), ShutdownSignalError> {
    let received = wait_for_signal().await?;

    tracing::info!(
        signal = %received,
        grace_period_secs = GRACE_PERIOD.as_secs(),
        "shutdown signal received, draining connections"
    );

    handle.stop_graceful(Some(GRACE_PERIOD));

    Ok(())
}
