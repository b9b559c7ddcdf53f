//! Line-based control surface on standard input.
//!
//! Reads `start`, `stop`, `status` and `quit` and forwards them to the
//! listening service.

use crate::{AppError, AppResult, ControlCommand};

use guardian_voice_core::{ServiceCommand, ServiceStatus};

use std::{
    io::{self, BufRead},
    panic::Location,
    time::Duration,
};

use error_location::ErrorLocation;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, instrument, warn};

/// Whether the control loop keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Keep reading.
    Continue,
    /// `quit` was handled.
    Quit,
}

/// Forwards typed commands to the service.
pub struct ControlHandler {
    command_tx: mpsc::Sender<ServiceCommand>,
}

impl ControlHandler {
    /// Handler sending to the service's command channel.
    pub fn new(command_tx: mpsc::Sender<ServiceCommand>) -> Self {
        Self { command_tx }
    }

    /// Run the control loop until shutdown or `quit`.
    ///
    /// Closing standard input does not stop the service; the loop then waits
    /// for the shutdown signal.
    #[instrument(skip(self, shutdown_rx))]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let (line_tx, mut line_rx) = mpsc::channel::<String>(32);

        // Single blocking task that forwards stdin lines. It ends when stdin
        // closes or when line_rx is dropped and the next send fails.
        let handle = tokio::task::spawn_blocking(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if line_tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = ?e, "Failed to read control input");
                        break;
                    }
                }
            }
        });

        let mut input_open = true;
        info!("Control ready: start | stop | status | quit");

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Control handler shutting down");
                    break;
                }
                line = line_rx.recv(), if input_open => {
                    match line {
                        Some(line) => {
                            if self.handle_line(&line).await? == LineOutcome::Quit {
                                break;
                            }
                        }
                        None => {
                            info!("Control input closed, press Ctrl-C to exit");
                            input_open = false;
                        }
                    }
                }
            }
        }

        drop(line_rx);

        // Best-effort join: the blocking task may be stuck in a stdin read.
        match tokio::time::timeout(Duration::from_secs(1), handle).await {
            Ok(Ok(())) => debug!("Control input forwarder stopped cleanly"),
            Ok(Err(e)) => warn!(error = ?e, "Control input forwarder task panicked"),
            Err(_) => debug!(
                "Control input forwarder did not stop within timeout, \
                   will be cleaned up on exit"
            ),
        }

        Ok(())
    }

    /// Handle one input line.
    #[instrument(skip(self))]
    pub async fn handle_line(&self, line: &str) -> AppResult<LineOutcome> {
        if line.trim().is_empty() {
            return Ok(LineOutcome::Continue);
        }

        let Some(command) = ControlCommand::parse(line) else {
            warn!(input = line.trim(), "Unknown command, expected start | stop | status | quit");
            return Ok(LineOutcome::Continue);
        };

        match command {
            ControlCommand::Start => self.send(ServiceCommand::Start).await?,
            ControlCommand::Stop => self.send(ServiceCommand::Stop).await?,
            ControlCommand::Status => {
                let status = self.status().await?;
                println!("{}", format_status(&status));
            }
            ControlCommand::Quit => {
                self.send(ServiceCommand::Shutdown).await?;
                return Ok(LineOutcome::Quit);
            }
        }

        Ok(LineOutcome::Continue)
    }

    /// Ask the service for a status snapshot.
    pub async fn status(&self) -> AppResult<ServiceStatus> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(ServiceCommand::Status(reply_tx)).await?;

        reply_rx.await.map_err(|e| AppError::ChannelSendFailed {
            message: format!("Service dropped status request: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    async fn send(&self, command: ServiceCommand) -> AppResult<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|e| AppError::ChannelSendFailed {
                message: format!("Failed to send {:?}: {}", e.0, e),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

/// One-line human readable status.
pub fn format_status(status: &ServiceStatus) -> String {
    let state = match (status.running, status.listening, status.hibernating) {
        (false, _, _) => "stopped",
        (true, true, _) => "listening",
        (true, false, true) => "hibernating",
        (true, false, false) => "audio off",
    };

    format!(
        "state={} session={} armed={} phrase=\"{} {}\"",
        state,
        if status.session_active { "active" } else { "idle" },
        status.armed,
        status.wake_phrase.0,
        status.wake_phrase.1
    )
}
