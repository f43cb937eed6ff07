//! # Async host driver.
//!
//! [`Driver`] owns a [`Controller`] inside one tokio task and plays the role
//! of the host: it ticks the controller on a fixed cadence, forwards button
//! presses, and publishes a [`Snapshot`] after every change.
//!
//! ```text
//! DriverHandle ── Command (mpsc) ──► driver task ──► Controller::request_crossing()
//!                                       │
//!                  interval.tick() ─────┴──────────► Controller::tick(interval)
//!                                       │
//! DriverHandle ◄── Snapshot (watch) ────┘
//! ```
//!
//! The controller is never shared; every call happens on the driver task,
//! which is what keeps it free of locks.

use crate::controller::{Controller, Snapshot};
use crate::core::saturating_millis;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const COMMAND_CAPACITY: usize = 32;

/// Errors returned by [`DriverHandle`].
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("driver task has stopped")]
    Closed,

    #[error("driver task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("tick interval must be greater than zero")]
    ZeroInterval,
}

/// Input accepted by a running driver.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    /// The pedestrian button was pressed.
    RequestCrossing,
    /// Stop ticking and hand the controller back.
    Shutdown,
}

/// Runs a controller on a fixed tick cadence.
pub struct Driver {
    controller: Controller,
    interval: Duration,
}

impl Driver {
    /// Drive `controller`, feeding it `interval` on every tick.
    ///
    /// The delta passed to the controller is always exactly `interval`,
    /// whatever the real scheduling jitter, so runs are reproducible. A zero
    /// interval is rejected.
    pub fn new(controller: Controller, interval: Duration) -> Result<Self, DriverError> {
        if interval.is_zero() {
            return Err(DriverError::ZeroInterval);
        }
        Ok(Self {
            controller,
            interval,
        })
    }

    /// Spawn the driver task on the current tokio runtime.
    pub fn spawn(self) -> DriverHandle {
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_CAPACITY);
        let (snap_tx, snap_rx) = watch::channel(self.controller.snapshot());
        let task = tokio::spawn(self.run(cmd_rx, snap_tx));

        DriverHandle {
            commands: cmd_tx,
            snapshots: snap_rx,
            task,
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        snapshots: watch::Sender<Snapshot>,
    ) -> Controller {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of a tokio interval completes immediately.
        ticker.tick().await;

        tracing::info!(
            interval_ms = saturating_millis(self.interval),
            phase = %self.controller.phase(),
            "driver started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.controller.tick(self.interval);
                    snapshots.send_replace(self.controller.snapshot());
                }
                cmd = commands.recv() => match cmd {
                    Some(Command::RequestCrossing) => {
                        if self.controller.request_crossing() {
                            snapshots.send_replace(self.controller.snapshot());
                        }
                    }
                    Some(Command::Shutdown) | None => break,
                },
            }
        }

        tracing::info!(
            uptime_ms = saturating_millis(self.controller.uptime()),
            cycles = self.controller.history().cycles(),
            "driver stopped"
        );
        self.controller
    }
}

/// Host-side handle to a running [`Driver`].
pub struct DriverHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Snapshot>,
    task: JoinHandle<Controller>,
}

impl DriverHandle {
    /// Forward a pedestrian button press.
    pub async fn request_crossing(&self) -> Result<(), DriverError> {
        self.send(Command::RequestCrossing).await
    }

    /// Subscribe to snapshots published after every tick.
    pub fn snapshots(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Most recently published snapshot.
    pub fn latest(&self) -> Snapshot {
        *self.snapshots.borrow()
    }

    /// Stop the driver and take the controller back.
    pub async fn shutdown(self) -> Result<Controller, DriverError> {
        // A closed channel means the task already stopped; join it anyway.
        let _ = self.commands.send(Command::Shutdown).await;
        Ok(self.task.await?)
    }

    async fn send(&self, cmd: Command) -> Result<(), DriverError> {
        self.commands.send(cmd).await.map_err(|_| DriverError::Closed)
    }
}
