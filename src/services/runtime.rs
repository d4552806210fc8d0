// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session event loop.
//!
//! One background task owns the `SessionController` and handles events
//! strictly one at a time: the one-shot geolocation result, the deferred
//! form-transition restore, and commands from `SessionHandle`s. Each
//! command is answered with its result plus the UI effects it produced.

use crate::error::{AppError, Result};
use crate::models::{Coordinate, FormInput, WorkoutId};
use crate::services::session::{SessionController, SessionSnapshot};
use crate::ui::{GeolocationError, GeolocationProvider, RecordingUi, UiEffect};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep_until, Instant};

/// Commands waiting beyond this many apply backpressure to callers.
const COMMAND_BUFFER: usize = 64;

/// The outcome of one event and the effects it produced.
#[derive(Debug)]
pub struct EventReply<T> {
    pub result: Result<T>,
    pub effects: Vec<UiEffect>,
}

enum SessionCommand {
    MapClick {
        location: Coordinate,
        reply: oneshot::Sender<EventReply<()>>,
    },
    ToggleType {
        reply: oneshot::Sender<EventReply<()>>,
    },
    Submit {
        input: FormInput,
        reply: oneshot::Sender<EventReply<WorkoutId>>,
    },
    Cancel {
        reply: oneshot::Sender<EventReply<()>>,
    },
    Drain {
        reply: oneshot::Sender<Vec<UiEffect>>,
    },
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
}

/// Cloneable handle for sending events to a running session.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    /// Start the event loop on the current tokio runtime.
    ///
    /// The loop stops once every handle is dropped.
    pub fn spawn<G: GeolocationProvider>(
        controller: SessionController<RecordingUi>,
        geo: G,
    ) -> Self {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        tokio::spawn(run(controller, geo, rx));
        Self { tx }
    }

    pub async fn map_click(&self, location: Coordinate) -> Result<EventReply<()>> {
        self.request(|reply| SessionCommand::MapClick { location, reply })
            .await
    }

    pub async fn toggle_type(&self) -> Result<EventReply<()>> {
        self.request(|reply| SessionCommand::ToggleType { reply })
            .await
    }

    pub async fn submit(&self, input: FormInput) -> Result<EventReply<WorkoutId>> {
        self.request(|reply| SessionCommand::Submit { input, reply })
            .await
    }

    pub async fn cancel(&self) -> Result<EventReply<()>> {
        self.request(|reply| SessionCommand::Cancel { reply }).await
    }

    /// Take effects produced outside of a command (map initialization,
    /// timer restores).
    pub async fn drain_effects(&self) -> Result<Vec<UiEffect>> {
        self.request(|reply| SessionCommand::Drain { reply }).await
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        self.request(|reply| SessionCommand::Snapshot { reply })
            .await
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> SessionCommand,
    ) -> Result<T> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| AppError::SessionClosed)?;
        rx.await.map_err(|_| AppError::SessionClosed)
    }
}

async fn run<G: GeolocationProvider>(
    mut controller: SessionController<RecordingUi>,
    geo: G,
    mut rx: mpsc::Receiver<SessionCommand>,
) {
    tracing::info!("Session runtime started");

    let available = geo.is_available();
    let locate = geo.current_position();
    tokio::pin!(locate);
    let mut located = false;
    if !available {
        located = true;
        let _ = controller.on_position_resolved(Err(GeolocationError::Unsupported));
    }

    loop {
        let restore_at = controller.transition_restore_at();

        tokio::select! {
            biased;

            result = &mut locate, if !located => {
                located = true;
                if let Err(err) = controller.on_position_resolved(result) {
                    tracing::debug!(error = %err, "Session continues without a map");
                }
            }

            _ = sleep_until(restore_at.unwrap_or_else(Instant::now)), if restore_at.is_some() => {
                controller.fire_transition_restore(Instant::now());
            }

            command = rx.recv() => match command {
                Some(command) => handle(&mut controller, command),
                None => break,
            },
        }
    }

    tracing::info!(
        workouts = controller.workouts().len(),
        "Session runtime shutting down"
    );
}

fn handle(controller: &mut SessionController<RecordingUi>, command: SessionCommand) {
    match command {
        SessionCommand::MapClick { location, reply } => {
            let result = controller.on_map_click(location);
            respond(controller, reply, result);
        }
        SessionCommand::ToggleType { reply } => {
            let result = controller.on_type_toggle();
            respond(controller, reply, result);
        }
        SessionCommand::Submit { input, reply } => {
            let result = controller.on_submit(&input);
            respond(controller, reply, result);
        }
        SessionCommand::Cancel { reply } => {
            let result = controller.on_cancel();
            respond(controller, reply, result);
        }
        SessionCommand::Drain { reply } => {
            let _ = reply.send(controller.ui_mut().drain());
        }
        SessionCommand::Snapshot { reply } => {
            let _ = reply.send(controller.snapshot());
        }
    }
}

fn respond<T>(
    controller: &mut SessionController<RecordingUi>,
    reply: oneshot::Sender<EventReply<T>>,
    result: Result<T>,
) {
    let effects = controller.ui_mut().drain();
    if reply.send(EventReply { result, effects }).is_err() {
        tracing::debug!("Requester went away before the reply");
    }
}
