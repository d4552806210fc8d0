// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod render;
pub mod runtime;
pub mod session;
pub mod validation;

pub use runtime::{EventReply, SessionHandle};
pub use session::{SessionController, SessionSettings, SessionSnapshot, SessionState};
