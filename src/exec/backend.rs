// src/exec/backend.rs

//! Pluggable script runner abstraction.
//!
//! The action talks to a `ScriptRunner` instead of spawning processes itself.
//! Production code uses [`ProcessOutputRelay`]; tests can provide their own
//! implementation that records invocations without starting anything.

use crate::errors::Result;

use super::invocation::CommandInvocation;
use super::relay::{ProcessOutputRelay, RelayHandle};

pub trait ScriptRunner: Send + Sync {
    /// Start `invocation` and return once it is running.
    ///
    /// Failing to start must be reported here, synchronously; everything that
    /// happens after the process started belongs to the returned relay.
    fn launch(&self, invocation: &CommandInvocation) -> Result<RelayHandle>;
}

impl ScriptRunner for ProcessOutputRelay {
    fn launch(&self, invocation: &CommandInvocation) -> Result<RelayHandle> {
        ProcessOutputRelay::launch(self, invocation)
    }
}
