//! Core types for daemon lifecycle tracking.
//!
//! The lifecycle is a strict three-state machine with no implicit
//! transitions.

/// Daemon lifecycle state.
///
/// ```text
/// Pending → Running → Done
/// ```
///
/// `Done` is reached whether the program returned `Ok` or `Err`. The state
/// alone does not tell the two apart; the supervisor's log line does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DaemonState {
    /// Registered, not yet dispatched.
    #[default]
    Pending,
    /// Dispatched to a worker.
    Running,
    /// Program returned.
    Done,
}

impl DaemonState {
    /// Returns true if `next` is the single legal successor of `self`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Running) | (Self::Running, Self::Done)
        )
    }

    /// Returns true if the daemon is in its terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl std::fmt::Display for DaemonState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Done => "done",
        };
        f.write_str(label)
    }
}

/// Process signals that end a supervisor run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Interrupt (Ctrl+C).
    Int,
    /// Terminate.
    Term,
}

impl Signal {
    /// Returns the Unix signal number.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        match self {
            Self::Int => 2,
            Self::Term => 15,
        }
    }
}
