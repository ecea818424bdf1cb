//! Outcomes of running commands.
//!
//! Failures never escape as errors: every run reduces to one of these values
//! plus whatever was written to the operator log.

use std::fmt;

/// Result of resolving and running a named command, alias or order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Everything that was run exited 0
    Succeeded,

    /// Something ran and failed (non-zero exit or launch error)
    Failed,

    /// The operator declined a dangerous command
    Cancelled,

    /// The requested name does not resolve to anything
    NotFound,
}

impl RunOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Succeeded)
    }

    pub fn is_not_found(self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Process exit status for this outcome
    pub fn exit_code(self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}

impl From<bool> for RunOutcome {
    fn from(success: bool) -> Self {
        if success {
            Self::Succeeded
        } else {
            Self::Failed
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::NotFound => "not found",
        };
        f.write_str(label)
    }
}

/// Tally of a fail-fast invocation sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceReport {
    /// Invocations that exited 0 before the sequence stopped
    pub succeeded: usize,

    /// Declared invocations in the sequence
    pub total: usize,
}

impl SequenceReport {
    pub fn is_complete(&self) -> bool {
        self.succeeded == self.total
    }

    pub fn outcome(&self) -> RunOutcome {
        RunOutcome::from(self.is_complete())
    }
}

impl fmt::Display for SequenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.succeeded, self.total)
    }
}
