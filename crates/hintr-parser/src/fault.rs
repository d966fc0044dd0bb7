//! Engine faults.
//!
//! Faults are not lint findings. A listener that cannot do its job returns a
//! `RuleFault`; the engine turns it into an `InternalFault`, abandons the
//! unit and hands the fault to the caller instead of a report.

use crate::events::EventKind;
use hintr_common::Position;
use std::fmt;

/// Failure reported by a rule listener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleFault {
    pub message: String,
}

impl RuleFault {
    pub fn new(message: impl Into<String>) -> Self {
        RuleFault {
            message: message.into(),
        }
    }
}

impl fmt::Display for RuleFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RuleFault {}

/// A listener fault or a broken engine invariant. Aborts the unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InternalFault {
    pub message: String,
    /// Event being dispatched when the fault happened, if any.
    pub event: Option<EventKind>,
    pub pos: Option<Position>,
}

impl InternalFault {
    pub fn new(message: impl Into<String>) -> Self {
        InternalFault {
            message: message.into(),
            event: None,
            pos: None,
        }
    }

    pub(crate) fn from_rule(fault: RuleFault, event: EventKind, pos: Position) -> Self {
        InternalFault {
            message: fault.message,
            event: Some(event),
            pos: Some(pos),
        }
    }
}

impl fmt::Display for InternalFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "internal fault: {}", self.message)?;
        if let Some(event) = self.event {
            write!(f, " (while dispatching {event:?}")?;
            if let Some(pos) = self.pos {
                write!(f, " at line {}, col {}", pos.line, pos.character)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl std::error::Error for InternalFault {}
