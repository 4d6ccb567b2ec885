use std::fmt;

use crate::input::InputId;

/// Usage errors raised by gesture accessors.
///
/// State transitions never fail: they are no-ops when they would not change
/// anything. Only reaching for a view or input that is not there is an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GestureError {
    /// The gesture is not attached to a view.
    Unbound,
    /// No input with this id is tracked.
    UnknownInput(InputId),
    /// A counter disagrees with the flags of the tracked inputs.
    CountMismatch {
        counter: &'static str,
        counted: usize,
        flagged: usize,
    },
}

impl fmt::Display for GestureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureError::Unbound => f.write_str("gesture is not attached to a view"),
            GestureError::UnknownInput(id) => write!(f, "no input with id {id}"),
            GestureError::CountMismatch {
                counter,
                counted,
                flagged,
            } => write!(
                f,
                "{counter} is {counted} but {flagged} inputs carry the flag"
            ),
        }
    }
}

impl std::error::Error for GestureError {}
