//! Error taxonomy of the kernel.

use std::fmt;

use crate::types::Level;

/// Errors surfaced by the public operations.
///
/// `IncompatibleLevels` propagates unchanged through the recursive operation
/// frames and aborts the current top-level call; it is never cached, and no
/// partial state leaks: every intermediate interning is either committed (and
/// reference-counted) or never performed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// Two operands presented to a binary step have different tags
    /// (node vs terminal) or different top levels.
    IncompatibleLevels {
        /// Top level of the left operand (0 for terminals).
        lhs: Level,
        /// Top level of the right operand (0 for terminals).
        rhs: Level,
    },
    /// Manager teardown found outstanding externally held handles.
    DanglingOnTeardown {
        /// Prototype nodes still alive.
        live_nodes: usize,
        /// Environments still alive (excluding the cached empty one).
        live_envs: usize,
        /// Value sets still alive.
        live_values: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::IncompatibleLevels { lhs, rhs } => {
                write!(f, "incompatible levels: {} vs {}", lhs, rhs)
            }
            Error::DanglingOnTeardown {
                live_nodes,
                live_envs,
                live_values,
            } => {
                write!(
                    f,
                    "dangling handles on teardown: {} nodes, {} environments, {} value sets",
                    live_nodes, live_envs, live_values
                )
            }
        }
    }
}

impl std::error::Error for Error {}
