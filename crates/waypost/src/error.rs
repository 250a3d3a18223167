//! Error types for Waypost operations.
//!
//! This module provides the main error type [`WaypostError`] which wraps the
//! error conditions that can occur while evaluating layouts and bridging
//! markers into the host engine. All variants are synchronous, deterministic
//! failures; there are no transient modes and nothing is retried internally.

use thiserror::Error;

use waypost_core::position::PositionError;

/// The main error type for Waypost operations.
#[derive(Debug, Error)]
pub enum WaypostError {
    /// A position spec in the marker configuration failed validation.
    ///
    /// Fatal to the render that evaluated it; never silently defaulted.
    #[error("invalid position in `{option}`: {source}")]
    Position {
        /// The configuration option holding the offending spec.
        option: &'static str,
        source: PositionError,
    },

    /// A layout output's strategy tag is missing or does not belong to the
    /// evaluator that claims it.
    ///
    /// Indicates programmer error: a hand-built output bypassed
    /// [`LayoutOutput::for_strategy`](crate::layout::LayoutOutput::for_strategy)
    /// and may omit required invariants.
    #[error(
        "layout output tagged '{found}' was not produced by the '{expected}' evaluator; \
         construct outputs via `LayoutOutput::for_strategy`"
    )]
    ForeignLayout {
        expected: &'static str,
        found: String,
    },

    /// The engine signalled "added" for a marker but no element with the
    /// marker's id exists.
    ///
    /// The engine contract guarantees the element exists before the add
    /// signal fires, so this is an engine-integration bug.
    #[error("host engine has no element for marker id '{id}' at the add signal")]
    MissingElement { id: String },
}

impl WaypostError {
    /// Wraps a [`PositionError`] with the configuration option it came from.
    pub fn position(option: &'static str, source: PositionError) -> Self {
        Self::Position { option, source }
    }
}
