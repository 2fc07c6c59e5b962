/*!
 * Consistency Strategy
 *
 * Selection of the read-modify-write discipline a counter uses
 */

use crate::core::errors::CounterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Strategy type selection
///
/// Fixed for the lifetime of a counter. There is no setter: a counter is
/// constructed with its strategy and keeps it until dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyStrategy {
    /// Plain load then store, no coordination (loses updates under contention)
    Unsynchronized,
    /// Every read-modify-write runs under the counter's own mutex
    Synchronized,
}

impl ConsistencyStrategy {
    /// All strategies, unsynchronized first
    pub const ALL: [ConsistencyStrategy; 2] = [
        ConsistencyStrategy::Unsynchronized,
        ConsistencyStrategy::Synchronized,
    ];

    /// Whether concurrent updates are guaranteed to be preserved
    #[inline]
    pub const fn is_exact(self) -> bool {
        matches!(self, ConsistencyStrategy::Synchronized)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ConsistencyStrategy::Unsynchronized => "unsynchronized",
            ConsistencyStrategy::Synchronized => "synchronized",
        }
    }
}

impl Default for ConsistencyStrategy {
    fn default() -> Self {
        ConsistencyStrategy::Synchronized
    }
}

impl fmt::Display for ConsistencyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsistencyStrategy {
    type Err = CounterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unsynchronized" | "unsafe" => Ok(ConsistencyStrategy::Unsynchronized),
            "synchronized" | "safe" => Ok(ConsistencyStrategy::Synchronized),
            other => Err(CounterError::invalid(format!(
                "unknown consistency strategy '{}'",
                other
            ))),
        }
    }
}
