//! Error types shared across fitsim crates.

use std::error::Error;
use std::fmt;

/// A placement policy name that matches none of the four known policies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseAlgorithmError {
    /// The rejected input, as given.
    pub input: String,
}

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown allocation algorithm '{}': expected first_fit, next_fit, best_fit or worst_fit",
            self.input
        )
    }
}

impl Error for ParseAlgorithmError {}
