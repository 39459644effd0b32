//! Placement policies and block states.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseAlgorithmError;

/// Strategy used to pick which FREE block satisfies a request.
///
/// Fixed for an allocator's lifetime. All four policies only consider
/// FREE blocks whose size is at least the aligned request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Take the first fitting block, scanning from the list head.
    FirstFit,
    /// Take the first fitting block, scanning from the block of the
    /// previous successful allocation and wrapping to the head once.
    NextFit,
    /// Take the fitting block that leaves the smallest remainder.
    /// Ties go to the block nearest the head.
    BestFit,
    /// Take the fitting block that leaves the largest remainder.
    /// Ties go to the block nearest the head.
    WorstFit,
}

impl Algorithm {
    /// Every policy, in declaration order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::FirstFit,
        Algorithm::NextFit,
        Algorithm::BestFit,
        Algorithm::WorstFit,
    ];

    /// Canonical snake-case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::FirstFit => "first_fit",
            Self::NextFit => "next_fit",
            Self::BestFit => "best_fit",
            Self::WorstFit => "worst_fit",
        }
    }

    /// Whether a successful allocation under this policy moves the
    /// next-fit cursor to the winning block.
    ///
    /// First-fit and next-fit do; best-fit and worst-fit leave the
    /// cursor where it was.
    pub fn updates_cursor(self) -> bool {
        matches!(self, Self::FirstFit | Self::NextFit)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    /// Parse a policy name. Case-insensitive; `-`, `_` and no separator
    /// are all accepted (`best-fit`, `BEST_FIT`, `bestfit`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "firstfit" => Ok(Self::FirstFit),
            "nextfit" => Ok(Self::NextFit),
            "bestfit" => Ok(Self::BestFit),
            "worstfit" => Ok(Self::WorstFit),
            _ => Err(ParseAlgorithmError {
                input: s.to_string(),
            }),
        }
    }
}

/// Whether a block is available or handed out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockState {
    /// Available for allocation.
    Free,
    /// Returned to a caller and not yet freed.
    Used,
}

impl BlockState {
    /// Shorthand for `self == BlockState::Free`.
    pub fn is_free(self) -> bool {
        self == Self::Free
    }
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => f.write_str("FREE"),
            Self::Used => f.write_str("USED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>(), Ok(algorithm));
            assert_eq!(algorithm.to_string(), algorithm.name());
        }
    }

    #[test]
    fn parsing_ignores_case_and_separators() {
        assert_eq!("FIRST_FIT".parse(), Ok(Algorithm::FirstFit));
        assert_eq!("next-fit".parse(), Ok(Algorithm::NextFit));
        assert_eq!(" BestFit ".parse(), Ok(Algorithm::BestFit));
        assert_eq!("worstfit".parse(), Ok(Algorithm::WorstFit));
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let err = "buddy".parse::<Algorithm>().unwrap_err();
        assert_eq!(err.input, "buddy");
        assert!(err.to_string().contains("buddy"));
    }

    #[test]
    fn only_first_and_next_fit_move_the_cursor() {
        assert!(Algorithm::FirstFit.updates_cursor());
        assert!(Algorithm::NextFit.updates_cursor());
        assert!(!Algorithm::BestFit.updates_cursor());
        assert!(!Algorithm::WorstFit.updates_cursor());
    }

    #[test]
    fn block_state_display() {
        assert_eq!(BlockState::Free.to_string(), "FREE");
        assert_eq!(BlockState::Used.to_string(), "USED");
        assert!(BlockState::Free.is_free());
        assert!(!BlockState::Used.is_free());
    }
}
