use thiserror::Error;

/// Reasons a search stops before exploring every branch.
///
/// Failed unifications are not errors; they only prune a branch. These are
/// raised when a limit from [`SearchConfig`](crate::SearchConfig) is hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// More rule expansions were nested on one branch than allowed
    #[error("search depth limit of {limit} rule expansions exceeded")]
    DepthLimitExceeded {
        /// The configured limit
        limit: usize,
    },
    /// More goals were expanded in total than allowed
    #[error("search step limit of {limit} goal expansions exceeded")]
    StepLimitExceeded {
        /// The configured limit
        limit: usize,
    },
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, SearchError>;
