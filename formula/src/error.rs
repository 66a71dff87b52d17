//! Formula errors.

use thiserror::Error;

/// Why a formula could not be parsed or evaluated.
///
/// The reward distributor recovers every variant to `0.0` for the affected
/// user; none of them aborts a run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormulaError {
    #[error("formula is empty")]
    Empty,

    #[error("formula is {len} bytes long, limit is {max}")]
    TooLong { len: usize, max: usize },

    #[error("formula nests deeper than {max} levels")]
    TooDeep { max: usize },

    #[error("unexpected character {ch:?} at byte {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("malformed number {text:?} at byte {pos}")]
    InvalidNumber { text: String, pos: usize },

    #[error("unexpected {found} at byte {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unexpected end of formula")]
    UnexpectedEnd,

    #[error("unknown identifier {0:?}")]
    UnknownIdentifier(String),

    #[error("{function} takes {expected} argument(s), got {found}")]
    WrongArity {
        function: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("domain error: {0}")]
    Domain(String),
}
