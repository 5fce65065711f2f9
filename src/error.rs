use thiserror::Error;

/// Failures raised by structural operations.
///
/// Value-type construction and spatial tree operations never fail, so only the
/// matrix and edge lookups produce these.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("invalid argument: expected {expected} values, got {got}")]
    InvalidArgument { expected: usize, got: usize },
    #[error("index out of range: (phase {phase}, octant {octant}) not in 12x8")]
    IndexOutOfRange { phase: u8, octant: u8 },
    #[error("octants {from} and {to} are not adjacent (no edge connects them)")]
    NotAdjacent { from: u8, to: u8 },
}

pub type Result<T> = std::result::Result<T, Error>;
