use thiserror::Error;

pub type Result<T> = std::result::Result<T, EliminationError>;

#[derive(Error, Debug)]
pub enum EliminationError {
    /// The name is not part of the division.
    #[error("Unrecognized competitor: {0}")]
    UnknownCompetitor(String),

    /// A flow network was built or solved with inconsistent parameters.
    /// Reductions never produce one, so seeing this is a bug.
    #[error("Invalid flow network: {0}")]
    InvalidNetworkConfiguration(String),

    /// Standings violate symmetry, row sums, or could not be parsed.
    #[error("Malformed standings: {0}")]
    MalformedStandings(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
