use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PcgError {
    #[error("empty range: upper bound {upper} must exceed lower bound {lower}")]
    EmptyRange { lower: u128, upper: u128 },
}
