use thiserror::Error;

pub type Result<T, E = FuzzyError> = std::result::Result<T, E>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum FuzzyError {
    /// Shape breakpoints out of order, non-positive sigma or a non-finite parameter
    #[error("invalid {shape} parameters: {reason}")]
    InvalidParameters { shape: &'static str, reason: String },
    #[error("invalid universe {min}..={max} with step {step}")]
    InvalidDomain { min: f64, max: f64, step: f64 },
    #[error("crisp input must be finite, got {0}")]
    NonFiniteInput(f64),
    #[error("expected {expected} membership values, found {found}")]
    ShapeMismatch { expected: usize, found: usize },
    #[error("universe has no points")]
    EmptyUniverse,
    /// The aggregated membership sums to zero so no crisp value is defined
    #[error("aggregated membership is zero everywhere; defuzzification is undefined")]
    DegenerateAggregate,
    #[error("unsupported method `{0}`")]
    UnsupportedMethod(String),
    #[error("term `{0}` is not defined for this variable")]
    MissingTerm(String),
}
