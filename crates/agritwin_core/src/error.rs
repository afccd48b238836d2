use std::fmt;

/// Errors from the closed-form probability estimator.
///
/// The estimator never panics on bad numbers; any non-finite intermediate is
/// reported here so callers can keep their previous reading instead of
/// painting a NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EstimateError {
    /// A computed intermediate was NaN or infinite.
    NonFinite { stage: &'static str, value: f64 },
    /// Coefficient arrays do not match the intervention catalog length.
    CoefficientLength { expected: usize, got: usize },
}

impl fmt::Display for EstimateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimateError::NonFinite { stage, value } => {
                write!(f, "non-finite {stage} ({value}) in probability estimate")
            }
            EstimateError::CoefficientLength { expected, got } => {
                write!(f, "expected {expected} coefficients, got {got}")
            }
        }
    }
}

impl std::error::Error for EstimateError {}

/// Errors from applying a server-side parameter update.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelParamsError {
    /// A coefficient array in the update has the wrong length.
    CoefficientLength {
        field: &'static str,
        expected: usize,
        got: usize,
    },
    /// The update carries only one of the alpha/beta arrays.
    ///
    /// Drift and volatility coefficients are calibrated as a pair; mixing an
    /// alpha array from one source with a beta array from another silently
    /// skews every estimate, so partial coefficient updates are rejected.
    UnpairedCoefficients { present: &'static str },
    /// The update was calibrated against a different intervention ordering.
    CatalogVersion { expected: u32, got: u32 },
}

impl fmt::Display for ModelParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelParamsError::CoefficientLength {
                field,
                expected,
                got,
            } => {
                write!(f, "{field} has {got} entries, expected {expected}")
            }
            ModelParamsError::UnpairedCoefficients { present } => {
                write!(
                    f,
                    "update carries {present} without its paired coefficient array"
                )
            }
            ModelParamsError::CatalogVersion { expected, got } => {
                write!(
                    f,
                    "update targets catalog version {got}, local catalog is version {expected}"
                )
            }
        }
    }
}

impl std::error::Error for ModelParamsError {}
