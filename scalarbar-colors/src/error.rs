#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    #[error("Lookup table must contain at least one color")]
    EmptyTable,

    #[error("Invalid range [{lo}, {hi}]: bounds must be finite and ascending")]
    InvalidRange { lo: f64, hi: f64 },

    #[error("Log scale requires a strictly positive range, got [{lo}, {hi}]")]
    NonPositiveLogRange { lo: f64, hi: f64 },

    #[error("Color transfer function must contain at least one node")]
    EmptyTransferFunction,
}
