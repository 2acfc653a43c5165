/// Errors produced while validating actuator addressing input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MapError {
    /// The panel name is not one of `front` / `back`.
    #[error("invalid panel {0:?} (expected \"front\" or \"back\")")]
    InvalidPanel(String),

    /// A numeric field is outside its allowed range.
    #[error("{field} out of range (got {value}, allowed {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

pub type Result<T> = std::result::Result<T, MapError>;
