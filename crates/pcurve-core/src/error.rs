use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurveError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CurveError {
    /// Error for a derivative request beyond what a curve can evaluate.
    pub fn unsupported_order(curve: &str, order: usize, max_order: usize) -> Self {
        Self::UnsupportedOperation(format!(
            "{curve} evaluates derivatives up to order {max_order}, requested {order}"
        ))
    }
}

pub type Result<T> = std::result::Result<T, CurveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_order_message() {
        let err = CurveError::unsupported_order("QuadraticBSpline", 1, 0);
        assert!(matches!(err, CurveError::UnsupportedOperation(_)));
        assert_eq!(
            err.to_string(),
            "Unsupported operation: QuadraticBSpline evaluates derivatives up to order 0, requested 1"
        );
    }
}
