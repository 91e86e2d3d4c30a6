//! Result type alias for VetStock

use super::errors::VetStockError;

/// Result type alias for VetStock operations
///
/// # Examples
///
/// ```
/// use vetstock::domain::result::Result;
/// use vetstock::domain::errors::VetStockError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(VetStockError::validation("Invalid input"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, VetStockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(VetStockError::NotFound("x".to_string()));
        assert!(result.is_err());
    }
}
