//! Result type alias for mods-fetcher

use super::errors::FetcherError;

/// Result type alias for mods-fetcher operations
///
/// # Examples
///
/// ```
/// use mods_fetcher::domain::result::Result;
/// use mods_fetcher::domain::errors::FetcherError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(FetcherError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, FetcherError>;

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
        let result: Result<i32> = Err(FetcherError::Io("disk full".to_string()));
        assert!(result.is_err());
    }
}
