//! Domain-specific assertion macros for xmljson harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that name the
//! file and the batch position that broke.

/// Assert the `fileName` sequence of a batch result.
///
/// ```rust
/// assert_file_order!(results, ["a.xml", "b.xml"]);
/// ```
#[macro_export]
macro_rules! assert_file_order {
    ($results:expr, [$($name:expr),* $(,)?]) => {{
        let actual: Vec<&str> = $results.iter().map(|r| r.file_name.as_str()).collect();
        let expected: Vec<&str> = vec![$($name),*];
        pretty_assertions::assert_eq!(actual, expected, "assert_file_order! failed");
    }};
}

/// Assert that the result at `index` is an error with exactly `message`.
#[macro_export]
macro_rules! assert_file_error {
    ($results:expr, $index:expr, $message:expr) => {{
        let result = &$results[$index];
        match result.error_message() {
            Some(actual) => pretty_assertions::assert_eq!(
                actual,
                $message,
                "assert_file_error! failed for {:?} at index {}",
                result.file_name,
                $index
            ),
            None => panic!(
                "assert_file_error! failed: {:?} at index {} has content {}",
                result.file_name,
                $index,
                result.content_value().cloned().unwrap_or_default()
            ),
        }
    }};
}

/// Assert that the result at `index` carries content equal to `json!($value)`.
#[macro_export]
macro_rules! assert_file_content {
    ($results:expr, $index:expr, $value:tt) => {{
        let result = &$results[$index];
        match result.content_value() {
            Some(actual) => pretty_assertions::assert_eq!(
                actual,
                &serde_json::json!($value),
                "assert_file_content! failed for {:?} at index {}",
                result.file_name,
                $index
            ),
            None => panic!(
                "assert_file_content! failed: {:?} at index {} is an error: {:?}",
                result.file_name,
                $index,
                result.error_message()
            ),
        }
    }};
}
