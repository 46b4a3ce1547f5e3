//! Search error taxonomy.

use thiserror::Error;

/// Failure of a search request.
///
/// `EmptyQuery` is a validation outcome shown inline; every other variant is
/// surfaced as an API connection error and never retried automatically.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The trimmed query was empty, no request was made
    #[error("empty search query")]
    EmptyQuery,
    /// The API answered with a non-success status code
    #[error("HTTP {status}")]
    Status { status: u16 },
    /// The request could not be sent or the body could not be read
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// The body was not valid JSON or did not match the record shapes
    #[error("invalid JSON response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SearchError {
    /// True for failures that originate from the network or the API payload.
    pub fn is_network(&self) -> bool {
        !matches!(self, SearchError::EmptyQuery)
    }
}

/// Trim a raw query and reject blank input.
///
/// # Arguments
/// * `raw` - Text typed by the user
///
/// # Returns
/// * `Result<&str, SearchError>` - Trimmed query or `EmptyQuery`
pub fn validate_query(raw: &str) -> Result<&str, SearchError> {
    let query = raw.trim();
    if query.is_empty() {
        Err(SearchError::EmptyQuery)
    } else {
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_query() {
        assert_eq!(validate_query("  rail corridor ").unwrap(), "rail corridor");
        assert!(matches!(validate_query(""), Err(SearchError::EmptyQuery)));
        assert!(matches!(validate_query(" \t\n"), Err(SearchError::EmptyQuery)));
    }

    #[test]
    fn test_status_message_contains_code() {
        let err = SearchError::Status { status: 500 };
        assert_eq!(err.to_string(), "HTTP 500");
        assert!(err.is_network());
        assert!(!SearchError::EmptyQuery.is_network());
    }
}
