pub mod hot;
pub mod search;

use crate::error::FetchError;

/// Checks shared by both fetchers; runs before any request is made.
pub(crate) fn validate_request(subreddits: &[String], limit: u32) -> Result<(), FetchError> {
    if subreddits.is_empty() {
        return Err(FetchError::InvalidInput(
            "Subreddit names must be a non-empty list".to_string(),
        ));
    }
    if subreddits.iter().any(|name| name.is_empty()) {
        return Err(FetchError::InvalidInput(
            "Subreddit name must be a non-empty string".to_string(),
        ));
    }
    if let Some(name) = subreddits.iter().find(|name| !is_subreddit_name(name)) {
        return Err(FetchError::InvalidInput(format!(
            "Subreddit name '{name}' may only contain letters, digits and underscores"
        )));
    }
    if limit == 0 {
        return Err(FetchError::InvalidInput(
            "Limit must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

fn is_subreddit_name(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
