use serde::{Deserialize, Serialize};

/// Maximum number of characters kept from a post body.
pub const SELFTEXT_MAX_CHARS: usize = 500;

const DELETED_AUTHOR: &str = "[deleted]";

/// Column order of the output table.
pub const COLUMNS: [&str; 14] = [
    "title",
    "score",
    "upvote_ratio",
    "num_comments",
    "author",
    "subreddit",
    "url",
    "permalink",
    "created_utc",
    "is_self",
    "selftext",
    "flair",
    "domain",
    "search_query",
];

/// A `t3` link object as Reddit returns it inside a listing.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Submission {
    pub id: Option<String>,
    pub title: Option<String>,
    pub score: Option<i64>,
    pub upvote_ratio: Option<f64>,
    pub num_comments: Option<i64>,
    pub author: Option<String>,
    pub subreddit: Option<String>,
    pub url: Option<String>,
    pub permalink: Option<String>,
    pub created_utc: Option<f64>,
    pub is_self: Option<bool>,
    pub selftext: Option<String>,
    pub link_flair_text: Option<String>,
    pub domain: Option<String>,
}

/// One output row. Field order is the CSV column order, see [`COLUMNS`].
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PostRecord {
    pub title: Option<String>,
    pub score: Option<i64>,
    pub upvote_ratio: Option<f64>,
    pub num_comments: Option<i64>,
    pub author: Option<String>,
    pub subreddit: String,
    pub url: Option<String>,
    pub permalink: Option<String>,
    pub created_utc: Option<f64>,
    pub is_self: Option<bool>,
    pub selftext: Option<String>,
    pub flair: Option<String>,
    pub domain: Option<String>,
    pub search_query: Option<String>,
}

impl PostRecord {
    /// Normalizes a submission. `subreddit` and `search_query` come from the
    /// caller, never from the payload. Numbers and booleans keep zero/false;
    /// only null, missing or empty strings become `None`.
    pub fn from_submission(
        submission: Submission,
        subreddit: &str,
        search_query: Option<&str>,
    ) -> Self {
        Self {
            title: non_empty(submission.title),
            score: submission.score,
            upvote_ratio: submission.upvote_ratio,
            num_comments: submission.num_comments,
            author: non_empty(submission.author).filter(|author| author != DELETED_AUTHOR),
            subreddit: subreddit.to_string(),
            url: non_empty(submission.url),
            permalink: non_empty(submission.permalink),
            created_utc: submission.created_utc,
            is_self: submission.is_self,
            selftext: non_empty(submission.selftext)
                .map(|text| truncate_chars(&text, SELFTEXT_MAX_CHARS).to_string()),
            flair: non_empty(submission.link_flair_text),
            domain: non_empty(submission.domain),
            search_query: search_query.map(str::to_string),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Returns the prefix of `text` holding at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
