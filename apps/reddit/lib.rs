pub mod config;
pub mod error;
pub mod fetchers;
pub mod models;
pub mod persist;
pub mod reddit_api;
pub mod runner;

pub use error::{FetchError, PersistError, RedditError};
pub use models::posts::{COLUMNS, PostRecord, SELFTEXT_MAX_CHARS, Submission};
pub use persist::{PostTable, dedupe_by_permalink, save_to_csv};
pub use reddit_api::{Credentials, PostSource, RedditApi};
