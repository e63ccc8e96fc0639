use crate::reddit_api::Credentials;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_ENV_PATH: &str = "reddit.env";
pub const DEFAULT_SUBREDDITS: [&str; 3] = ["MachineLearning", "Artificial", "OpenAI"];
pub const DEFAULT_QUERY: &str = "GPT-4";
pub const DEFAULT_LIMIT: u32 = 10;
pub const DEFAULT_OUTPUT: &str = "reddit_data.csv";

/// What to collect and where to write it.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub env_path: PathBuf,
    pub subreddits: Vec<String>,
    pub query: String,
    pub limit: u32,
    pub output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env_path: PathBuf::from(DEFAULT_ENV_PATH),
            subreddits: DEFAULT_SUBREDDITS.iter().map(|s| s.to_string()).collect(),
            query: DEFAULT_QUERY.to_string(),
            limit: DEFAULT_LIMIT,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Settings {
    /// Defaults with `REDDIT_*` process environment overrides applied.
    pub fn from_env() -> Self {
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings);

        info!(
            env_path = %settings.env_path.display(),
            subreddits = ?settings.subreddits,
            query = %settings.query,
            limit = settings.limit,
            output = %settings.output.display(),
            "Run settings loaded"
        );

        settings
    }
}

fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(value) = env::var("REDDIT_ENV_PATH") {
        settings.env_path = PathBuf::from(value);
    }

    if let Ok(value) = env::var("REDDIT_SUBREDDITS") {
        let subreddits: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        if subreddits.is_empty() {
            warn!(value = %value, "REDDIT_SUBREDDITS names no subreddit, keeping defaults");
        } else {
            settings.subreddits = subreddits;
        }
    }

    if let Ok(value) = env::var("REDDIT_QUERY") {
        settings.query = value;
    }

    if let Ok(value) = env::var("REDDIT_LIMIT") {
        match value.trim().parse::<u32>() {
            Ok(limit) => settings.limit = limit,
            Err(err) => {
                warn!(error = %err, value = %value, "Failed to parse REDDIT_LIMIT override");
            }
        }
    }

    if let Ok(value) = env::var("REDDIT_OUTPUT") {
        settings.output = PathBuf::from(value);
    }
}

/// Reads `KEY=VALUE` credentials without touching the process environment.
/// A missing or unreadable file yields empty credentials.
pub fn load_credentials(path: &Path) -> Credentials {
    if !path.exists() {
        warn!(
            "Error: '{}' not found. Environment variables not loaded.",
            path.display()
        );
        warn!("Please ensure the '{}' file is in the specified path.", path.display());
        return Credentials::default();
    }

    // `from_path` would export the values into the process environment.
    #[allow(deprecated)]
    let entries = match dotenv::from_path_iter(path) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(error = %err, path = %path.display(), "Failed to read credentials file");
            return Credentials::default();
        }
    };

    let mut credentials = Credentials::default();
    for entry in entries {
        let (key, value) = match entry {
            Ok(pair) => pair,
            Err(err) => {
                warn!(error = %err, path = %path.display(), "Skipping malformed line");
                continue;
            }
        };
        let value = Some(value).filter(|v| !v.is_empty());
        match key.as_str() {
            "REDDIT_CLIENT_ID" => credentials.client_id = value,
            "REDDIT_CLIENT_SECRET" => credentials.client_secret = value,
            "REDDIT_USERNAME" => credentials.username = value,
            "REDDIT_PASSWORD" => credentials.password = value,
            "REDDIT_USER_AGENT" => credentials.user_agent = value,
            _ => {}
        }
    }

    info!("Environment variables loaded from {}!", path.display());
    credentials
}
