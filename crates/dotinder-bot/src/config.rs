//! Environment-based configuration.
//!
//! All values are opaque strings to the engine. A missing `MENU_URL` is
//! reported inside the start command, never at startup.

/// Bot configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Homeserver base URL of the chat transport.
    pub base_url: Option<String>,

    /// The bot's own identity; inbound messages from this sender are
    /// filtered by the transport.
    pub user_id: Option<String>,

    /// Access token for the transport.
    pub access_token: Option<String>,

    /// The single room the bot serves.
    pub room_id: Option<String>,

    /// Where to fetch the raw menu document from.
    pub menu_url: Option<String>,
}

impl Config {
    /// Load from a `.env` file (if present) and the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            base_url: var("BASE_URL"),
            user_id: var("USER_ID"),
            access_token: var("ACCESS_TOKEN"),
            room_id: var("ROOM_ID"),
            menu_url: var("MENU_URL"),
        }
    }
}

/// Read a variable, treating empty values as absent.
fn var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_value_counts_as_absent() {
        std::env::set_var("DOTINDER_TEST_EMPTY", "");
        std::env::set_var("DOTINDER_TEST_SET", "value");

        assert_eq!(var("DOTINDER_TEST_EMPTY"), None);
        assert_eq!(var("DOTINDER_TEST_SET"), Some("value".to_string()));
        assert_eq!(var("DOTINDER_TEST_MISSING"), None);
    }
}
