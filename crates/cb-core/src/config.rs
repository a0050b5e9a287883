use serde::Deserialize;

/// Knobs the presentation layer hands to the core at start-up.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommunityConfig {
    /// URL attached to every shared post
    pub share_url: String,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            share_url: "http://localhost/".to_string(),
        }
    }
}
