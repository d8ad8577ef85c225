pub mod domains {
    pub const ITAD_SITE: &str = "https://isthereanydeal.com";
    pub const ITAD_API: &str = "https://api.isthereanydeal.com/";
    pub const ITAD_AUTHORIZE: &str = "https://isthereanydeal.com/oauth/authorize/";
    pub const ITAD_TOKEN: &str = "https://isthereanydeal.com/oauth/token/";
}

/// Scopes requested during authorization, covers every personal resource
pub const SCOPES: [&str; 8] = [
    "user_info",
    "notes_read",
    "notes_write",
    "profiles",
    "wait_read",
    "wait_write",
    "coll_read",
    "coll_write",
];

pub const DEFAULT_REDIRECT_URI: &str = "https://localhost";
pub const DEFAULT_TOKEN_FILE: &str = "itad_tokens.json";
/// Tokens expiring within this many seconds are refreshed up front
pub const DEFAULT_REFRESH_MARGIN_SECS: i64 = 60;
pub const DEFAULT_REDIRECT_ATTEMPTS: u32 = 3;

pub mod env {
    pub const API_KEY: &str = "ITAD_API_KEY";
    pub const CLIENT_ID: &str = "ITAD_CLIENT_ID";
    pub const CLIENT_SECRET: &str = "ITAD_CLIENT_SECRET";
    pub const TOKEN_FILE: &str = "ITAD_TOKEN_FILE";
}
