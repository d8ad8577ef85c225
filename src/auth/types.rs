use chrono::prelude::*;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Persisted OAuth token set
#[derive(Serialize, Deserialize, Clone, Getters, Debug, PartialEq, Eq)]
pub struct Token {
    access_token: String,
    refresh_token: String,
    #[serde(with = "epoch_or_rfc3339")]
    expires_at: DateTime<Utc>,
    token_type: String,
}

impl Token {
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_at: DateTime<Utc>,
        token_type: impl Into<String>,
    ) -> Self {
        // the file stores whole seconds
        let expires_at = DateTime::from_timestamp(expires_at.timestamp(), 0).unwrap_or(expires_at);
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_at,
            token_type: token_type.into(),
        }
    }

    /// True when the token expires at or before `now + margin`
    pub fn expires_within(&self, margin: chrono::Duration, now: DateTime<Utc>) -> bool {
        self.expires_at <= now + margin
    }

    pub fn is_expired(&self, margin: chrono::Duration) -> bool {
        self.expires_within(margin, Utc::now())
    }

    /// Short prefix of the access token, safe for logs
    pub(crate) fn fingerprint(&self) -> &str {
        let end = self
            .access_token
            .char_indices()
            .nth(4)
            .map(|(i, _)| i)
            .unwrap_or(self.access_token.len());
        &self.access_token[..end]
    }
}

/// Body returned by the token endpoint for both grant types
#[derive(Deserialize, Debug)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: i64,
    #[serde(default = "bearer")]
    pub token_type: String,
}

fn bearer() -> String {
    String::from("Bearer")
}

impl TokenResponse {
    /// `previous_refresh` is kept when the server doesn't rotate refresh tokens
    ///
    /// `None` when `expires_in` doesn't fit a timestamp.
    pub fn into_token(self, previous_refresh: Option<&str>, now: DateTime<Utc>) -> Option<Token> {
        let expires_at = chrono::Duration::try_seconds(self.expires_in)
            .and_then(|lifetime| now.checked_add_signed(lifetime))?;
        let refresh_token = self
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_string))
            .unwrap_or_default();
        Some(Token::new(
            self.access_token,
            refresh_token,
            expires_at,
            self.token_type,
        ))
    }
}

/// Written as integer epoch seconds, read from integers, floats or RFC 3339 strings
mod epoch_or_rfc3339 {
    use chrono::{DateTime, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(i64),
        Fractional(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.timestamp())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let timestamp = match Raw::deserialize(deserializer)? {
            Raw::Seconds(secs) => DateTime::from_timestamp(secs, 0),
            Raw::Fractional(secs) => DateTime::from_timestamp(secs.trunc() as i64, 0),
            Raw::Text(text) => {
                let date = DateTime::parse_from_rfc3339(&text).map_err(D::Error::custom)?;
                DateTime::from_timestamp(date.timestamp(), 0)
            }
        };
        timestamp.ok_or_else(|| D::Error::custom("timestamp out of range"))
    }
}
