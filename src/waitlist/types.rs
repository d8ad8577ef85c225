use chrono::{DateTime, FixedOffset};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use crate::games::types::Assets;

#[derive(Serialize, Deserialize, Clone, Getters, Debug)]
pub struct WaitlistGame {
    id: String,
    slug: String,
    title: String,
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    mature: bool,
    #[serde(default)]
    assets: Assets,
    added: Option<DateTime<FixedOffset>>,
}
