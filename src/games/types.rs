use std::collections::HashMap;

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Image URLs keyed by kind (`boxart`, `banner145`, `banner300`, ...)
pub type Assets = HashMap<String, String>;

/// Game as it appears in search results and lists
#[derive(Serialize, Deserialize, Clone, Getters, Debug)]
pub struct GameSummary {
    id: String,
    slug: String,
    title: String,
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    mature: bool,
    #[serde(default)]
    assets: Assets,
}

#[derive(Serialize, Deserialize, Clone, Getters, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GameInfo {
    id: String,
    slug: String,
    title: String,
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    mature: bool,
    #[serde(default)]
    assets: Assets,
    #[serde(default)]
    early_access: bool,
    #[serde(default)]
    achievements: bool,
    #[serde(default)]
    trading_cards: bool,
    appid: Option<u64>,
    #[serde(default)]
    tags: Vec<String>,
    release_date: Option<String>,
    #[serde(default)]
    developers: Vec<Company>,
    #[serde(default)]
    publishers: Vec<Company>,
    stats: Option<GameStats>,
    #[serde(default)]
    urls: HashMap<String, String>,
}

#[derive(Serialize, Deserialize, Clone, Getters, Debug)]
pub struct Company {
    id: u64,
    name: String,
}

#[derive(Serialize, Deserialize, Clone, Getters, Debug)]
pub struct GameStats {
    rank: Option<u64>,
    waitlisted: Option<u64>,
    collected: Option<u64>,
}
