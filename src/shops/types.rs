use derive_getters::Getters;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Getters, Debug)]
pub struct Shop {
    id: u64,
    title: String,
    #[serde(default)]
    deals: u64,
    #[serde(default)]
    games: u64,
    update: Option<String>,
}
