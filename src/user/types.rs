use derive_getters::Getters;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Getters, Debug)]
pub struct UserInfo {
    username: String,
}
