use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Free text note attached to a game
#[derive(Serialize, Deserialize, Clone, Getters, PartialEq, Debug)]
pub struct Note {
    gid: String,
    note: String,
}

impl Note {
    pub fn new(gid: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            gid: gid.into(),
            note: note.into(),
        }
    }
}
