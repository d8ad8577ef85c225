use chrono::{DateTime, FixedOffset};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use crate::games::types::Assets;

#[derive(Serialize, Deserialize, Clone, Getters, Debug)]
pub struct CollectionGame {
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

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Price {
    pub amount: f64,
    pub currency: String,
}

impl Price {
    pub fn eur(amount: f64) -> Self {
        Self {
            amount,
            currency: String::from("EUR"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Getters, Debug)]
pub struct ShopRef {
    id: u64,
    name: String,
}

#[derive(Serialize, Deserialize, Clone, Getters, Debug)]
pub struct GameRef {
    id: String,
}

/// A copy of a game owned in some shop
#[derive(Serialize, Deserialize, Clone, Getters, Debug)]
pub struct GameCopy {
    id: u64,
    game: GameRef,
    #[serde(default)]
    redeemed: bool,
    shop: Option<ShopRef>,
    price: Option<Price>,
    note: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    added: Option<DateTime<FixedOffset>>,
}

/// Adding a copy also adds the game to the collection
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewCopy {
    pub game_id: String,
    pub redeemed: bool,
    pub shop: Option<u64>,
    pub price: Option<Price>,
    pub note: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl NewCopy {
    pub fn new(game_id: impl Into<String>, redeemed: bool) -> Self {
        Self {
            game_id: game_id.into(),
            redeemed,
            shop: None,
            price: None,
            note: None,
            tags: None,
        }
    }
}

/// Fields left as `None` are not changed
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct CopyUpdate {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redeemed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shop: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Collection category
#[derive(Serialize, Deserialize, Clone, Getters, Debug)]
pub struct Group {
    id: u64,
    title: String,
    #[serde(default)]
    public: bool,
    position: Option<u32>,
}

#[derive(Serialize, Debug)]
pub(crate) struct NewGroup<'a> {
    pub title: &'a str,
    pub public: bool,
}

/// Fields left as `None` are not changed
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct GroupUpdate {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_copy_uses_api_field_names() {
        let mut copy = NewCopy::new("018d937f-3a3b-7210-bd2d-0d1dfb1d84c0", true);
        copy.price = Some(Price::eur(19.99));
        copy.shop = Some(61);
        let json = serde_json::to_value(&copy).unwrap();
        assert_eq!(json["gameId"], "018d937f-3a3b-7210-bd2d-0d1dfb1d84c0");
        assert_eq!(json["redeemed"], true);
        assert_eq!(json["shop"], 61);
        assert_eq!(json["price"], serde_json::json!({"amount": 19.99, "currency": "EUR"}));
        assert!(json["note"].is_null());
    }

    #[test]
    fn updates_skip_untouched_fields() {
        let update = GroupUpdate {
            id: 3,
            title: Some("Backlog".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"id": 3, "title": "Backlog"})
        );

        let update = CopyUpdate {
            id: 7,
            redeemed: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"id": 7, "redeemed": false})
        );
    }

    #[test]
    fn copy_without_shop() {
        let copy: GameCopy = serde_json::from_str(
            r#"{"id": 12, "game": {"id": "abc"}, "redeemed": false, "shop": null, "price": null, "note": null, "tags": [], "added": "2024-05-01T10:00:00+02:00"}"#,
        )
        .unwrap();
        assert_eq!(*copy.id(), 12);
        assert_eq!(copy.game().id(), "abc");
        assert!(copy.shop().is_none());
        assert!(copy.added().is_some());
    }
}
