use serde_json::Value;

use crate::constants::domains::ITAD_SITE;
use crate::errors::json_error;
use crate::Error;

/// Public IsThereAnyDeal page for a game id
pub fn game_url(game_id: &str) -> String {
    format!("{}/game/id:{}/info/", ITAD_SITE, game_id)
}

/// Short link that the site redirects to the slug based page
pub(crate) fn game_redirect_url(game_id: &str) -> String {
    format!("{}/game/id:{}/", ITAD_SITE, game_id)
}

/// JSON array body of game ids
pub(crate) fn id_list<S: AsRef<str>>(ids: &[S]) -> Result<Value, Error> {
    let ids: Vec<&str> = ids.iter().map(AsRef::as_ref).collect();
    serde_json::to_value(ids).map_err(json_error)
}
