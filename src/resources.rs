use std::fmt::{Display, Formatter};
use std::str::FromStr;

use reqwest::Method;

use crate::dispatch::AuthKind;
use crate::errors::invalid_request_error;
use crate::Error;

// https://docs.isthereanydeal.com/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyRule {
    None,
    Required,
}

#[derive(Debug, Clone)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
    pub auth: AuthKind,
    pub required_params: &'static [&'static str],
    pub body: BodyRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    SearchGames,
    GameInfo,
    Shops,
    UserInfo,
    WaitlistGames,
    WaitlistAdd,
    WaitlistRemove,
    CollectionGames,
    CollectionAdd,
    CollectionRemove,
    Copies,
    CopiesAdd,
    CopiesUpdate,
    CopiesDelete,
    Groups,
    GroupCreate,
    GroupsUpdate,
    GroupsDelete,
    Notes,
    NotesSet,
    NotesDelete,
}

impl Resource {
    pub const ALL: [Resource; 21] = [
        Resource::SearchGames,
        Resource::GameInfo,
        Resource::Shops,
        Resource::UserInfo,
        Resource::WaitlistGames,
        Resource::WaitlistAdd,
        Resource::WaitlistRemove,
        Resource::CollectionGames,
        Resource::CollectionAdd,
        Resource::CollectionRemove,
        Resource::Copies,
        Resource::CopiesAdd,
        Resource::CopiesUpdate,
        Resource::CopiesDelete,
        Resource::Groups,
        Resource::GroupCreate,
        Resource::GroupsUpdate,
        Resource::GroupsDelete,
        Resource::Notes,
        Resource::NotesSet,
        Resource::NotesDelete,
    ];

    pub fn endpoint(self) -> Endpoint {
        use AuthKind::{ApiKey, OAuth};
        use BodyRule::{None as NoBody, Required};

        const NO_PARAMS: &[&str] = &[];
        const TITLE: &[&str] = &["title"];
        const ID: &[&str] = &["id"];

        let (method, path, auth, required_params, body) = match self {
            Resource::SearchGames => (Method::GET, "games/search/v1", ApiKey, TITLE, NoBody),
            Resource::GameInfo => (Method::GET, "games/info/v2", ApiKey, ID, NoBody),
            Resource::Shops => (Method::GET, "service/shops/v1", ApiKey, NO_PARAMS, NoBody),
            Resource::UserInfo => (Method::GET, "user/info/v2", OAuth, NO_PARAMS, NoBody),
            Resource::WaitlistGames => (Method::GET, "waitlist/games/v1", OAuth, NO_PARAMS, NoBody),
            Resource::WaitlistAdd => (Method::PUT, "waitlist/games/v1", OAuth, NO_PARAMS, Required),
            Resource::WaitlistRemove => {
                (Method::DELETE, "waitlist/games/v1", OAuth, NO_PARAMS, Required)
            }
            Resource::CollectionGames => {
                (Method::GET, "collection/games/v1", OAuth, NO_PARAMS, NoBody)
            }
            Resource::CollectionAdd => {
                (Method::PUT, "collection/games/v1", OAuth, NO_PARAMS, Required)
            }
            Resource::CollectionRemove => {
                (Method::DELETE, "collection/games/v1", OAuth, NO_PARAMS, Required)
            }
            Resource::Copies => (Method::GET, "collection/copies/v1", OAuth, NO_PARAMS, Required),
            Resource::CopiesAdd => {
                (Method::POST, "collection/copies/v1", OAuth, NO_PARAMS, Required)
            }
            Resource::CopiesUpdate => {
                (Method::PATCH, "collection/copies/v1", OAuth, NO_PARAMS, Required)
            }
            Resource::CopiesDelete => {
                (Method::DELETE, "collection/copies/v1", OAuth, NO_PARAMS, Required)
            }
            Resource::Groups => (Method::GET, "collection/groups/v1", OAuth, NO_PARAMS, NoBody),
            Resource::GroupCreate => {
                (Method::POST, "collection/groups/v1", OAuth, NO_PARAMS, Required)
            }
            Resource::GroupsUpdate => {
                (Method::PATCH, "collection/groups/v1", OAuth, NO_PARAMS, Required)
            }
            Resource::GroupsDelete => {
                (Method::DELETE, "collection/groups/v1", OAuth, NO_PARAMS, Required)
            }
            Resource::Notes => (Method::GET, "user/notes/v1", OAuth, NO_PARAMS, NoBody),
            Resource::NotesSet => (Method::PUT, "user/notes/v1", OAuth, NO_PARAMS, Required),
            Resource::NotesDelete => (Method::DELETE, "user/notes/v1", OAuth, NO_PARAMS, Required),
        };

        Endpoint {
            method,
            path,
            auth,
            required_params,
            body,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::SearchGames => "search_games",
            Resource::GameInfo => "game_info",
            Resource::Shops => "shops",
            Resource::UserInfo => "user_info",
            Resource::WaitlistGames => "waitlist_games",
            Resource::WaitlistAdd => "waitlist_add",
            Resource::WaitlistRemove => "waitlist_remove",
            Resource::CollectionGames => "collection_games",
            Resource::CollectionAdd => "collection_add",
            Resource::CollectionRemove => "collection_remove",
            Resource::Copies => "copies",
            Resource::CopiesAdd => "copies_add",
            Resource::CopiesUpdate => "copies_update",
            Resource::CopiesDelete => "copies_delete",
            Resource::Groups => "groups",
            Resource::GroupCreate => "group_create",
            Resource::GroupsUpdate => "groups_update",
            Resource::GroupsDelete => "groups_delete",
            Resource::Notes => "notes",
            Resource::NotesSet => "notes_set",
            Resource::NotesDelete => "notes_delete",
        }
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resource::ALL
            .into_iter()
            .find(|resource| resource.as_str() == s)
            .ok_or_else(|| invalid_request_error(format!("unknown resource {}", s)))
    }
}

impl Endpoint {
    /// Checks a call against the endpoint before anything is sent
    pub fn validate(
        &self,
        query: &[(String, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<(), Error> {
        for param in self.required_params {
            let present = query
                .iter()
                .any(|(key, value)| key.as_str() == *param && !value.is_empty());
            if !present {
                return Err(invalid_request_error(format!(
                    "{} requires the {} parameter",
                    self.path, param
                )));
            }
        }

        match (self.body, body) {
            (BodyRule::Required, None) => Err(invalid_request_error(format!(
                "{} {} requires a body",
                self.method, self.path
            ))),
            (BodyRule::None, Some(_)) => Err(invalid_request_error(format!(
                "{} {} doesn't take a body",
                self.method, self.path
            ))),
            _ => Ok(()),
        }
    }
}
