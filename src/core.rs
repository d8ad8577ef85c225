use std::sync::Arc;

use serde_json::Value;

use crate::auth::authorizer::AuthState;
use crate::auth::prompt::{ConsolePrompt, RedirectPrompt};
use crate::collection::types::{CollectionGame, CopyUpdate, GameCopy, Group, GroupUpdate, NewCopy};
use crate::config::Config;
use crate::dispatch::{AuthKind, Dispatcher, RequestDescriptor};
use crate::errors::{self, EmptyResult};
use crate::games::types::{GameInfo, GameSummary};
use crate::notes::types::Note;
use crate::resources::Resource;
use crate::shops::types::Shop;
use crate::user::types::UserInfo;
use crate::waitlist::types::WaitlistGame;
use crate::{collection, games, notes, shops, user, waitlist};

/// Entry point
#[derive(Clone)]
pub struct Core {
    dispatcher: Arc<Dispatcher>,
}

impl Core {
    /// `prompt` is asked for the redirect URL whenever the user has to authorize
    pub fn new<P>(config: Config, prompt: P) -> Result<Self, errors::Error>
    where
        P: RedirectPrompt + 'static,
    {
        let dispatcher = Dispatcher::new(&config, Box::new(prompt))?;
        Ok(Self {
            dispatcher: Arc::new(dispatcher),
        })
    }

    /// Authorizes through the browser and a line pasted on stdin
    pub fn with_console_prompt(config: Config) -> Result<Self, errors::Error> {
        Self::new(config, ConsolePrompt::new())
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn auth_state(&self) -> AuthState {
        self.dispatcher.authorizer().state()
    }

    /// Makes sure a valid token is available, authorizing or refreshing if needed
    pub async fn ensure_auth(&self) -> EmptyResult {
        self.dispatcher.authorizer().ensure_valid().await?;
        Ok(())
    }

    /// Raw request against any path of the API
    pub async fn send(
        &self,
        descriptor: RequestDescriptor,
        auth: AuthKind,
    ) -> Result<Value, errors::Error> {
        self.dispatcher.send(descriptor, auth).await
    }

    /// Raw request against an entry of the resource table
    pub async fn call(
        &self,
        resource: Resource,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<Value, errors::Error> {
        self.dispatcher.call(resource, query, body).await
    }

    pub async fn search_games(
        &self,
        title: &str,
        max_results: Option<u32>,
    ) -> Result<Vec<GameSummary>, errors::Error> {
        games::search(&self.dispatcher, title, max_results).await
    }

    pub async fn game_info(&self, id: &str) -> Result<GameInfo, errors::Error> {
        games::info(&self.dispatcher, id).await
    }

    /// `None` if the API doesn't know the id
    pub async fn game_title(&self, id: &str) -> Result<Option<String>, errors::Error> {
        games::title(&self.dispatcher, id).await
    }

    pub async fn game_titles<S: AsRef<str>>(
        &self,
        ids: &[S],
    ) -> Result<Vec<Option<String>>, errors::Error> {
        games::titles(&self.dispatcher, ids).await
    }

    /// Slug based page URL, requires a request to the site
    pub async fn resolve_game_url(&self, id: &str) -> Result<String, errors::Error> {
        games::resolve_url(&self.dispatcher, id).await
    }

    /// Doesn't require authentication
    pub async fn shops(&self, country: Option<&str>) -> Result<Vec<Shop>, errors::Error> {
        shops::get_shops(&self.dispatcher, country).await
    }

    /// Requires authentication
    pub async fn user_info(&self) -> Result<UserInfo, errors::Error> {
        user::get_user_info(&self.dispatcher).await
    }

    /// Requires authentication
    pub async fn waitlist(&self) -> Result<Vec<WaitlistGame>, errors::Error> {
        waitlist::get_games(&self.dispatcher).await
    }

    pub async fn add_to_waitlist<S: AsRef<str>>(&self, ids: &[S]) -> EmptyResult {
        waitlist::add_games(&self.dispatcher, ids).await
    }

    pub async fn remove_from_waitlist<S: AsRef<str>>(&self, ids: &[S]) -> EmptyResult {
        waitlist::remove_games(&self.dispatcher, ids).await
    }

    /// Requires authentication
    pub async fn collection(&self) -> Result<Vec<CollectionGame>, errors::Error> {
        collection::get_games(&self.dispatcher).await
    }

    pub async fn add_to_collection<S: AsRef<str>>(&self, ids: &[S]) -> EmptyResult {
        collection::add_games(&self.dispatcher, ids).await
    }

    pub async fn remove_from_collection<S: AsRef<str>>(&self, ids: &[S]) -> EmptyResult {
        collection::remove_games(&self.dispatcher, ids).await
    }

    /// Copies of the listed games
    pub async fn copies<S: AsRef<str>>(
        &self,
        game_ids: &[S],
    ) -> Result<Vec<GameCopy>, errors::Error> {
        collection::get_copies(&self.dispatcher, game_ids).await
    }

    pub async fn add_copies(&self, copies: &[NewCopy]) -> EmptyResult {
        collection::add_copies(&self.dispatcher, copies).await
    }

    pub async fn update_copies(&self, updates: &[CopyUpdate]) -> EmptyResult {
        collection::update_copies(&self.dispatcher, updates).await
    }

    pub async fn delete_copies(&self, ids: &[u64]) -> EmptyResult {
        collection::delete_copies(&self.dispatcher, ids).await
    }

    /// Collection categories
    pub async fn groups(&self) -> Result<Vec<Group>, errors::Error> {
        collection::get_groups(&self.dispatcher).await
    }

    pub async fn create_group(&self, title: &str, public: bool) -> Result<Group, errors::Error> {
        collection::create_group(&self.dispatcher, title, public).await
    }

    pub async fn update_groups(&self, updates: &[GroupUpdate]) -> EmptyResult {
        collection::update_groups(&self.dispatcher, updates).await
    }

    pub async fn delete_groups(&self, ids: &[u64]) -> EmptyResult {
        collection::delete_groups(&self.dispatcher, ids).await
    }

    /// Requires authentication
    pub async fn notes(&self) -> Result<Vec<Note>, errors::Error> {
        notes::get_notes(&self.dispatcher).await
    }

    pub async fn set_notes(&self, notes: &[Note]) -> EmptyResult {
        notes::set_notes(&self.dispatcher, notes).await
    }

    pub async fn delete_notes<S: AsRef<str>>(&self, game_ids: &[S]) -> EmptyResult {
        notes::delete_notes(&self.dispatcher, game_ids).await
    }
}
