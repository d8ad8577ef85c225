pub mod types;

use crate::collection::types::{
    CollectionGame, CopyUpdate, GameCopy, Group, GroupUpdate, NewCopy, NewGroup,
};
use crate::dispatch::Dispatcher;
use crate::errors::{json_error, EmptyResult};
use crate::resources::Resource;
use crate::utils::id_list;
use crate::Error;

pub(crate) async fn get_games(dispatcher: &Dispatcher) -> Result<Vec<CollectionGame>, Error> {
    log::debug!("Getting collection");
    dispatcher
        .call_list(Resource::CollectionGames, Vec::new(), None)
        .await
}

pub(crate) async fn add_games<S: AsRef<str>>(dispatcher: &Dispatcher, ids: &[S]) -> EmptyResult {
    dispatcher
        .call(Resource::CollectionAdd, Vec::new(), Some(id_list(ids)?))
        .await?;
    Ok(())
}

pub(crate) async fn remove_games<S: AsRef<str>>(
    dispatcher: &Dispatcher,
    ids: &[S],
) -> EmptyResult {
    dispatcher
        .call(Resource::CollectionRemove, Vec::new(), Some(id_list(ids)?))
        .await?;
    Ok(())
}

/// Copies of the given games, the API rejects a call without ids
pub(crate) async fn get_copies<S: AsRef<str>>(
    dispatcher: &Dispatcher,
    game_ids: &[S],
) -> Result<Vec<GameCopy>, Error> {
    dispatcher
        .call_list(Resource::Copies, Vec::new(), Some(id_list(game_ids)?))
        .await
}

pub(crate) async fn add_copies(dispatcher: &Dispatcher, copies: &[NewCopy]) -> EmptyResult {
    let body = serde_json::to_value(copies).map_err(json_error)?;
    dispatcher
        .call(Resource::CopiesAdd, Vec::new(), Some(body))
        .await?;
    Ok(())
}

pub(crate) async fn update_copies(dispatcher: &Dispatcher, updates: &[CopyUpdate]) -> EmptyResult {
    let body = serde_json::to_value(updates).map_err(json_error)?;
    dispatcher
        .call(Resource::CopiesUpdate, Vec::new(), Some(body))
        .await?;
    Ok(())
}

pub(crate) async fn delete_copies(dispatcher: &Dispatcher, ids: &[u64]) -> EmptyResult {
    let body = serde_json::to_value(ids).map_err(json_error)?;
    dispatcher
        .call(Resource::CopiesDelete, Vec::new(), Some(body))
        .await?;
    Ok(())
}

pub(crate) async fn get_groups(dispatcher: &Dispatcher) -> Result<Vec<Group>, Error> {
    dispatcher.call_list(Resource::Groups, Vec::new(), None).await
}

pub(crate) async fn create_group(
    dispatcher: &Dispatcher,
    title: &str,
    public: bool,
) -> Result<Group, Error> {
    let body = serde_json::to_value(NewGroup { title, public }).map_err(json_error)?;
    dispatcher
        .call_as(Resource::GroupCreate, Vec::new(), Some(body))
        .await
}

pub(crate) async fn update_groups(dispatcher: &Dispatcher, updates: &[GroupUpdate]) -> EmptyResult {
    let body = serde_json::to_value(updates).map_err(json_error)?;
    dispatcher
        .call(Resource::GroupsUpdate, Vec::new(), Some(body))
        .await?;
    Ok(())
}

pub(crate) async fn delete_groups(dispatcher: &Dispatcher, ids: &[u64]) -> EmptyResult {
    let body = serde_json::to_value(ids).map_err(json_error)?;
    dispatcher
        .call(Resource::GroupsDelete, Vec::new(), Some(body))
        .await?;
    Ok(())
}
