pub mod types;

use crate::dispatch::Dispatcher;
use crate::errors::EmptyResult;
use crate::resources::Resource;
use crate::utils::id_list;
use crate::waitlist::types::WaitlistGame;
use crate::Error;

pub(crate) async fn get_games(dispatcher: &Dispatcher) -> Result<Vec<WaitlistGame>, Error> {
    log::debug!("Getting waitlist");
    dispatcher
        .call_list(Resource::WaitlistGames, Vec::new(), None)
        .await
}

pub(crate) async fn add_games<S: AsRef<str>>(dispatcher: &Dispatcher, ids: &[S]) -> EmptyResult {
    let body = id_list(ids)?;
    dispatcher
        .call(Resource::WaitlistAdd, Vec::new(), Some(body))
        .await?;
    Ok(())
}

pub(crate) async fn remove_games<S: AsRef<str>>(dispatcher: &Dispatcher, ids: &[S]) -> EmptyResult {
    let body = id_list(ids)?;
    dispatcher
        .call(Resource::WaitlistRemove, Vec::new(), Some(body))
        .await?;
    Ok(())
}
