pub mod types;

use crate::dispatch::Dispatcher;
use crate::errors::{json_error, EmptyResult};
use crate::notes::types::Note;
use crate::resources::Resource;
use crate::utils::id_list;
use crate::Error;

pub(crate) async fn get_notes(dispatcher: &Dispatcher) -> Result<Vec<Note>, Error> {
    dispatcher.call_list(Resource::Notes, Vec::new(), None).await
}

/// Replaces the notes of the listed games
pub(crate) async fn set_notes(dispatcher: &Dispatcher, notes: &[Note]) -> EmptyResult {
    let body = serde_json::to_value(notes).map_err(json_error)?;
    dispatcher
        .call(Resource::NotesSet, Vec::new(), Some(body))
        .await?;
    Ok(())
}

pub(crate) async fn delete_notes<S: AsRef<str>>(dispatcher: &Dispatcher, game_ids: &[S]) -> EmptyResult {
    let body = id_list(game_ids)?;
    dispatcher
        .call(Resource::NotesDelete, Vec::new(), Some(body))
        .await?;
    Ok(())
}
