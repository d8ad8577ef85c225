pub mod types;

use crate::dispatch::Dispatcher;
use crate::errors::request_error;
use crate::games::types::{GameInfo, GameSummary};
use crate::resources::Resource;
use crate::utils::game_redirect_url;
use crate::Error;

pub(crate) async fn search(
    dispatcher: &Dispatcher,
    title: &str,
    max_results: Option<u32>,
) -> Result<Vec<GameSummary>, Error> {
    log::debug!("Searching games for {:?}", title);
    let mut query = vec![("title".to_string(), title.to_string())];
    if let Some(results) = max_results {
        query.push(("results".to_string(), results.to_string()));
    }
    dispatcher
        .call_list(Resource::SearchGames, query, None)
        .await
}

pub(crate) async fn info(dispatcher: &Dispatcher, id: &str) -> Result<GameInfo, Error> {
    let query = vec![("id".to_string(), id.to_string())];
    dispatcher.call_as(Resource::GameInfo, query, None).await
}

/// `None` when the API doesn't know the id
pub(crate) async fn title(dispatcher: &Dispatcher, id: &str) -> Result<Option<String>, Error> {
    match info(dispatcher, id).await {
        Ok(info) => Ok(Some(info.title().clone())),
        Err(err) if err.is_client_error() => {
            log::debug!("No title for {}: {}", id, err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

pub(crate) async fn titles<S: AsRef<str>>(
    dispatcher: &Dispatcher,
    ids: &[S],
) -> Result<Vec<Option<String>>, Error> {
    let mut titles = Vec::with_capacity(ids.len());
    for id in ids {
        titles.push(title(dispatcher, id.as_ref()).await?);
    }
    Ok(titles)
}

/// Follows the site redirect from the id link to the canonical slug page
pub(crate) async fn resolve_url(dispatcher: &Dispatcher, id: &str) -> Result<String, Error> {
    let response = dispatcher
        .client()
        .get(game_redirect_url(id))
        .send()
        .await
        .map_err(request_error)?;
    Ok(response.url().to_string())
}
