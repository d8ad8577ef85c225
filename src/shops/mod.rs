pub mod types;

use crate::dispatch::Dispatcher;
use crate::resources::Resource;
use crate::shops::types::Shop;
use crate::Error;

/// Shops tracked by IsThereAnyDeal, `country` is a two letter code
pub(crate) async fn get_shops(
    dispatcher: &Dispatcher,
    country: Option<&str>,
) -> Result<Vec<Shop>, Error> {
    let query = country
        .map(|country| vec![("country".to_string(), country.to_string())])
        .unwrap_or_default();
    dispatcher.call_list(Resource::Shops, query, None).await
}
