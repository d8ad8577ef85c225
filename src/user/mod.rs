pub mod types;

use crate::dispatch::Dispatcher;
use crate::resources::Resource;
use crate::Error;

pub(crate) async fn get_user_info(dispatcher: &Dispatcher) -> Result<types::UserInfo, Error> {
    dispatcher.call_as(Resource::UserInfo, Vec::new(), None).await
}
