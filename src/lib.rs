pub mod auth;
pub mod collection;
pub mod config;
pub mod constants;
mod core;
pub mod dispatch;
pub mod errors;
pub mod games;
pub mod notes;
pub mod resources;
pub mod shops;
pub mod user;
pub mod utils;
pub mod waitlist;

pub use crate::errors::Error;
pub use auth::authorizer::{AuthState, Authorizer};
pub use auth::prompt::{ConsolePrompt, RedirectPrompt};
pub use auth::store::TokenStore;
pub use auth::types::Token;
pub use config::{Config, CorruptTokenPolicy, Credentials};
pub use crate::core::Core;
pub use dispatch::{AuthKind, RequestDescriptor};
pub use resources::Resource;
