//! APIs and models related to channel accounts.

mod api;
mod model;

pub use api::ChannelAccountsApi;
pub use model::*;
