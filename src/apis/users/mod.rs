//! APIs and models related to the merchant user bound to a chat identity.

mod api;
mod model;

pub use api::UsersApi;
pub use model::*;
