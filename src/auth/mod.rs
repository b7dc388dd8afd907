mod claims;
mod dto;
pub(crate) mod extractors;
pub mod handlers;
mod jwt;
mod password;

pub use extractors::AuthUser;
pub use jwt::JwtKeys;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::auth_routes())
        .merge(handlers::me_routes())
}
