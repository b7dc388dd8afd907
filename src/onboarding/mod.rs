mod dto;
pub mod handlers;
mod model;
pub mod schema;
mod services;

pub use model::ProfileFields;
pub use schema::OnboardingSchema;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::routes())
}
