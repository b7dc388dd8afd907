use axum::{extract::State, routing::get, Json, Router};
use bytes::Bytes;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::AuthUser,
    error::ApiError,
    state::AppState,
    users::{PublicUser, User},
};

use super::dto::FormResponse;
use super::services::{apply_submission, parse_submission};

pub fn routes() -> Router<AppState> {
    Router::new().route("/onboarding", get(fetch_form).post(submit_answers))
}

/// Resolve the authenticated user and enforce the one-shot completion gate
/// shared by both methods.
async fn load_pending_user(state: &AppState, user_id: Uuid) -> Result<User, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await
        .map_err(ApiError::unexpected)?
        // A token whose subject no longer exists is as good as anonymous.
        .ok_or(ApiError::AuthRequired)?;

    if user.completed_onboarding {
        warn!(user_id = %user.id, "onboarding already completed");
        return Err(ApiError::AlreadyCompleted);
    }
    Ok(user)
}

/// GET /onboarding — the form schema for a user who still has to fill it.
#[instrument(skip(state))]
pub async fn fetch_form(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<FormResponse>, ApiError> {
    load_pending_user(&state, user_id).await?;
    Ok(Json(FormResponse {
        steps: state.schema.steps().to_vec(),
    }))
}

/// POST /onboarding — validate the submitted answers, apply them to the
/// user record, mark onboarding completed and persist.
///
/// The body is taken raw so a parse failure answers with the documented
/// 400 instead of the framework's default rejection.
#[instrument(skip(state, body))]
pub async fn submit_answers(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    body: Bytes,
) -> Result<Json<PublicUser>, ApiError> {
    let mut user = load_pending_user(&state, user_id).await?;

    // Validate the whole batch before touching the record.
    let fields = parse_submission(&state.schema, &body)?;
    apply_submission(&mut user, fields);

    let saved = user.save_profile(&state.db).await.map_err(|e| {
        error!(error = %e, user_id = %user.id, "saving onboarding answers failed");
        ApiError::Persistence(e.to_string())
    })?;

    info!(user_id = %saved.id, "onboarding completed");
    Ok(Json(PublicUser::from(saved)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboarding::OnboardingSchema;

    #[test]
    fn form_response_nests_steps_as_arrays() {
        let schema = OnboardingSchema::new().expect("schema builds");
        let response = FormResponse {
            steps: schema.steps().to_vec(),
        };
        let json = serde_json::to_value(&response).expect("serialize form");

        let steps = json["steps"].as_array().expect("steps array");
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0][0]["name"], "firstName");
        assert_eq!(steps[0][0]["required"], true);
        assert_eq!(steps[1][1]["type"], "yes-no");
    }
}
