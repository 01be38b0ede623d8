//! Contact form route handler.

use axum::{Json, extract::State};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::ContactSubmission;
use crate::state::AppState;

/// Contact form request body.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Response for form submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
}

/// Minimal shape check; real deliverability is the mail provider's problem.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Submit the contact form.
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn submit(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<Json<ContactResponse>> {
    let name = request.name.trim();
    let email = request.email.trim().to_lowercase();
    let message = request.message.trim();

    if name.is_empty() || message.is_empty() {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }
    if !is_valid_email(&email) {
        return Err(AppError::BadRequest(
            "Please enter a valid email address".to_string(),
        ));
    }

    let submission = ContactSubmission {
        name: name.to_string(),
        email,
        message: message.to_string(),
        submitted_at: Utc::now(),
    };
    state.contact().record(&submission)?;

    Ok(Json(ContactResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@nodot"));
        assert!(!is_valid_email("ada@.com"));
    }
}
