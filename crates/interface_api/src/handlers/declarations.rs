//! Declaration wizard handlers

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, error, warn};
use validator::Validate;

use core_kernel::DeclarationId;
use domain_claims::attachments::PhotoUpload;
use domain_claims::catalog::ClaimType;
use domain_claims::error::ClaimError;
use domain_claims::wizard::{submit_with_timeout, WizardNotification, WizardView};

use crate::dto::declarations::*;
use crate::{error::ApiError, AppState};

/// Opens a new declaration at step 1
pub async fn open_declaration(
    State(state): State<AppState>,
) -> (StatusCode, Json<WizardView>) {
    let view = state.store.open(state.rules.clone()).await;
    (StatusCode::CREATED, Json(view))
}

/// Gets the current state of a declaration
pub async fn get_declaration(
    State(state): State<AppState>,
    Path(id): Path<DeclarationId>,
) -> Result<Json<WizardView>, ApiError> {
    Ok(Json(state.store.view(id).await?))
}

/// Abandons a declaration
pub async fn close_declaration(
    State(state): State<AppState>,
    Path(id): Path<DeclarationId>,
) -> Result<StatusCode, ApiError> {
    state.store.close(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Selects the claim type
pub async fn select_claim_type(
    State(state): State<AppState>,
    Path(id): Path<DeclarationId>,
    Json(request): Json<SelectClaimTypeRequest>,
) -> Result<Json<WizardView>, ApiError> {
    let claim_type: ClaimType = request.claim_type.parse()?;
    let view = state
        .store
        .with_session(id, |w| {
            w.select_claim_type(claim_type)?;
            Ok::<_, ClaimError>(w.view())
        })
        .await??;
    Ok(Json(view))
}

/// Updates date, time, location and description
pub async fn update_draft(
    State(state): State<AppState>,
    Path(id): Path<DeclarationId>,
    Json(request): Json<UpdateDraftRequest>,
) -> Result<Json<WizardView>, ApiError> {
    request.validate()?;
    let view = state
        .store
        .with_session(id, |w| {
            if let Some(date) = request.date {
                w.set_date(date)?;
            }
            if let Some(time) = request.time {
                w.set_time(time)?;
            }
            if let Some(location) = request.location {
                w.set_location(location)?;
            }
            if let Some(description) = request.description {
                w.set_description(description)?;
            }
            Ok::<_, ClaimError>(w.view())
        })
        .await??;
    Ok(Json(view))
}

/// Moves to the next step if the current one is complete
pub async fn next_step(
    State(state): State<AppState>,
    Path(id): Path<DeclarationId>,
) -> Result<Json<WizardView>, ApiError> {
    let view = state
        .store
        .with_session(id, |w| {
            w.go_next()?;
            Ok::<_, ClaimError>(w.view())
        })
        .await??;
    Ok(Json(view))
}

/// Moves back one step
pub async fn previous_step(
    State(state): State<AppState>,
    Path(id): Path<DeclarationId>,
) -> Result<Json<WizardView>, ApiError> {
    let view = state
        .store
        .with_session(id, |w| {
            w.go_previous()?;
            Ok::<_, ClaimError>(w.view())
        })
        .await??;
    Ok(Json(view))
}

/// Attaches the photos of a multipart body, one part per file
pub async fn add_photos(
    State(state): State<AppState>,
    Path(id): Path<DeclarationId>,
    mut multipart: Multipart,
) -> Result<Json<AddPhotosResponse>, ApiError> {
    let mut uploads = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let file_name = field.file_name().unwrap_or("photo").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        uploads.push(PhotoUpload::new(file_name, content_type, data.to_vec()));
    }

    if uploads.is_empty() {
        return Err(ApiError::BadRequest("no files in request".to_string()));
    }
    debug!(declaration_id = %id, files = uploads.len(), "Photo upload received");

    let (outcome, declaration) = state
        .store
        .with_session(id, |w| {
            let outcome = w.add_photos(uploads)?;
            Ok::<_, ClaimError>((outcome, w.view()))
        })
        .await??;
    Ok(Json(AddPhotosResponse { outcome, declaration }))
}

/// Removes the photo at `index`
pub async fn remove_photo(
    State(state): State<AppState>,
    Path((id, index)): Path<(DeclarationId, usize)>,
) -> Result<Json<WizardView>, ApiError> {
    let view = state
        .store
        .with_session(id, |w| {
            w.remove_photo(index)?;
            Ok::<_, ClaimError>(w.view())
        })
        .await??;
    Ok(Json(view))
}

/// Sends the declaration to the claims backend
///
/// The session lock is released while the gateway works, so reads and a
/// concurrent (refused) second submit do not wait on the backend. The gateway
/// call and its completion run on their own task: a client that disconnects
/// mid-submit still leaves the session settled, never stuck in `Submitting`.
pub async fn submit_declaration(
    State(state): State<AppState>,
    Path(id): Path<DeclarationId>,
) -> Result<Json<SubmissionResponse>, ApiError> {
    let (ticket, metadata) = state
        .store
        .with_session(id, |w| {
            let ticket = w.begin_submission()?;
            let metadata = w.operation_metadata(ticket.attempt);
            Ok::<_, ClaimError>((ticket, metadata))
        })
        .await??;

    let AppState {
        store,
        gateway,
        rules,
    } = state;
    let attempt = ticket.attempt;
    let completion = tokio::spawn(async move {
        let outcome =
            submit_with_timeout(gateway.as_ref(), ticket.submission, metadata, &rules).await;
        store
            .with_session(id, |w| {
                let receipt = w.complete_submission(attempt, outcome)?;
                Ok::<_, ClaimError>((receipt, w.view()))
            })
            .await
    });

    let completed = completion.await.map_err(|e| {
        error!(declaration_id = %id, error = %e, "Submission task failed");
        ApiError::Internal("submission task failed".to_string())
    })?;

    match completed {
        Ok(Ok((receipt, declaration))) => Ok(Json(SubmissionResponse { receipt, declaration })),
        Ok(Err(err)) => Err(err.into()),
        Err(err) => {
            warn!(declaration_id = %id, "Declaration closed before its submission completed");
            Err(err)
        }
    }
}

/// Drains pending notifications
pub async fn take_notifications(
    State(state): State<AppState>,
    Path(id): Path<DeclarationId>,
) -> Result<Json<Vec<WizardNotification>>, ApiError> {
    let notifications = state
        .store
        .with_session(id, |w| w.take_notifications())
        .await?;
    Ok(Json(notifications))
}
