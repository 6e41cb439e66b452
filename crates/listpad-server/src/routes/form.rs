//! Listing form routes: `GET /` and `POST /`.
//!
//! `GET /` opens a fresh view and renders it. `POST /` runs one submit
//! against the view named by the hidden `view_id` field:
//!
//! | Outcome               | Response                                   |
//! |-----------------------|--------------------------------------------|
//! | stored                | `303` to `/thank-you`, view closed         |
//! | a field failed        | `422` form with inline errors              |
//! | store failed          | `503` form with the error toast            |
//! | view already running  | `409` form with the overlay, button locked |
//!
//! The view's lock is held only while the form is read or updated, never
//! across the insert. The insert and its follow-up run on their own task,
//! so a client that disconnects mid-request neither abandons the insert
//! nor leaves the view behind.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use serde::Deserialize;
use tracing::{debug, info};
use uuid::Uuid;

use listpad_core::error::SubmitError;
use listpad_core::form::SubmissionForm;
use listpad_core::listing::ListingSubmission;
use listpad_core::route::Route;

use crate::error::AppError;
use crate::render;
use crate::state::AppState;
use crate::views::ViewHandle;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(Route::SubmissionForm.path(), get(show_form).post(submit_form))
}

/// Body of `POST /`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SubmitRequest {
    view_id: Option<String>,
    #[serde(flatten)]
    listing: ListingSubmission,
}

impl SubmitRequest {
    fn view_id(&self) -> Option<Uuid> {
        self.view_id.as_deref().and_then(|id| Uuid::parse_str(id).ok())
    }
}

async fn show_form(State(state): State<Arc<AppState>>) -> Html<String> {
    let (id, handle) = state.views.open(state.new_form()).await;
    debug!(view_id = %id, "form view opened");
    let form = handle.lock().await;
    Html(render::form_page(id, &form, &[]))
}

async fn submit_form(
    State(state): State<Arc<AppState>>,
    Form(req): Form<SubmitRequest>,
) -> Result<Response, AppError> {
    let (id, handle) = lookup_or_open(&state, req.view_id()).await;

    let pending = {
        let mut form = handle.lock().await;
        match form.begin(req.listing) {
            Ok(pending) => pending,
            Err(SubmitError::Invalid(errors)) => {
                debug!(view_id = %id, fields = errors.len(), "listing rejected by validation");
                return Ok(page(StatusCode::UNPROCESSABLE_ENTITY, id, &mut form));
            }
            Err(SubmitError::Busy) => {
                debug!(view_id = %id, "submit refused, view already submitting");
                return Ok(page(StatusCode::CONFLICT, id, &mut form));
            }
            Err(SubmitError::Persistence(_)) => {
                return Ok(page(StatusCode::SERVICE_UNAVAILABLE, id, &mut form));
            }
        }
    };

    let task = tokio::spawn(async move {
        let outcome = pending.run().await;
        let mut form = handle.lock().await;
        let finished = form.finish(outcome);
        match finished {
            Ok(route) => {
                drop(form);
                state.views.close(id).await;
                info!(view_id = %id, "form view closed after submit");
                Redirect::to(route.path()).into_response()
            }
            Err(_) => page(StatusCode::SERVICE_UNAVAILABLE, id, &mut form),
        }
    });

    task.await.map_err(|e| AppError::Internal(format!("submit task failed: {e}")))
}

/// The view named by the request, or a new one if it is unknown or expired.
async fn lookup_or_open(state: &AppState, id: Option<Uuid>) -> (Uuid, ViewHandle) {
    if let Some(id) = id {
        if let Some(handle) = state.views.get(id).await {
            return (id, handle);
        }
        debug!(view_id = %id, "unknown form view, opening a new one");
    }
    state.views.open(state.new_form()).await
}

/// Render the form, handing each active notification to the page once.
fn page(status: StatusCode, id: Uuid, form: &mut SubmissionForm) -> Response {
    let notes = form.notifications().active().to_vec();
    let html = render::form_page(id, form, &notes);
    for note in &notes {
        form.notifications().dismiss(note.id);
    }
    (status, Html(html)).into_response()
}
