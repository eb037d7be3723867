use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use tracing::{error, instrument};

use crate::flash;
use crate::people::dto::{RegisterForm, SignInForm};
use crate::people::services::{self, RegisterOutcome, SignInOutcome};
use crate::render;
use crate::state::AppState;

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/registrations", get(registration_page))
        .route("/auth", get(sign_in_page))
        .route("/read-all", get(read_all))
}

pub fn submit_routes() -> Router<AppState> {
    Router::new()
        .route("/registrations", post(register))
        .route("/auth", post(sign_in))
}

// --- pages ---

pub async fn registration_page(headers: HeaderMap) -> impl IntoResponse {
    let mut response_headers = HeaderMap::new();
    let message = flash::take(&headers, &mut response_headers);
    (
        response_headers,
        Html(render::registration_page(message.as_deref())),
    )
}

pub async fn sign_in_page(headers: HeaderMap) -> impl IntoResponse {
    let mut response_headers = HeaderMap::new();
    let message = flash::take(&headers, &mut response_headers);
    (
        response_headers,
        Html(render::sign_in_page(message.as_deref())),
    )
}

/// Table of every registered person. Rows go through serialization, which
/// strips the password column, before the generic table renderer sees them.
#[instrument(skip(state))]
pub async fn read_all(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let people = services::list_all(&state.db).await.map_err(internal)?;
    let rows = people
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(internal)?;
    Ok(Html(render::json_table(&rows)))
}

// --- form submissions ---

#[instrument(skip(state, form))]
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, (StatusCode, String)> {
    let outcome = services::register(&state.db, &form.name, &form.email, &form.password)
        .await
        .map_err(internal)?;

    match outcome {
        RegisterOutcome::Registered(_) => Ok(Html(render::success_page(
            "User has been successfully registered",
        ))
        .into_response()),
        RegisterOutcome::EmptyField => {
            Ok(flash_redirect("/registrations", "Empty values not accepted"))
        }
        RegisterOutcome::InvalidEmail => Ok(flash_redirect(
            "/registrations",
            "Please enter a valid email format",
        )),
        RegisterOutcome::EmailTaken => Err((
            StatusCode::CONFLICT,
            format!("User {} exists already", form.email.trim()),
        )),
    }
}

#[instrument(skip(state, form))]
pub async fn sign_in(
    State(state): State<AppState>,
    Form(form): Form<SignInForm>,
) -> Result<Response, (StatusCode, String)> {
    let outcome = services::sign_in(&state.db, &form.email, &form.password)
        .await
        .map_err(internal)?;

    match outcome {
        SignInOutcome::SignedIn(person) => Ok(Html(render::success_page(&format!(
            "User {} has successfully Signed in",
            person.email
        )))
        .into_response()),
        SignInOutcome::EmptyField => Ok(flash_redirect("/auth", "Empty values not accepted")),
        SignInOutcome::InvalidEmail => {
            Ok(flash_redirect("/auth", "Please enter a valid email format"))
        }
        SignInOutcome::UnknownUser => Ok(flash_redirect("/registrations", "User doesn't exist.")),
        SignInOutcome::BadCredentials => {
            Err((StatusCode::UNAUTHORIZED, "Incorrect password".into()))
        }
    }
}

// --- helpers ---

fn flash_redirect(to: &str, message: &str) -> Response {
    let mut headers = HeaderMap::new();
    flash::set(&mut headers, message);
    (headers, Redirect::to(to)).into_response()
}

fn internal<E: std::fmt::Display>(err: E) -> (StatusCode, String) {
    error!(error = %err, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}
