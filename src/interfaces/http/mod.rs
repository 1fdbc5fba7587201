//! Axum HTTP interface exposing the payment form flow.
//!
//! Routes:
//! - `GET /` renders the entry form
//! - `POST /` validates the submission; failures re-render the form with
//!   every collected message, success redirects to the payment page
//! - `GET /qr/:id` renders the payment detail page
//! - `GET /qr/:id/image` serves the QR code as PNG
//! - `GET /health` liveness probe

use axum::{
    Form, Json, Router,
    extract::{Host, Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use tracing::warn;

use crate::application::service::PaymentService;
use crate::domain::payment::{DEFAULT_PURPOSE, NewPayment};
use crate::error::PaymentError;
use crate::interfaces::qr;

pub mod pages;

use pages::FormValues;

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: PaymentService,
}

impl AppState {
    pub fn new(service: PaymentService) -> Self {
        Self { service }
    }
}

/// Builds the router with all routes wired to the given state.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(payment_form).post(create_payment))
        .route("/qr/:id", get(qr_page))
        .route("/qr/:id/image", get(qr_image))
        .route("/health", get(health))
        .with_state(state)
}

/// Raw form fields as submitted. An omitted purpose field deserializes to
/// `None`, which is distinct from an empty submission.
#[derive(Debug, Deserialize)]
pub struct PaymentForm {
    #[serde(default)]
    pub payer_name: String,
    #[serde(default)]
    pub amount: String,
    pub purpose: Option<String>,
}

async fn payment_form() -> Html<String> {
    Html(pages::render_form(&[], &FormValues::default()))
}

async fn create_payment(
    State(state): State<AppState>,
    Form(form): Form<PaymentForm>,
) -> Result<Response, ApiError> {
    let input = NewPayment {
        payer_name: form.payer_name.clone(),
        amount: form.amount.clone(),
        purpose: form.purpose.clone(),
    };
    match state.service.create(input).await {
        Ok(payment) => Ok(Redirect::to(&format!("/qr/{}", payment.id)).into_response()),
        Err(PaymentError::Validation(errors)) => {
            // Echo the submission untouched so the user can correct it.
            let values = FormValues {
                payer_name: form.payer_name,
                amount: form.amount,
                purpose: form.purpose.unwrap_or_else(|| DEFAULT_PURPOSE.to_string()),
            };
            let html = pages::render_form(&errors, &values);
            Ok((StatusCode::BAD_REQUEST, Html(html)).into_response())
        }
        Err(e) => Err(ApiError::from(e)),
    }
}

async fn qr_page(
    State(state): State<AppState>,
    Host(host): Host,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let payment = state.service.get(&id).await?;
    let share_link = format!("http://{}/qr/{}", host, payment.id);
    Ok(Html(pages::render_qr_page(&payment, &share_link)))
}

async fn qr_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let payment = state.service.get(&id).await?;
    let png = qr::payload_to_png(&payment.payload)?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// JSON error envelope for non-form failures.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub code: &'static str,
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        let (status, code) = match &err {
            PaymentError::NotFound(_) => (StatusCode::NOT_FOUND, "PAYMENT_NOT_FOUND"),
            PaymentError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            warn!("request failed: {err}");
        }
        Self {
            status,
            message: err.to_string(),
            code,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message,
            "error_code": self.code,
        });
        (self.status, Json(body)).into_response()
    }
}
