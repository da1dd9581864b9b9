//! Customer handlers

use crate::error::ApiError;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use roster_core::domain::{Customer, CustomerId};
use roster_core::dto::CreateCustomerRequest;
use roster_core::rules::ValidationResult;
use roster_store::repo::{CreateOutcome, CustomerTable};
use std::str::FromStr;
use tracing::{debug, info};

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateCustomerRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    let customer = match request.validate() {
        ValidationResult::Valid(customer) => customer,
        ValidationResult::Invalid(errors) => {
            debug!(%errors, "rejected invalid customer");
            return Err(ApiError::Validation(errors));
        }
    };

    let outcome = state
        .with_store(move |store| store.customers().create(&customer))
        .await?;

    match outcome {
        CreateOutcome::Created(created) => {
            info!(id = %created.id, "customer created");
            let location = format!("/clientes/{}", created.id);
            Ok((
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(created),
            )
                .into_response())
        }
        CreateOutcome::DuplicateEmail => Err(ApiError::DuplicateEmail),
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, ApiError> {
    let customers = state.with_store(|store| store.customers().list()).await?;
    Ok(Json(customers))
}

pub async fn show(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    let id = CustomerId::from_str(&raw_id).map_err(|err| ApiError::BadRequest(err.to_string()))?;
    let customer = state
        .with_store(move |store| store.customers().get(id))
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(customer))
}
