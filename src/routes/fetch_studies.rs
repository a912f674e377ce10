use std::fmt::Debug;

use anyhow::Context;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::{search_term, DateRange, SponsorQuery, StudyResults};
use crate::registry_client::RegistryClient;

#[derive(Debug, Deserialize)]
pub struct Parameters {
    sponsors: String,
    email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StudiesResponse {
    pub email: String,
    pub results: StudyResults,
}

#[tracing::instrument(
    name = "Fetching recently updated studies",
    skip(registry_client, parameters),
    fields(
        sponsors = %parameters.sponsors,
        email = %parameters.email,
    ),
)]
pub async fn fetch_studies(
    State(registry_client): State<RegistryClient>,
    Query(parameters): Query<Parameters>,
) -> Result<Json<StudiesResponse>, FetchStudiesError> {
    let sponsors =
        SponsorQuery::parse(&parameters.sponsors).map_err(FetchStudiesError::ValidationError)?;
    let query_term = search_term(&sponsors, &DateRange::last_day());

    tracing::info!(query_term = %query_term, "Querying the study registry");
    let records = registry_client
        .search_studies(&query_term)
        .await
        .context("Failed to fetch studies from the registry")?;
    tracing::info!(matches = records.len(), "Study registry query succeeded");

    Ok(Json(StudiesResponse {
        email: parameters.email,
        results: records.into(),
    }))
}

#[derive(thiserror::Error)]
pub enum FetchStudiesError {
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl Debug for FetchStudiesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<String>,
}

impl IntoResponse for FetchStudiesError {
    fn into_response(self) -> axum::response::Response {
        match &self {
            FetchStudiesError::ValidationError(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody {
                    error: message.clone(),
                    trace: None,
                }),
            ),
            FetchStudiesError::UnexpectedError(error) => {
                tracing::error!(error.cause_chain = ?self, "Study lookup failed");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: format!("{:#}", error),
                        trace: Some(format!("{:?}", self)),
                    }),
                )
            }
        }
        .into_response()
    }
}

fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
