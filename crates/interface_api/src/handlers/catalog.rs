//! Claim type catalog handler

use axum::Json;

use domain_claims::catalog::ClaimType;

use crate::dto::catalog::ClaimTypeResponse;

/// Lists the claim types a customer can declare
pub async fn list_claim_types() -> Json<Vec<ClaimTypeResponse>> {
    Json(ClaimType::all().iter().copied().map(ClaimTypeResponse::from).collect())
}
