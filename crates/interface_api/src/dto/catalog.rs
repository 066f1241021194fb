//! Catalog DTOs

use serde::Serialize;

use domain_claims::catalog::{ClaimCategory, ClaimType};

#[derive(Debug, Serialize)]
pub struct ClaimTypeResponse {
    pub id: &'static str,
    pub label: &'static str,
    pub category: ClaimCategory,
}

impl From<ClaimType> for ClaimTypeResponse {
    fn from(claim_type: ClaimType) -> Self {
        Self {
            id: claim_type.id(),
            label: claim_type.label(),
            category: claim_type.category(),
        }
    }
}
