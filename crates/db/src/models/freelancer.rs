//! Freelancer roster entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use mixdesk_core::types::{DbId, Timestamp};

/// A row from the `freelancers` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Freelancer {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub specialty: String,
    pub fiverr_profile: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a freelancer row.
#[derive(Debug, Deserialize)]
pub struct CreateFreelancer {
    pub full_name: String,
    pub email: String,
    pub specialty: String,
    pub fiverr_profile: Option<String>,
    pub notes: Option<String>,
}
