//! Repository for the `freelancers` table.

use sqlx::PgPool;

use mixdesk_core::types::DbId;

use crate::models::freelancer::{CreateFreelancer, Freelancer};

const COLUMNS: &str =
    "id, full_name, email, specialty, fiverr_profile, notes, created_at, updated_at";

/// Provides CRUD operations for the freelancer roster.
pub struct FreelancerRepo;

impl FreelancerRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateFreelancer,
    ) -> Result<Freelancer, sqlx::Error> {
        let query = format!(
            "INSERT INTO freelancers (full_name, email, specialty, fiverr_profile, notes) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Freelancer>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.specialty)
            .bind(&input.fiverr_profile)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Freelancer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM freelancers WHERE id = $1");
        sqlx::query_as::<_, Freelancer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the roster, alphabetical by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Freelancer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM freelancers ORDER BY full_name ASC");
        sqlx::query_as::<_, Freelancer>(&query).fetch_all(pool).await
    }

    /// Replace all editable fields of a freelancer.
    ///
    /// Returns the updated row, or `None` if it does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CreateFreelancer,
    ) -> Result<Option<Freelancer>, sqlx::Error> {
        let query = format!(
            "UPDATE freelancers \
             SET full_name = $2, email = $3, specialty = $4, fiverr_profile = $5, \
                 notes = $6, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Freelancer>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.specialty)
            .bind(&input.fiverr_profile)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a freelancer. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM freelancers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
