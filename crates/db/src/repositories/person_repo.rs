//! Repository for the `people` table.

use shotboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::person::{CreatePerson, Person};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, has_avatar, created_at, updated_at";

/// Provides read and create operations for people.
pub struct PersonRepo;

impl PersonRepo {
    /// Insert a new person, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePerson) -> Result<Person, sqlx::Error> {
        let query = format!(
            "INSERT INTO people (first_name, last_name, has_avatar)
             VALUES ($1, $2, COALESCE($3, false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.has_avatar)
            .fetch_one(pool)
            .await
    }

    /// Find a person by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Person>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM people WHERE id = $1");
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
