//! Database query functions for the `plants` table.

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::models::{NewPlant, Plant, PlantId};

/// Insert a new plant. Returns the row with server-generated `id` and
/// `created_at`.
pub async fn insert_plant(pool: &PgPool, new: &NewPlant) -> Result<Plant> {
    let plant = sqlx::query_as::<_, Plant>(
        "INSERT INTO plants (name, variety, photo_url, date_planted) \
         VALUES ($1, $2, $3, $4) \
         RETURNING *",
    )
    .bind(&new.name)
    .bind(&new.variety)
    .bind(&new.photo_url)
    .bind(&new.date_planted)
    .fetch_one(pool)
    .await
    .with_context(|| format!("failed to insert plant {:?}", new.name))?;

    Ok(plant)
}

/// Fetch a plant by its ID.
pub async fn get_plant(pool: &PgPool, id: PlantId) -> Result<Option<Plant>> {
    let plant = sqlx::query_as::<_, Plant>("SELECT * FROM plants WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch plant")?;

    Ok(plant)
}

/// List every plant in insertion order (oldest first).
pub async fn list_plants(pool: &PgPool) -> Result<Vec<Plant>> {
    let plants = sqlx::query_as::<_, Plant>("SELECT * FROM plants ORDER BY created_at, id")
        .fetch_all(pool)
        .await
        .context("failed to list plants")?;

    Ok(plants)
}

/// Overwrite all four editable fields of a plant.
///
/// Returns the updated row, or `None` if no plant has this ID.
pub async fn update_plant(pool: &PgPool, id: PlantId, fields: &NewPlant) -> Result<Option<Plant>> {
    let plant = sqlx::query_as::<_, Plant>(
        "UPDATE plants \
         SET name = $1, variety = $2, photo_url = $3, date_planted = $4 \
         WHERE id = $5 \
         RETURNING *",
    )
    .bind(&fields.name)
    .bind(&fields.variety)
    .bind(&fields.photo_url)
    .bind(&fields.date_planted)
    .bind(id)
    .fetch_optional(pool)
    .await
    .with_context(|| format!("failed to update plant {id}"))?;

    Ok(plant)
}

/// Counts of rows removed by [`delete_plant_cascade`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletedRows {
    pub plants: u64,
    pub harvests: u64,
}

/// Delete a plant and every harvest recorded against it.
///
/// Both deletes run in one transaction. Deleting an unknown ID is not an
/// error; the returned counts are simply zero.
pub async fn delete_plant_cascade(pool: &PgPool, id: PlantId) -> Result<DeletedRows> {
    let mut tx = pool.begin().await.context("failed to begin transaction")?;

    let plants = sqlx::query("DELETE FROM plants WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("failed to delete plant {id}"))?
        .rows_affected();

    let harvests = sqlx::query("DELETE FROM harvests WHERE plant_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("failed to delete harvests of plant {id}"))?
        .rows_affected();

    tx.commit().await.context("failed to commit transaction")?;

    Ok(DeletedRows { plants, harvests })
}
