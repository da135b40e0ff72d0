//! Database query functions for the `harvests` table.

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::models::{Harvest, NewHarvest, PlantId};

/// Record a harvest. The referenced plant is not required to exist.
pub async fn insert_harvest(pool: &PgPool, new: &NewHarvest) -> Result<Harvest> {
    let harvest = sqlx::query_as::<_, Harvest>(
        "INSERT INTO harvests (plant_id, quantity, date) \
         VALUES ($1, $2, $3) \
         RETURNING *",
    )
    .bind(new.plant_id)
    .bind(&new.quantity)
    .bind(&new.date)
    .fetch_one(pool)
    .await
    .with_context(|| format!("failed to insert harvest for plant {}", new.plant_id))?;

    Ok(harvest)
}

/// All harvests recorded against a plant, oldest first.
pub async fn list_harvests_for_plant(pool: &PgPool, plant_id: PlantId) -> Result<Vec<Harvest>> {
    let harvests = sqlx::query_as::<_, Harvest>(
        "SELECT * FROM harvests WHERE plant_id = $1 ORDER BY created_at, id",
    )
    .bind(plant_id)
    .fetch_all(pool)
    .await
    .context("failed to list harvests")?;

    Ok(harvests)
}

/// Number of harvests recorded against a plant.
pub async fn count_harvests_for_plant(pool: &PgPool, plant_id: PlantId) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM harvests WHERE plant_id = $1")
        .bind(plant_id)
        .fetch_one(pool)
        .await
        .context("failed to count harvests")?;

    Ok(count)
}
