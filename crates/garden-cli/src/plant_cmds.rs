//! `garden plant ...` subcommands: read-only views of the journal from the
//! terminal.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;
use sqlx::PgPool;

use garden_db::models::{Harvest, Plant, PlantId};
use garden_db::queries::{harvests as harvest_db, plants as plant_db};

use crate::PlantCommands;

#[derive(Debug, Serialize)]
struct PlantDetail {
    #[serde(flatten)]
    plant: Plant,
    harvests: Vec<Harvest>,
}

pub async fn run_plant_command(command: PlantCommands, pool: &PgPool) -> Result<()> {
    let mut out = std::io::stdout();
    match command {
        PlantCommands::List { json } => list(pool, json, &mut out).await,
        PlantCommands::Show { plant_id, json } => show(pool, &plant_id, json, &mut out).await,
    }
}

async fn list(pool: &PgPool, json: bool, out: &mut impl Write) -> Result<()> {
    let plants = plant_db::list_plants(pool).await?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&plants)?)?;
        return Ok(());
    }

    if plants.is_empty() {
        writeln!(out, "No plants.")?;
        return Ok(());
    }

    writeln!(out, "ID\tNAME\tVARIETY\tPLANTED\tHARVESTS")?;
    for plant in &plants {
        let harvests = harvest_db::count_harvests_for_plant(pool, plant.id).await?;
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            plant.id, plant.name, plant.variety, plant.date_planted, harvests
        )?;
    }
    Ok(())
}

async fn show(pool: &PgPool, raw_id: &str, json: bool, out: &mut impl Write) -> Result<()> {
    let id: PlantId = raw_id
        .parse()
        .with_context(|| format!("invalid plant ID: {raw_id}"))?;
    let plant = plant_db::get_plant(pool, id)
        .await?
        .with_context(|| format!("plant {id} not found"))?;
    let harvests = harvest_db::list_harvests_for_plant(pool, id).await?;

    if json {
        let detail = PlantDetail { plant, harvests };
        writeln!(out, "{}", serde_json::to_string_pretty(&detail)?)?;
        return Ok(());
    }

    writeln!(out, "{} ({})", plant.name, plant.id)?;
    writeln!(out, "  variety:      {}", plant.variety)?;
    writeln!(out, "  photo:        {}", plant.photo_url)?;
    writeln!(out, "  date planted: {}", plant.date_planted)?;
    writeln!(out, "  added:        {}", plant.created_at.format("%Y-%m-%d %H:%M"))?;
    if harvests.is_empty() {
        writeln!(out, "  no harvests")?;
    } else {
        writeln!(out, "  harvests:")?;
        for h in &harvests {
            writeln!(out, "    {}\t{}", h.date, h.quantity)?;
        }
    }
    Ok(())
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
