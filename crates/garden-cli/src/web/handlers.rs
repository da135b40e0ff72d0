use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect};
use axum::Form;
use tracing::{debug, info};

use garden_db::models::PlantId;
use garden_db::queries::{harvests as harvest_db, plants as plant_db};

use super::error::AppError;
use super::forms::{HarvestForm, PlantForm};
use super::views;
use super::AppState;

fn detail_url(id: PlantId) -> String {
    format!("/plant/{id}")
}

/// `GET /`
pub async fn list_plants(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let plants = plant_db::list_plants(&state.pool).await?;
    Ok(Html(views::plants_list(&plants)))
}

/// `GET /about`
pub async fn about() -> Html<String> {
    Html(views::about())
}

/// `GET /plant/{plant_id}`
pub async fn plant_detail(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id: PlantId = raw_id.parse()?;
    let plant = plant_db::get_plant(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("plant {id}")))?;
    let harvests = harvest_db::list_harvests_for_plant(&state.pool, id).await?;
    Ok(Html(views::plant_detail(&plant, &harvests)))
}

/// `GET /create`
pub async fn create_form() -> Html<String> {
    Html(views::create_form())
}

/// `POST /create`
pub async fn create_plant(
    State(state): State<AppState>,
    Form(form): Form<PlantForm>,
) -> Result<Redirect, AppError> {
    let new = form.into_new_plant()?;
    let plant = plant_db::insert_plant(&state.pool, &new).await?;
    info!(plant_id = %plant.id, name = %plant.name, "plant created");
    Ok(Redirect::to(&detail_url(plant.id)))
}

/// `GET /edit/{plant_id}`
pub async fn edit_form(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id: PlantId = raw_id.parse()?;
    let plant = plant_db::get_plant(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("plant {id}")))?;
    Ok(Html(views::edit_form(&plant)))
}

/// `POST /edit/{plant_id}`: every field is rewritten, blanks included.
///
/// An unknown ID changes nothing and still redirects to the detail page.
pub async fn update_plant(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(form): Form<PlantForm>,
) -> Result<Redirect, AppError> {
    let id: PlantId = raw_id.parse()?;
    let fields = form.into_new_plant()?;
    match plant_db::update_plant(&state.pool, id, &fields).await? {
        Some(_) => info!(plant_id = %id, "plant updated"),
        None => debug!(plant_id = %id, "edit matched no plant"),
    }
    Ok(Redirect::to(&detail_url(id)))
}

/// `POST /harvest/{plant_id}`
pub async fn record_harvest(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Form(form): Form<HarvestForm>,
) -> Result<Redirect, AppError> {
    let id: PlantId = raw_id.parse()?;
    let new = form.into_new_harvest(id)?;
    let harvest = harvest_db::insert_harvest(&state.pool, &new).await?;
    info!(plant_id = %id, harvest_id = %harvest.id, "harvest recorded");
    Ok(Redirect::to(&detail_url(id)))
}

/// `POST /delete/{plant_id}`: redirects home even when nothing matched.
pub async fn delete_plant(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Redirect, AppError> {
    let id: PlantId = raw_id.parse()?;
    let deleted = plant_db::delete_plant_cascade(&state.pool, id).await?;
    info!(
        plant_id = %id,
        plants = deleted.plants,
        harvests = deleted.harvests,
        "plant deleted"
    );
    Ok(Redirect::to("/"))
}

/// Fallback for every unrouted request.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(views::not_found()))
}
