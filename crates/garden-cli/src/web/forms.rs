//! Form bodies posted by the HTML pages, and their conversion into typed
//! storage payloads.

use serde::Deserialize;
use thiserror::Error;

use garden_db::models::{NewHarvest, NewPlant, PlantId};

/// A required form field was absent or blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("the {0:?} field is required")]
pub struct FormError(pub &'static str);

/// Body of the create and edit forms.
#[derive(Debug, Default, Deserialize)]
pub struct PlantForm {
    pub plant_name: Option<String>,
    pub variety: Option<String>,
    pub photo: Option<String>,
    pub date_planted: Option<String>,
}

impl PlantForm {
    /// Validate into a full set of plant fields.
    ///
    /// `plant_name` must be non-blank; any other field that is missing
    /// becomes the empty string.
    pub fn into_new_plant(self) -> Result<NewPlant, FormError> {
        Ok(NewPlant {
            name: required("plant_name", self.plant_name)?,
            variety: optional(self.variety),
            photo_url: optional(self.photo),
            date_planted: optional(self.date_planted),
        })
    }
}

/// Body of the harvest form on the detail page.
#[derive(Debug, Default, Deserialize)]
pub struct HarvestForm {
    pub harvested_amount: Option<String>,
    pub date_harvested: Option<String>,
}

impl HarvestForm {
    pub fn into_new_harvest(self, plant_id: PlantId) -> Result<NewHarvest, FormError> {
        Ok(NewHarvest {
            plant_id,
            quantity: required("harvested_amount", self.harvested_amount)?,
            date: optional(self.date_harvested),
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, FormError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_owned()),
        _ => Err(FormError(field)),
    }
}

fn optional(value: Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_owned()
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn full_plant_form() {
        let form = PlantForm {
            plant_name: Some("Tomato".into()),
            variety: Some("Roma".into()),
            photo: Some("http://x/img.jpg".into()),
            date_planted: Some("2024-05-01".into()),
        };
        assert_eq!(
            form.into_new_plant().unwrap(),
            NewPlant {
                name: "Tomato".into(),
                variety: "Roma".into(),
                photo_url: "http://x/img.jpg".into(),
                date_planted: "2024-05-01".into(),
            }
        );
    }

    #[test]
    fn missing_optional_fields_become_empty() {
        let form = PlantForm {
            plant_name: Some("  Basil ".into()),
            ..PlantForm::default()
        };
        let plant = form.into_new_plant().unwrap();
        assert_eq!(plant.name, "Basil");
        assert_eq!(plant.variety, "");
        assert_eq!(plant.photo_url, "");
        assert_eq!(plant.date_planted, "");
    }

    #[test]
    fn blank_name_is_rejected() {
        let form = PlantForm {
            plant_name: Some("   ".into()),
            variety: Some("Roma".into()),
            ..PlantForm::default()
        };
        assert_eq!(form.into_new_plant().unwrap_err(), FormError("plant_name"));
        assert_eq!(
            PlantForm::default().into_new_plant().unwrap_err(),
            FormError("plant_name")
        );
    }

    #[test]
    fn harvest_form_requires_amount() {
        let id = PlantId::new(Uuid::new_v4());
        let err = HarvestForm::default().into_new_harvest(id).unwrap_err();
        assert_eq!(err.to_string(), "the \"harvested_amount\" field is required");

        let harvest = HarvestForm {
            harvested_amount: Some("3 tomatoes".into()),
            date_harvested: None,
        }
        .into_new_harvest(id)
        .unwrap();
        assert_eq!(harvest.plant_id, id);
        assert_eq!(harvest.quantity, "3 tomatoes");
        assert_eq!(harvest.date, "");
    }
}
