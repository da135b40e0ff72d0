//! Server-rendered HTML pages.
//!
//! Every page is a pure function from typed data to a `String`. User-supplied
//! values pass through [`escape`] before interpolation.

use garden_db::models::{Harvest, Plant};

/// Escape the five HTML-significant characters.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    let title = escape(title);
    format!(
        "<!DOCTYPE html>\
<html><head><meta charset=\"utf-8\"><title>{title} | Garden Journal</title></head><body>\
<nav><a href=\"/\">Plants</a> | <a href=\"/create\">New plant</a> | <a href=\"/about\">About</a></nav>\
<main><h1>{title}</h1>{body}</main>\
</body></html>"
    )
}

/// Shared fields of the create and edit forms.
fn plant_fields(name: &str, variety: &str, photo_url: &str, date_planted: &str) -> String {
    format!(
        "<label>Name <input type=\"text\" name=\"plant_name\" value=\"{name}\" required></label>\
<label>Variety <input type=\"text\" name=\"variety\" value=\"{variety}\"></label>\
<label>Photo URL <input type=\"url\" name=\"photo\" value=\"{photo_url}\"></label>\
<label>Date planted <input type=\"date\" name=\"date_planted\" value=\"{date_planted}\"></label>",
        name = escape(name),
        variety = escape(variety),
        photo_url = escape(photo_url),
        date_planted = escape(date_planted),
    )
}

pub fn plants_list(plants: &[Plant]) -> String {
    let items = if plants.is_empty() {
        "<p>No plants yet. <a href=\"/create\">Add one</a>.</p>".to_string()
    } else {
        let rows = plants
            .iter()
            .map(|p| {
                format!(
                    "<li class=\"plant\"><a href=\"/plant/{id}\">{name}</a> {variety}</li>",
                    id = p.id,
                    name = escape(&p.name),
                    variety = escape(&p.variety),
                )
            })
            .collect::<Vec<_>>()
            .join("");
        format!("<ul>{rows}</ul>")
    };
    layout("My Plants", &items)
}

pub fn plant_detail(plant: &Plant, harvests: &[Harvest]) -> String {
    let photo = if plant.photo_url.is_empty() {
        String::new()
    } else {
        format!(
            "<img src=\"{src}\" alt=\"{alt}\" width=\"300\">",
            src = escape(&plant.photo_url),
            alt = escape(&plant.name),
        )
    };

    let harvest_list = if harvests.is_empty() {
        "<p>No harvests recorded yet.</p>".to_string()
    } else {
        let rows = harvests
            .iter()
            .map(|h| {
                format!(
                    "<li class=\"harvest\"><span class=\"quantity\">{quantity}</span> \
on <span class=\"date\">{date}</span></li>",
                    quantity = escape(&h.quantity),
                    date = escape(&h.date),
                )
            })
            .collect::<Vec<_>>()
            .join("");
        format!("<ul>{rows}</ul>")
    };

    let body = format!(
        "{photo}\
<dl>\
<dt>Variety</dt><dd class=\"variety\">{variety}</dd>\
<dt>Photo</dt><dd class=\"photo_url\">{photo_url}</dd>\
<dt>Date planted</dt><dd class=\"date_planted\">{date_planted}</dd>\
</dl>\
<p><a href=\"/edit/{id}\">Edit</a></p>\
<form method=\"post\" action=\"/delete/{id}\"><button type=\"submit\">Delete</button></form>\
<h2>Harvests</h2>{harvest_list}\
<form method=\"post\" action=\"/harvest/{id}\">\
<label>Amount <input type=\"text\" name=\"harvested_amount\" required></label>\
<label>Date <input type=\"date\" name=\"date_harvested\"></label>\
<button type=\"submit\">Record harvest</button></form>",
        id = plant.id,
        variety = escape(&plant.variety),
        photo_url = escape(&plant.photo_url),
        date_planted = escape(&plant.date_planted),
    );
    layout(&plant.name, &body)
}

pub fn create_form() -> String {
    let body = format!(
        "<form method=\"post\" action=\"/create\">{fields}<button type=\"submit\">Create</button></form>",
        fields = plant_fields("", "", "", ""),
    );
    layout("New Plant", &body)
}

pub fn edit_form(plant: &Plant) -> String {
    let body = format!(
        "<form method=\"post\" action=\"/edit/{id}\">{fields}<button type=\"submit\">Save</button></form>",
        id = plant.id,
        fields = plant_fields(
            &plant.name,
            &plant.variety,
            &plant.photo_url,
            &plant.date_planted
        ),
    );
    layout(&format!("Edit {}", plant.name), &body)
}

pub fn about() -> String {
    layout(
        "About",
        "<p>Garden Journal keeps track of the plants in your garden and \
everything you harvest from them. Add a plant, then record each harvest \
from its page.</p>",
    )
}

pub fn not_found() -> String {
    layout(
        "Page Not Found",
        "<p>Nothing lives at this address. <a href=\"/\">Back to your plants</a>.</p>",
    )
}

pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        "<p class=\"error\">{message}</p><p><a href=\"/\">Back to your plants</a></p>",
        message = escape(message),
    );
    layout(title, &body)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use garden_db::models::PlantId;

    use super::*;

    fn plant(name: &str, photo_url: &str) -> Plant {
        Plant {
            id: PlantId::new(Uuid::new_v4()),
            name: name.to_string(),
            variety: "Roma".to_string(),
            photo_url: photo_url.to_string(),
            date_planted: "2024-05-01".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn escape_replaces_markup() {
        assert_eq!(
            escape("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;"
        );
        assert_eq!(escape("plain text"), "plain text");
    }

    #[test]
    fn empty_list_offers_create_link() {
        let html = plants_list(&[]);
        assert!(html.contains("No plants yet"));
        assert!(!html.contains("class=\"plant\""));
    }

    #[test]
    fn list_links_each_plant() {
        let a = plant("Tomato", "");
        let b = plant("Basil", "");
        let html = plants_list(&[a.clone(), b.clone()]);
        assert_eq!(html.matches("class=\"plant\"").count(), 2);
        assert!(html.contains(&format!("href=\"/plant/{}\"", a.id)));
        assert!(html.contains(&format!("href=\"/plant/{}\"", b.id)));
    }

    #[test]
    fn detail_escapes_user_values() {
        let p = plant("<script>alert(1)</script>", "");
        let html = plant_detail(&p, &[]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn detail_omits_image_without_photo() {
        let html = plant_detail(&plant("Tomato", ""), &[]);
        assert!(!html.contains("<img"));
        assert!(html.contains("No harvests recorded yet."));

        let html = plant_detail(&plant("Tomato", "http://x/img.jpg"), &[]);
        assert!(html.contains("<img src=\"http://x/img.jpg\""));
    }

    #[test]
    fn detail_lists_harvests() {
        let p = plant("Tomato", "");
        let harvest = Harvest {
            id: Uuid::new_v4(),
            plant_id: p.id,
            quantity: "3 tomatoes".to_string(),
            date: "2024-07-01".to_string(),
            created_at: Utc::now(),
        };
        let html = plant_detail(&p, &[harvest]);
        assert_eq!(html.matches("class=\"harvest\"").count(), 1);
        assert!(html.contains("<span class=\"quantity\">3 tomatoes</span>"));
        assert!(html.contains("<span class=\"date\">2024-07-01</span>"));
        assert!(html.contains(&format!("action=\"/harvest/{}\"", p.id)));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let p = plant("Tomato", "http://x/img.jpg");
        let html = edit_form(&p);
        assert!(html.contains("name=\"plant_name\" value=\"Tomato\""));
        assert!(html.contains("name=\"variety\" value=\"Roma\""));
        assert!(html.contains("name=\"photo\" value=\"http://x/img.jpg\""));
        assert!(html.contains("name=\"date_planted\" value=\"2024-05-01\""));
        assert!(html.contains(&format!("action=\"/edit/{}\"", p.id)));
    }

    #[test]
    fn create_form_is_empty() {
        let html = create_form();
        assert!(html.contains("name=\"plant_name\" value=\"\""));
        assert!(html.contains("action=\"/create\""));
    }
}
