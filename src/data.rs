use anyhow::bail;
use serde_json::{Map, Value};

use crate::lang::{scalar_text, LocalizedText};

/// A restaurant's public profile. Every field may be missing, and a field
/// with the wrong shape is read as missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestaurantProfile {
    pub name: Option<LocalizedText>,
    pub tagline: Option<LocalizedText>,
    pub menu: Vec<MenuSection>,
    pub hours: Hours,
    pub location: Location,
    pub contact: Contact,
    pub social: Social,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuSection {
    pub category: Option<LocalizedText>,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuItem {
    pub name: Option<LocalizedText>,
    /// `None` when the item has no price; such items are never displayed.
    /// May be NaN when the price could not be read as a number.
    pub price: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hours {
    pub schedule: Vec<ScheduleRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleRow {
    pub days: Option<String>,
    pub open: Option<String>,
    pub close: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub google_maps_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    /// phone number used for the wa.me link
    pub whatsapp: Option<String>,
    pub whatsapp_message: Option<LocalizedText>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Social {
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub tiktok: Option<String>,
    pub website: Option<String>,
}

impl RestaurantProfile {
    /// Builds a profile from a fetched document. Only a non-object top level
    /// is an error; everything below it degrades field by field.
    pub fn from_json(doc: &Value) -> anyhow::Result<Self> {
        let Some(doc) = doc.as_object() else {
            bail!("restaurant document is not a JSON object");
        };

        Ok(Self {
            name: LocalizedText::from_json(doc.get("name")),
            tagline: LocalizedText::from_json(doc.get("tagline")),
            menu: array(doc.get("menu")).map(MenuSection::from_json).collect(),
            hours: Hours::from_json(object(doc.get("hours"))),
            location: Location::from_json(object(doc.get("location"))),
            contact: Contact::from_json(object(doc.get("contact"))),
            social: Social::from_json(object(doc.get("social"))),
        })
    }

    /// Stand-in used when the document can not be fetched: placeholder name
    /// and tagline, every section empty.
    pub fn fallback() -> Self {
        Self {
            name: Some(LocalizedText::new("Pendiente", "Pending")),
            tagline: Some(LocalizedText::new("Pendiente", "Pending")),
            ..Default::default()
        }
    }
}

impl MenuSection {
    fn from_json(value: &Value) -> Self {
        let section = object(Some(value));
        Self {
            category: LocalizedText::from_json(field(section, "category")),
            items: array(field(section, "items"))
                .filter_map(Value::as_object)
                .map(MenuItem::from_json)
                .collect(),
        }
    }
}

impl MenuItem {
    fn from_json(item: &Map<String, Value>) -> Self {
        Self {
            name: LocalizedText::from_json(item.get("name")),
            price: item.get("price").and_then(price),
        }
    }
}

impl Hours {
    fn from_json(hours: Option<&Map<String, Value>>) -> Self {
        Self {
            schedule: array(field(hours, "schedule"))
                .map(|row| {
                    let row = object(Some(row));
                    ScheduleRow {
                        days: scalar_text(field(row, "days")),
                        open: scalar_text(field(row, "open")),
                        close: scalar_text(field(row, "close")),
                    }
                })
                .collect(),
        }
    }
}

impl ScheduleRow {
    /// A row is worth showing if any of its three fields is present.
    pub fn is_displayable(&self) -> bool {
        self.days.is_some() || self.open.is_some() || self.close.is_some()
    }
}

impl Location {
    fn from_json(location: Option<&Map<String, Value>>) -> Self {
        Self {
            address: scalar_text(field(location, "address")),
            city: scalar_text(field(location, "city")),
            state: scalar_text(field(location, "state")),
            google_maps_url: scalar_text(field(location, "googleMapsUrl")),
        }
    }
}

impl Contact {
    fn from_json(contact: Option<&Map<String, Value>>) -> Self {
        Self {
            whatsapp: scalar_text(field(contact, "whatsapp")),
            whatsapp_message: LocalizedText::from_json(field(contact, "whatsappMessage")),
        }
    }
}

impl Social {
    fn from_json(social: Option<&Map<String, Value>>) -> Self {
        Self {
            facebook: scalar_text(field(social, "facebook")),
            instagram: scalar_text(field(social, "instagram")),
            tiktok: scalar_text(field(social, "tiktok")),
            website: scalar_text(field(social, "website")),
        }
    }
}

fn object(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value.and_then(Value::as_object)
}

fn field<'a>(map: Option<&'a Map<String, Value>>, key: &str) -> Option<&'a Value> {
    map.and_then(|m| m.get(key))
}

fn array(value: Option<&Value>) -> impl Iterator<Item = &Value> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flat_map(|items| items.iter())
}

// A present, non-null price coerced to a number the way a browser would
fn price(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Null => return None,
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse().unwrap_or(f64::NAN)
            }
        }
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Array(_) | Value::Object(_) => f64::NAN,
    };
    Some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Language;
    use serde_json::json;

    #[test]
    fn test_parse_full_document() {
        let doc = json!({
            "name": { "es": "La Casa", "en": "The House" },
            "tagline": { "es": "Comida casera" },
            "menu": [{
                "category": { "es": "Platos", "en": "Dishes" },
                "items": [
                    { "name": { "es": "Tacos", "en": "Tacos" }, "price": 9.5 },
                    { "name": { "es": "Agua" } }
                ]
            }],
            "hours": { "schedule": [{ "days": "Lun-Vie", "open": "9:00", "close": "18:00" }] },
            "location": { "address": "Calle 1", "googleMapsUrl": "https://maps.example/x" },
            "contact": { "whatsapp": "5215512345678", "whatsappMessage": { "es": "Hola" } },
            "social": { "instagram": "https://instagram.com/lacasa" }
        });

        let profile = RestaurantProfile::from_json(&doc).unwrap();
        assert_eq!(profile.name.as_ref().unwrap().get(Language::En), "The House");
        assert_eq!(profile.tagline.as_ref().unwrap().get(Language::En), "Pending");
        assert_eq!(profile.menu.len(), 1);
        assert_eq!(profile.menu[0].items.len(), 2);
        assert_eq!(profile.menu[0].items[0].price, Some(9.5));
        assert_eq!(profile.menu[0].items[1].price, None);
        assert_eq!(profile.hours.schedule[0].open.as_deref(), Some("9:00"));
        assert_eq!(profile.location.city, None);
        assert_eq!(profile.contact.whatsapp.as_deref(), Some("5215512345678"));
        assert_eq!(
            profile.social.instagram.as_deref(),
            Some("https://instagram.com/lacasa")
        );
        assert_eq!(profile.social.website, None);
    }

    #[test]
    fn test_wrong_shapes_read_as_missing() {
        let doc = json!({
            "name": "La Casa",
            "menu": "tacos",
            "hours": [],
            "location": "downtown",
            "contact": { "whatsapp": false },
            "social": null
        });

        let profile = RestaurantProfile::from_json(&doc).unwrap();
        assert_eq!(profile.name, None);
        assert!(profile.menu.is_empty());
        assert!(profile.hours.schedule.is_empty());
        assert_eq!(profile.location, Location::default());
        assert_eq!(profile.contact.whatsapp, None);
        assert_eq!(profile.social, Social::default());
    }

    #[test]
    fn test_numeric_schedule_fields_drop_trailing_zero() {
        let doc = serde_json::from_str::<Value>(
            r#"{"hours":{"schedule":[{"days":"Lun","open":9.0,"close":1.5e3}]}}"#,
        )
        .unwrap();
        let profile = RestaurantProfile::from_json(&doc).unwrap();
        let row = &profile.hours.schedule[0];
        assert_eq!(row.open.as_deref(), Some("9"));
        assert_eq!(row.close.as_deref(), Some("1500"));

        let nodes = crate::view::render_hours(&profile.hours, Language::Es);
        assert_eq!(nodes[0].text_content(), "Lun: 9 - 1500");
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        assert!(RestaurantProfile::from_json(&json!(null)).is_err());
        assert!(RestaurantProfile::from_json(&json!([1, 2])).is_err());
        assert!(RestaurantProfile::from_json(&json!({})).is_ok());
    }

    #[test]
    fn test_price_coercion() {
        assert_eq!(price(&json!(null)), None);
        assert_eq!(price(&json!(0)), Some(0.0));
        assert_eq!(price(&json!("12.25")), Some(12.25));
        assert_eq!(price(&json!(" ")), Some(0.0));
        assert_eq!(price(&json!(true)), Some(1.0));
        assert!(price(&json!("free")).unwrap().is_nan());
        assert!(price(&json!({})).unwrap().is_nan());
    }

    #[test]
    fn test_menu_drops_non_object_items() {
        let doc = json!({ "menu": [{ "items": [null, "x", 3, { "price": 1 }] }, null] });
        let profile = RestaurantProfile::from_json(&doc).unwrap();
        assert_eq!(profile.menu.len(), 2);
        assert_eq!(profile.menu[0].items.len(), 1);
        assert_eq!(profile.menu[1], MenuSection::default());
    }

    #[test]
    fn test_fallback_profile() {
        let profile = RestaurantProfile::fallback();
        assert_eq!(profile.name.as_ref().unwrap().get(Language::Es), "Pendiente");
        assert_eq!(profile.tagline.as_ref().unwrap().get(Language::En), "Pending");
        assert!(profile.menu.is_empty());
        assert!(profile.hours.schedule.is_empty());
        assert_eq!(profile.social, Social::default());
    }
}
