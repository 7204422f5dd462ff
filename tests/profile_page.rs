//! End-to-end runs of the orchestrator against on-disk documents.

use restaurant_profile::source::DirSource;
use restaurant_profile::view::Node;
use restaurant_profile::{init, Language, MemoryPage, MountPoint};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn site(docs: &[(&str, serde_json::Value)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    let restaurants = dir.path().join("data/restaurants");
    fs::create_dir_all(&restaurants).unwrap();
    for (slug, doc) in docs {
        fs::write(restaurants.join(format!("{slug}.json")), doc.to_string()).unwrap();
    }
    dir
}

fn classed(page: &MemoryPage, at: MountPoint, class: &str) -> Vec<String> {
    let mut found = Vec::new();
    for node in page.children(at) {
        node.find_by_class(class, &mut found);
    }
    found.into_iter().map(|e| e.text_content()).collect()
}

#[tokio::test]
async fn test_menu_document_in_spanish() {
    let dir = site(&[(
        "la-casa",
        json!({
            "name": { "es": "La Casa", "en": "The House" },
            "menu": [{
                "category": { "es": "Platos", "en": "Dishes" },
                "items": [{ "name": { "es": "Tacos", "en": "Tacos" }, "price": 9.5 }]
            }]
        }),
    )]);

    let renderer = init("/r/la-casa", &DirSource::new(dir.path()), MemoryPage::bilingual()).await;
    let page = renderer.mount();

    assert_eq!(page.text(MountPoint::Name), "La Casa");
    assert_eq!(classed(page, MountPoint::MenuContainer, "menu-category"), vec!["Platos"]);
    assert_eq!(classed(page, MountPoint::MenuContainer, "menu-item-name"), vec!["Tacos"]);
    assert_eq!(classed(page, MountPoint::MenuContainer, "menu-item-price"), vec!["$9.50"]);
}

#[tokio::test]
async fn test_missing_document_degrades_to_placeholders() {
    let dir = site(&[]);

    let renderer = init("/r/ghost", &DirSource::new(dir.path()), MemoryPage::bilingual()).await;
    let page = renderer.mount();

    assert_eq!(page.text(MountPoint::Name), "Pendiente");
    assert_eq!(page.text(MountPoint::Tagline), "Pendiente");
    for container in [
        MountPoint::MenuContainer,
        MountPoint::HoursContainer,
        MountPoint::LocationContainer,
    ] {
        assert_eq!(classed(page, container, "pending"), vec!["Pendiente"], "{container:?}");
    }
    assert!(page.children(MountPoint::WhatsappContainer).is_empty());
    assert!(page.children(MountPoint::SocialContainer).is_empty());
    assert!(page.has_class(MountPoint::SocialSection, "is-hidden"));
}

#[tokio::test]
async fn test_toggle_rerenders_without_refetching() {
    let dir = site(&[(
        "la-casa",
        json!({
            "name": { "es": "La Casa", "en": "The House" },
            "tagline": { "es": "Comida casera" },
            "hours": { "schedule": [{ "days": "Lun-Vie", "open": "9:00" }] },
            "location": { "city": "Oaxaca", "googleMapsUrl": "https://maps.example/casa" },
            "contact": {
                "whatsapp": "5215512345678",
                "whatsappMessage": { "es": "¡Hola!", "en": "Hi there" }
            },
            "social": { "facebook": "https://facebook.com/casa", "website": "https://casa.example" }
        }),
    )]);

    let mut renderer =
        init("/la-casa", &DirSource::new(dir.path()), MemoryPage::bilingual()).await;
    assert_eq!(
        renderer.mount().content(MountPoint::HoursContainer),
        "Lun-Vie: 9:00 - Pendiente"
    );
    assert_eq!(
        renderer.mount().content(MountPoint::SocialContainer),
        "FacebookSitio web"
    );

    // the document is gone, switching must not need it again
    drop(dir);
    assert_eq!(renderer.click(1), Some(Language::En));
    let page = renderer.mount();

    assert_eq!(page.text(MountPoint::Name), "The House");
    assert_eq!(page.text(MountPoint::Tagline), "Pending");
    assert_eq!(page.text(MountPoint::MenuTitle), "Menu");
    assert_eq!(page.text(MountPoint::HoursTitle), "Hours");
    assert_eq!(page.text(MountPoint::LocationTitle), "Location");
    assert_eq!(page.text(MountPoint::SocialTitle), "Social");
    assert_eq!(classed(page, MountPoint::MenuContainer, "pending"), vec!["Pending"]);
    assert_eq!(page.content(MountPoint::HoursContainer), "Lun-Vie: 9:00 - Pending");
    assert_eq!(page.content(MountPoint::LocationContainer), "OaxacaView on Google Maps");
    assert_eq!(page.content(MountPoint::SocialContainer), "FacebookWebsite");
    assert!(!page.has_class(MountPoint::SocialSection, "is-hidden"));

    let whatsapp = page.children(MountPoint::WhatsappContainer);
    assert_eq!(whatsapp.len(), 1);
    let link = match &whatsapp[0] {
        Node::Element(link) => link,
        other => panic!("expected a link, got {other:?}"),
    };
    assert_eq!(
        link.get_attr("href"),
        Some("https://wa.me/5215512345678?text=Hi%20there")
    );
    assert_eq!(page.active_controls(), vec!["en"]);
}
