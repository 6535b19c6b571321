#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Registry and service integration tests.

use std::collections::BTreeMap;

use navmenu::{
    BuilderOptions, Menu, MenuItem, MenuSection, MenuService, SimpleItem,
};

fn service_with_menu(name: &str, labels: &[&str]) -> MenuService {
    let mut service = MenuService::new();
    service
        .make(name, BTreeMap::new(), BuilderOptions::default(), |mut b| {
            for label in labels {
                b = b.item(*label, None)?;
            }
            Ok(b)
        })
        .unwrap();
    service
}

#[test]
fn test_register_get_remove_lifecycle() {
    let mut service = service_with_menu("main", &["Home"]);

    assert!(service.has("main"));
    assert_eq!(service.count(), 1);

    service.remove("main");
    assert!(!service.has("main"));
    assert!(service.get("main").is_none());

    // Removing again is a no-op.
    service.remove("main");
    assert_eq!(service.count(), 0);
}

#[test]
fn test_register_overwrites_silently() {
    let mut service = service_with_menu("main", &["Home"]);
    let replacement = service
        .create("main", BTreeMap::new(), BuilderOptions::default())
        .unwrap()
        .item("Home", None)
        .unwrap()
        .item("About", None)
        .unwrap()
        .build()
        .unwrap();

    service.register(replacement);
    assert_eq!(service.count(), 1);
    assert_eq!(service.get("main").unwrap().item_count(), 2);
}

#[test]
fn test_stats_aggregate_across_menus() {
    let mut service = service_with_menu("first", &["A", "B"]);
    service
        .make(
            "second",
            BTreeMap::new(),
            BuilderOptions::default(),
            |b| b.item("C", None)?.active(true),
        )
        .unwrap();

    let stats = service.stats();
    assert_eq!(stats.total_menus, 2);
    assert_eq!(stats.total_items, 3);
    assert_eq!(stats.total_sections, 2);
    assert_eq!(stats.active_items, 1);
}

#[test]
fn test_validation_report_is_data_not_error() {
    // Cyclic-by-id graph: A contains B, whose children contain A again.
    let mut inner_a = MenuItem::new("a", "A", None).unwrap();
    inner_a.add_child(MenuItem::new("b", "B", None).unwrap());
    let mut b = MenuItem::new("b", "B", None).unwrap();
    b.add_child(inner_a);
    let mut a = MenuItem::new("a", "A", None).unwrap();
    a.add_child(b);

    let mut section = MenuSection::new("s1", None, None).unwrap();
    section.add_item(a).unwrap();
    let mut menu = Menu::new("cyclic", BTreeMap::new()).unwrap();
    menu.add_section(section).unwrap();

    let mut service = MenuService::new();
    service.register(menu);

    // Must return findings, not raise, and must terminate.
    let report = service.validate();
    assert!(!report.valid);
    assert!(
        report
            .errors
            .iter()
            .any(|error| error.contains("circular references"))
    );
    assert!(
        report
            .errors
            .iter()
            .any(|error| error.contains("duplicate item ids"))
    );
}

#[test]
fn test_validation_multiple_menus_batched() {
    let mut service = service_with_menu("good", &["Home"]);
    service.register(Menu::new("empty", BTreeMap::new()).unwrap());

    let report = service.validate();
    assert!(report.valid);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("empty"));
}

#[test]
fn test_service_render_of_registered_menu() {
    let service = service_with_menu("main", &["Home"]);
    let html = service.render("main");
    assert!(html.contains(r#"<nav id="main""#));
    assert!(html.contains("Home"));

    assert_eq!(service.render("missing"), "");
}

#[test]
fn test_simple_convenience_path() {
    let mut service = MenuService::new();
    let items = vec![
        SimpleItem {
            label: "Dashboard".to_string(),
            route: Some("/dash".to_string()),
            icon: Some("gauge".to_string()),
            ..SimpleItem::default()
        },
        SimpleItem {
            label: "Reports".to_string(),
            route: Some("/reports".to_string()),
            badge: Some("new".to_string()),
            ..SimpleItem::default()
        },
    ];

    service.simple("admin", &items, BTreeMap::new()).unwrap();

    assert!(service.has("admin"));
    let html = service.render("admin");
    assert!(html.contains("Dashboard"));
    assert!(html.contains(r#"<span class="nav-badge">new</span>"#));
    assert!(html.contains(r#"<span class="nav-icon">gauge</span>"#));
}

#[test]
fn test_registry_keys_and_filter() {
    let mut service = service_with_menu("zeta", &["Z"]);
    service.register(Menu::new("alpha", BTreeMap::new()).unwrap());

    assert_eq!(service.registry().keys(), vec!["alpha", "zeta"]);

    let nonempty = service.registry().filter(|menu| !menu.is_empty());
    assert_eq!(nonempty.len(), 1);
    assert_eq!(nonempty[0].id(), "zeta");
}

#[test]
fn test_version_usable_as_cache_key() {
    let mut service = service_with_menu("main", &["Home"]);

    let key_before = service.get("main").unwrap().cache_key();
    let mut mutated = service.get("main").cloned().unwrap();
    mutated.set_metadata("theme", serde_json::Value::from("dark"));
    let key_after = mutated.cache_key();

    assert_ne!(key_before, key_after);
    service.register(mutated);
    assert_eq!(service.get("main").unwrap().cache_key(), key_after);
}
