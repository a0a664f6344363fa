//! Renderer completeness: a record populated at every registry path renders
//! every non-empty field exactly once, under its declared section, in
//! registry order.

use fieldbind::schema::{FieldDescriptor, FieldType, Registry, SchemaEntry, SelectOption};
use fieldbind::view::render;
use serde_json::json;

fn seo_registry() -> Registry {
    Registry::new(vec![
        SchemaEntry::section("General"),
        SchemaEntry::field(FieldDescriptor::new("title", FieldType::Text)),
        SchemaEntry::field(FieldDescriptor::new("description", FieldType::Textarea)),
        SchemaEntry::section("Twitter"),
        SchemaEntry::field(
            FieldDescriptor::new("twitter.card", FieldType::Select).with_options(vec![
                SelectOption::new("summary", "Summary"),
                SelectOption::new("player", "Player"),
            ]),
        ),
        SchemaEntry::field(FieldDescriptor::new("twitter.image", FieldType::Text)),
        SchemaEntry::field(FieldDescriptor::new("twitter.player_width", FieldType::Number)),
        SchemaEntry::section("Open Graph"),
        SchemaEntry::field(FieldDescriptor::new("openGraph.video.width", FieldType::Number)),
        SchemaEntry::field(FieldDescriptor::new("openGraph.images[0]", FieldType::Text)),
        SchemaEntry::field(FieldDescriptor::new("noindex", FieldType::Checkbox)),
    ])
    .unwrap()
}

#[test]
fn fully_populated_record_renders_every_field_once_in_order() {
    let registry = seo_registry();
    let record = json!({
        "title": "Landing page",
        "description": "Above the fold",
        "twitter": {
            "card": "player",
            "image": "http://x/card.png",
            "player_width": 480,
        },
        "openGraph": {
            "video": {"width": 640},
            "images": ["http://x/og.png"],
        },
        "noindex": false,
    });

    let sections = render(&record, &registry);

    let titles: Vec<_> = sections.iter().map(|s| s.title.as_deref()).collect();
    assert_eq!(titles, vec![Some("General"), Some("Twitter"), Some("Open Graph")]);

    let rendered: Vec<(String, String)> = sections
        .iter()
        .flat_map(|s| s.fields.iter().map(|f| (f.label.clone(), f.value.clone())))
        .collect();
    assert_eq!(
        rendered,
        vec![
            ("Title".to_string(), "Landing page".to_string()),
            ("Description".to_string(), "Above the fold".to_string()),
            ("Twitter Card".to_string(), "Player".to_string()),
            ("Twitter Image".to_string(), "http://x/card.png".to_string()),
            ("Twitter Player Width".to_string(), "480".to_string()),
            ("Open Graph Video Width".to_string(), "640".to_string()),
            ("Open Graph Images".to_string(), "http://x/og.png".to_string()),
            ("Noindex".to_string(), "No".to_string()),
        ]
    );

    // Exactly once: no label repeats across the whole rendering.
    let mut labels: Vec<_> = rendered.iter().map(|(l, _)| l.clone()).collect();
    labels.sort();
    labels.dedup();
    assert_eq!(labels.len(), rendered.len());
}

#[test]
fn partially_populated_record_skips_dead_sections_only() {
    let registry = seo_registry();
    let record = json!({
        "twitter": {"image": "http://x/card.png"},
    });

    let sections = render(&record, &registry);
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].title.as_deref(), Some("Twitter"));
    // Sibling fields of the live section still show, as placeholders.
    assert_eq!(sections[0].fields.len(), 3);
}
