//! Tests for the menu, roster, announcement and listing models.

use branch_engine::announcement::{active, newest_first, Announcement, AnnouncementDraft};
use branch_engine::listing::{next_display_order, sort_by_display_order, Poster, Room};
use branch_engine::menu::{
    format_price, group_by_category, parse_price, Categorized, MenuItem, MENU_CATEGORIES,
};
use branch_engine::roster::{default_roster, Executive, EXECUTIVE_ROLES};
use branch_engine::EngineError;
use chrono::{NaiveDate, NaiveDateTime};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

fn item(name: &str, category: &str) -> MenuItem {
    MenuItem::new(name, "9.50", category, "").unwrap()
}

#[test]
fn groups_in_first_seen_category_order() {
    let items = vec![
        item("Fish & Chips", "Entrees"),
        item("Coffee", "Beverages"),
        item("Club Sandwich", "Entrees"),
        item("Fries", "Sides"),
        item("Tea", "Beverages"),
    ];

    let groups = group_by_category(&items);
    let summary: Vec<(&str, Vec<&str>)> = groups
        .iter()
        .map(|(category, members)| {
            (*category, members.iter().map(|m| m.name.as_str()).collect())
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            ("Entrees", vec!["Fish & Chips", "Club Sandwich"]),
            ("Beverages", vec!["Coffee", "Tea"]),
            ("Sides", vec!["Fries"]),
        ]
    );
}

/// A menu item carried alongside its stored id.
struct Listed {
    id: &'static str,
    item: MenuItem,
}

impl Categorized for Listed {
    fn category(&self) -> &str {
        &self.item.category
    }
}

#[test]
fn groups_wrapped_items_without_losing_ids() {
    let listed = vec![
        Listed { id: "a", item: item("Fries", "Sides") },
        Listed { id: "b", item: item("Coffee", "Beverages") },
        Listed { id: "c", item: item("Onion Rings", "Sides") },
    ];

    let groups = group_by_category(&listed);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, "Sides");
    let ids: Vec<&str> = groups[0].1.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert_eq!(groups[1].1[0].item.name, "Coffee");
}

#[test]
fn price_parsing_and_formatting() {
    assert_eq!(parse_price("12.5"), Ok(12.5));
    assert_eq!(parse_price(" $8 "), Ok(8.0));
    assert!(matches!(parse_price("-1"), Err(EngineError::InvalidPrice(_))));
    assert!(matches!(parse_price("NaN"), Err(EngineError::InvalidPrice(_))));
    assert!(matches!(parse_price("free"), Err(EngineError::InvalidPrice(_))));
    assert_eq!(format_price(12.5), "$12.50");
}

#[test]
fn menu_item_requires_name() {
    assert_eq!(
        MenuItem::new(" ", "5", "Sides", ""),
        Err(EngineError::MissingField("name"))
    );
    assert!(MENU_CATEGORIES.contains(&"Soup & Salads"));
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

#[test]
fn default_roster_is_ordered_and_known() {
    let roster = default_roster();
    assert_eq!(roster.len(), 12);
    assert_eq!(roster[0].role, "President");
    let orders: Vec<u32> = roster.iter().map(|e| e.order).collect();
    assert_eq!(orders, (1..=12).collect::<Vec<u32>>());
    assert!(roster.iter().all(Executive::has_known_role));
}

#[test]
fn roster_sorts_by_order() {
    let mut roster = vec![
        Executive::new("B", "Treasurer", "Finance", 3).unwrap(),
        Executive::new("A", "President", "", 1).unwrap(),
        Executive::new("C", "Chaplain", "", 3).unwrap(),
    ];
    sort_by_display_order(&mut roster);
    let names: Vec<&str> = roster.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    assert_eq!(EXECUTIVE_ROLES.len(), 11);
}

#[test]
fn executive_requires_role() {
    assert_eq!(
        Executive::new("Someone", "", "", 1),
        Err(EngineError::MissingField("role"))
    );
}

// ---------------------------------------------------------------------------
// Announcements
// ---------------------------------------------------------------------------

fn draft(end_date: &str, end_time: &str) -> AnnouncementDraft {
    AnnouncementDraft {
        title: "Hall closed".to_string(),
        message: "Closed for renovations".to_string(),
        link: "  ".to_string(),
        end_date: end_date.to_string(),
        end_time: end_time.to_string(),
    }
}

#[test]
fn blank_end_time_means_end_of_evening() {
    let a = draft("2024-03-10", "")
        .into_announcement(at(2024, 3, 1, 9, 0))
        .unwrap();
    assert_eq!(a.end_date, at(2024, 3, 10, 23, 59));
    assert_eq!(a.link, None);
}

#[test]
fn explicit_end_time_and_link() {
    let a = AnnouncementDraft {
        link: "https://example.org/reno".to_string(),
        ..draft("2024-03-10", "17:00")
    }
    .into_announcement(at(2024, 3, 1, 9, 0))
    .unwrap();
    assert_eq!(a.end_date, at(2024, 3, 10, 17, 0));
    assert_eq!(a.link.as_deref(), Some("https://example.org/reno"));
}

#[test]
fn announcement_validation() {
    let created = at(2024, 3, 1, 9, 0);
    assert!(matches!(
        draft("soon", "").into_announcement(created),
        Err(EngineError::InvalidDate(_))
    ));
    assert_eq!(
        AnnouncementDraft {
            message: String::new(),
            ..draft("2024-03-10", "")
        }
        .into_announcement(created),
        Err(EngineError::MissingField("message"))
    );
}

#[test]
fn active_filters_expired_and_sorts_newest_first() {
    let make = |title: &str, created: NaiveDateTime, end: NaiveDateTime| Announcement {
        title: title.to_string(),
        message: String::new(),
        link: None,
        end_date: end,
        created_at: created,
    };
    let list = vec![
        make("old", at(2024, 3, 1, 9, 0), at(2024, 3, 20, 23, 59)),
        make("expired", at(2024, 3, 2, 9, 0), at(2024, 3, 5, 23, 59)),
        make("new", at(2024, 3, 8, 9, 0), at(2024, 3, 31, 23, 59)),
    ];

    let now = at(2024, 3, 10, 12, 0);
    let titles: Vec<&str> = active(&list, now).iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["new", "old"]);
    assert!(list[1].is_expired(now));
    assert!(!list[0].is_expired(at(2024, 3, 20, 23, 59)));
}

#[test]
fn newest_first_keeps_expired_entries() {
    let make = |title: &str, created: NaiveDateTime| Announcement {
        title: title.to_string(),
        message: String::new(),
        link: None,
        end_date: at(2024, 1, 1, 0, 0),
        created_at: created,
    };
    let mut list = vec![
        make("first", at(2024, 3, 1, 9, 0)),
        make("third", at(2024, 3, 3, 9, 0)),
        make("second", at(2024, 3, 2, 9, 0)),
    ];

    newest_first(&mut list);
    let titles: Vec<&str> = list.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["third", "second", "first"]);
    assert!(active(&list, at(2024, 3, 10, 0, 0)).is_empty());
}

// ---------------------------------------------------------------------------
// Rooms and posters
// ---------------------------------------------------------------------------

#[test]
fn blank_order_appends() {
    let room = Room::new("Upper Hall", "Seats 120", "$300 / evening", None, None, 2).unwrap();
    assert_eq!(room.order, 3);
    let zero = Room::new("Lounge", "Bar service", "$150", Some(0), None, 4).unwrap();
    assert_eq!(zero.order, 5);
    let explicit = Room::new("Boardroom", "Seats 12", "$50", Some(1), None, 4).unwrap();
    assert_eq!(explicit.order, 1);
    assert_eq!(next_display_order(0), 1);
}

#[test]
fn room_blank_image_is_none() {
    let room = Room::new("Hall", "", "$1", None, Some(" ".to_string()), 0).unwrap();
    assert_eq!(room.image_url, None);
}

#[test]
fn poster_requires_image_and_sorts() {
    assert_eq!(
        Poster::new("Dart Tournament", None, "", 0),
        Err(EngineError::MissingField("image"))
    );

    let mut posters = vec![
        Poster::new("", Some(2), "posters/b.jpg", 0).unwrap(),
        Poster::new("Dart Tournament", Some(1), "posters/a.jpg", 1).unwrap(),
    ];
    sort_by_display_order(&mut posters);
    assert_eq!(posters[0].display_title(), "Dart Tournament");
    assert_eq!(posters[1].display_title(), "Untitled");
}

#[test]
fn room_document_shape() {
    let room = Room::new("Upper Hall", "Seats 120", "$300", Some(1), None, 0).unwrap();
    let value = serde_json::to_value(&room).unwrap();
    assert_eq!(value["imageUrl"], serde_json::Value::Null);
    assert_eq!(value["order"], 1);
}
