//! Handlers for each `branch` subcommand.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use branch_engine::announcement::{self, newest_first, Announcement, AnnouncementDraft};
use branch_engine::calendar::{day_heading, now, today};
use branch_engine::event::{parse_date, sort_by_date};
use branch_engine::listing::{next_display_order, sort_by_display_order, Poster, Room};
use branch_engine::menu::{format_price, group_by_category, MenuItem, MENU_CATEGORIES};
use branch_engine::roster::{default_roster, Executive};
use branch_engine::{days_with_events, events_on, publish, BatchGuard, Event, EventDraft};
use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::{
    AddEvent, AnnouncementsCommand, Commands, EventsCommand, ExecutivesCommand, MenuCommand,
    PostersCommand, RoomsCommand,
};
use crate::store::{
    DocumentStore, Record, ANNOUNCEMENTS, EVENTS, EXECUTIVES, MENU_ITEMS, POSTERS, ROOMS,
};

/// Everything a command needs from the resolved settings.
pub struct App {
    pub store: DocumentStore,
    pub tz: Tz,
    pub guard: BatchGuard,
}

pub fn run(app: &mut App, command: Commands) -> Result<()> {
    match command {
        Commands::Events(cmd) => events(app, cmd),
        Commands::Menu(cmd) => menu(app, cmd),
        Commands::Executives(cmd) => executives(app, cmd),
        Commands::Announcements(cmd) => announcements(app, cmd),
        Commands::Rooms(cmd) => rooms(app, cmd),
        Commands::Posters(cmd) => posters(app, cmd),
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

fn events(app: &mut App, cmd: EventsCommand) -> Result<()> {
    match cmd {
        EventsCommand::Add(args) => add_events(app, args),
        EventsCommand::List => {
            for record in sorted_events(&app.store)? {
                println!("{}  {}", record.id, event_line(&record.doc));
            }
            Ok(())
        }
        EventsCommand::On { date } => {
            let date = match date {
                Some(raw) => parse_date(&raw)?,
                None => today(app.tz),
            };
            let records = sorted_events(&app.store)?;
            let matching = events_on(date, &records);

            println!("{}", day_heading(date));
            if matching.is_empty() {
                println!("No events scheduled for this day.");
            }
            for record in matching {
                println!(
                    "{}  {}  {}",
                    record.id,
                    record.doc.time_range_label(),
                    record.doc.title
                );
            }
            Ok(())
        }
        EventsCommand::Month { month } => {
            let first = NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
                .with_context(|| format!("Invalid month '{}': expected YYYY-MM", month))?;
            let records = sorted_events(&app.store)?;
            let days = days_with_events(first.year(), first.month(), &records);

            if days.is_empty() {
                println!("No events in {}.", first.format("%B %Y"));
            }
            for day in days {
                let count = events_on(day, &records).len();
                println!("{}  {} event(s)", day.format("%Y-%m-%d"), count);
            }
            Ok(())
        }
        EventsCommand::Delete { id } => delete(&app.store, EVENTS, "event", &id),
    }
}

fn add_events(app: &mut App, args: AddEvent) -> Result<()> {
    let draft = EventDraft {
        title: args.title,
        date: args.date,
        start_time: args.start,
        end_time: args.end.unwrap_or_default(),
        until_close: args.until_close,
        description: args.description,
        repeat: args.repeat.map(|frequency| frequency.to_string()),
        repeat_until: args.until,
    };
    let events = draft.to_events()?;

    if events.is_empty() {
        bail!(
            "no occurrences: repeat-until {} is before the start date {}",
            draft.repeat_until.as_deref().unwrap_or_default(),
            draft.date
        );
    }

    let total = events.len();
    if app.guard.requires_confirmation(total)
        && !args.yes
        && !confirm(&format!("Create {} events?", total))?
    {
        println!("Aborted; no events created.");
        return Ok(());
    }

    let ids = publish(&mut app.store, &events)?;
    for (id, event) in ids.iter().zip(&events) {
        println!("{}  {}", id, event_line(event));
    }
    info!(count = total, "events created");
    if total > 1 {
        println!("Created {} events.", total);
    }
    Ok(())
}

/// Ask a yes/no question on stdin. Only `y` or `yes` counts as agreement.
fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush().context("Failed to write prompt")?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn sorted_events(store: &DocumentStore) -> Result<Vec<Record<Event>>> {
    let mut records: Vec<Record<Event>> = store.list(EVENTS)?;
    sort_by_date(&mut records);
    Ok(records)
}

fn event_line(event: &Event) -> String {
    format!(
        "{}  {}  {}",
        event.occurs_at.format("%Y-%m-%d"),
        event.time_range_label(),
        event.title
    )
}

// ---------------------------------------------------------------------------
// Menu
// ---------------------------------------------------------------------------

fn menu(app: &mut App, cmd: MenuCommand) -> Result<()> {
    match cmd {
        MenuCommand::Add {
            name,
            price,
            category,
            description,
        } => {
            let item = MenuItem::new(&name, &price, &category, &description)?;
            if !MENU_CATEGORIES.contains(&item.category.as_str()) {
                warn!(category = %item.category, "category is not one of the menu sections");
            }
            println!("{}", app.store.insert(MENU_ITEMS, &item)?);
            Ok(())
        }
        MenuCommand::List => {
            let records: Vec<Record<MenuItem>> = app.store.list(MENU_ITEMS)?;
            for (category, members) in group_by_category(&records) {
                println!("{}", category);
                for Record { id, doc } in members {
                    println!("{}    {}  {}", id, doc.name, format_price(doc.price));
                }
            }
            Ok(())
        }
        MenuCommand::Delete { id } => delete(&app.store, MENU_ITEMS, "menu item", &id),
    }
}

// ---------------------------------------------------------------------------
// Executives
// ---------------------------------------------------------------------------

fn executives(app: &mut App, cmd: ExecutivesCommand) -> Result<()> {
    match cmd {
        ExecutivesCommand::Add {
            name,
            role,
            responsibility,
            order,
        } => {
            let order = match order {
                Some(order) if order > 0 => order,
                _ => next_display_order(app.store.count(EXECUTIVES)?),
            };
            let executive = Executive::new(&name, &role, &responsibility, order)?;
            if !executive.has_known_role() {
                warn!(role = %executive.role, "role is not one of the standard executive roles");
            }
            println!("{}", app.store.insert(EXECUTIVES, &executive)?);
            Ok(())
        }
        ExecutivesCommand::List => {
            let mut records: Vec<Record<Executive>> = app.store.list(EXECUTIVES)?;
            sort_by_display_order(&mut records);
            for Record { id, doc } in records {
                let line = format!("{}  {}  {}", id, doc.role, doc.name);
                if doc.responsibility.is_empty() {
                    println!("{}", line);
                } else {
                    println!("{} ({})", line, doc.responsibility);
                }
            }
            Ok(())
        }
        ExecutivesCommand::Seed => {
            let existing = app.store.count(EXECUTIVES)?;
            if existing > 0 {
                bail!("The roster already has {} entries; not seeding", existing);
            }
            let ids = app.store.insert_batch(EXECUTIVES, &default_roster())?;
            println!("Seeded {} executives.", ids.len());
            Ok(())
        }
        ExecutivesCommand::Delete { id } => delete(&app.store, EXECUTIVES, "executive", &id),
    }
}

// ---------------------------------------------------------------------------
// Announcements
// ---------------------------------------------------------------------------

fn announcements(app: &mut App, cmd: AnnouncementsCommand) -> Result<()> {
    match cmd {
        AnnouncementsCommand::Add {
            title,
            message,
            link,
            end_date,
            end_time,
        } => {
            let announcement = AnnouncementDraft {
                title,
                message,
                link,
                end_date,
                end_time,
            }
            .into_announcement(now(app.tz))?;
            println!("{}", app.store.insert(ANNOUNCEMENTS, &announcement)?);
            Ok(())
        }
        AnnouncementsCommand::List { active } => {
            let current = now(app.tz);
            let mut records: Vec<Record<Announcement>> = app.store.list(ANNOUNCEMENTS)?;
            newest_first(&mut records);
            let showing: Vec<&Record<Announcement>> = if active {
                announcement::active(&records, current)
            } else {
                records.iter().collect()
            };

            for Record { id, doc } in showing {
                let expired = doc.is_expired(current);
                println!(
                    "{}  {}  until {}{}",
                    id,
                    doc.title,
                    doc.end_date.format("%Y-%m-%d %H:%M"),
                    if expired { " (expired)" } else { "" }
                );
            }
            Ok(())
        }
        AnnouncementsCommand::Edit {
            id,
            title,
            message,
            link,
            end_date,
            end_time,
        } => {
            let current: Announcement = fetch(&app.store, ANNOUNCEMENTS, "announcement", &id)?;
            let edited = AnnouncementDraft {
                title: title.unwrap_or(current.title),
                message: message.unwrap_or(current.message),
                link: link.or(current.link).unwrap_or_default(),
                end_date: end_date
                    .unwrap_or_else(|| current.end_date.format("%Y-%m-%d").to_string()),
                end_time: end_time.unwrap_or_else(|| current.end_date.format("%H:%M").to_string()),
            }
            .into_announcement(current.created_at)?;
            replace(&app.store, ANNOUNCEMENTS, "announcement", &id, &edited)
        }
        AnnouncementsCommand::Delete { id } => {
            delete(&app.store, ANNOUNCEMENTS, "announcement", &id)
        }
    }
}

// ---------------------------------------------------------------------------
// Rooms and posters
// ---------------------------------------------------------------------------

fn rooms(app: &mut App, cmd: RoomsCommand) -> Result<()> {
    match cmd {
        RoomsCommand::Add {
            name,
            description,
            cost,
            order,
            image,
        } => {
            let existing = app.store.count(ROOMS)?;
            let room = Room::new(&name, &description, &cost, order, image, existing)?;
            println!("{}", app.store.insert(ROOMS, &room)?);
            Ok(())
        }
        RoomsCommand::List => {
            let mut records: Vec<Record<Room>> = app.store.list(ROOMS)?;
            sort_by_display_order(&mut records);
            for Record { id, doc } in records {
                println!("{}  {}. {}  {}", id, doc.order, doc.name, doc.cost);
            }
            Ok(())
        }
        RoomsCommand::Edit {
            id,
            name,
            description,
            cost,
            order,
            image,
        } => {
            let current: Room = fetch(&app.store, ROOMS, "room", &id)?;
            let room = Room::new(
                name.as_deref().unwrap_or(&current.name),
                description.as_deref().unwrap_or(&current.description),
                cost.as_deref().unwrap_or(&current.cost),
                Some(order.unwrap_or(current.order)),
                image.or(current.image_url),
                app.store.count(ROOMS)?,
            )?;
            replace(&app.store, ROOMS, "room", &id, &room)
        }
        RoomsCommand::Delete { id } => delete(&app.store, ROOMS, "room", &id),
    }
}

fn posters(app: &mut App, cmd: PostersCommand) -> Result<()> {
    match cmd {
        PostersCommand::Add {
            image,
            title,
            order,
        } => {
            let existing = app.store.count(POSTERS)?;
            let poster = Poster::new(&title, order, &image, existing)?;
            println!("{}", app.store.insert(POSTERS, &poster)?);
            Ok(())
        }
        PostersCommand::List => {
            let mut records: Vec<Record<Poster>> = app.store.list(POSTERS)?;
            sort_by_display_order(&mut records);
            for Record { id, doc } in records {
                println!(
                    "{}  {}. {}  {}",
                    id,
                    doc.order,
                    doc.display_title(),
                    doc.image_url
                );
            }
            Ok(())
        }
        PostersCommand::Edit {
            id,
            image,
            title,
            order,
        } => {
            let current: Poster = fetch(&app.store, POSTERS, "poster", &id)?;
            let poster = Poster::new(
                title.as_deref().unwrap_or(&current.title),
                Some(order.unwrap_or(current.order)),
                image.as_deref().unwrap_or(&current.image_url),
                app.store.count(POSTERS)?,
            )?;
            replace(&app.store, POSTERS, "poster", &id, &poster)
        }
        PostersCommand::Delete { id } => delete(&app.store, POSTERS, "poster", &id),
    }
}

fn delete(store: &DocumentStore, collection: &str, kind: &str, id: &str) -> Result<()> {
    if !store.delete(collection, id)? {
        bail!("No {} with id '{}'", kind, id);
    }
    println!("Deleted {} {}.", kind, id);
    Ok(())
}

fn fetch<T: DeserializeOwned>(
    store: &DocumentStore,
    collection: &str,
    kind: &str,
    id: &str,
) -> Result<T> {
    let Some(doc) = store.get(collection, id)? else {
        bail!("No {} with id '{}'", kind, id);
    };
    Ok(doc)
}

fn replace<T: Serialize>(
    store: &DocumentStore,
    collection: &str,
    kind: &str,
    id: &str,
    doc: &T,
) -> Result<()> {
    if !store.update(collection, id, doc)? {
        bail!("No {} with id '{}'", kind, id);
    }
    println!("Updated {} {}.", kind, id);
    Ok(())
}
