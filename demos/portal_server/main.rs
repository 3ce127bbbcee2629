//! Alumni Portal Server Example
//!
//! Loads `demos/data/portal.yaml` (or the path given as first argument),
//! seeds a few events and serves the portal API.
//!
//! ```text
//! RUST_LOG=alumni=debug,tower_http=debug cargo run --example portal_server
//! ```

use alumni::prelude::*;
use anyhow::Result;
use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("alumni=info,tower_http=info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data/portal.yaml").to_string());
    let config = PortalConfig::from_yaml_file(&config_path)?;

    let roster = match &config.directory.roster_path {
        Some(path) => Roster::from_file(path)?,
        None => Roster::empty(),
    };

    let events = InMemoryEventService::new();
    seed_events(&events).await?;

    println!("🚀 Alumni portal with {} alumni", roster.len());
    println!("\n🌐 Server running on http://{}", config.server.bind);
    println!("\n  🔷 Directory:");
    println!("    GET    /alumni?search=&filter=&sort=&page=&limit=");
    println!("    GET    /alumni/filters");
    println!("    GET    /alumni/{{id}}");
    println!("\n  🔷 Events:");
    println!("    GET    /events?search=");
    println!("    POST   /events");
    println!("    GET    /events/{{id}}");
    println!("    PUT    /events/{{id}}");
    println!("    DELETE /events/{{id}}");
    println!("    GET    /events/{{id}}/registrations");
    println!("    POST   /events/{{id}}/registrations");
    println!("\n  🔷 Donations:");
    println!("    GET    /donations/campaigns");
    println!("    GET    /donations/campaigns/{{slug}}");
    println!("    GET    /donations/campaigns/{{slug}}/pledges");
    println!("    POST   /donations/campaigns/{{slug}}/pledges");
    println!("\n  🔷 Admin:");
    println!("    GET    /admin/dashboard");

    ServerBuilder::new()
        .with_roster(roster)
        .with_event_service(events)
        .with_config(&config)?
        .serve(&config.server.bind)
        .await
}

async fn seed_events(events: &InMemoryEventService) -> Result<()> {
    let at = |y: i32, m: u32, d: u32, h: u32| {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, 0, 0))
            .ok_or_else(|| anyhow::anyhow!("invalid seed date"))
    };

    let meetup = events
        .create(EventDraft {
            title: "Annual Alumni Meet & Greet".to_string(),
            description: "Reconnect with old friends and network with fellow alumni.".to_string(),
            starts_at: at(2026, 10, 25, 18)?,
            location: "College Auditorium".to_string(),
            category: EventCategory::Meetup,
            is_published: true,
            poster: None,
        })
        .await?;

    for (name, email, batch) in [
        ("Samantha Carter", "s.carter@sgc.mil", 2015),
        ("John Sheppard", "j.sheppard@atlantis.io", 2004),
        ("Daniel Jackson", "d.jackson@sgc.mil", 1997),
    ] {
        events
            .register(
                &meetup.id,
                RegistrationRequest {
                    name: name.to_string(),
                    email: email.to_string(),
                    batch: Some(batch),
                },
            )
            .await?;
    }

    events
        .create(EventDraft {
            title: "Webinar: AI in Modern Tech".to_string(),
            description: "A deep dive into artificial intelligence with an alumnus from industry.".to_string(),
            starts_at: at(2026, 11, 15, 14)?,
            location: "Online".to_string(),
            category: EventCategory::Webinar,
            is_published: true,
            poster: None,
        })
        .await?;

    events
        .create(EventDraft {
            title: "Cultural Fest: Nostalgia Night".to_string(),
            description: "Live music, food stalls and performances.".to_string(),
            starts_at: at(2026, 12, 5, 19)?,
            location: "Campus Grounds".to_string(),
            category: EventCategory::Cultural,
            is_published: false,
            poster: None,
        })
        .await?;

    Ok(())
}
