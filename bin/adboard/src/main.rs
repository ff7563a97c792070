//! # adboard Binary
//!
//! The composition root. Builds the repositories and the snapshot store,
//! loads the three snapshot documents at start (each one fail-open: a bad
//! document only leaves that repository empty), optionally seeds sample
//! data, and writes the snapshots back before exiting.

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ab_core::dto::{CreateAdvertisementDto, RegisterUserDto};
use ab_core::models::AdvertisementType;
use ab_core::traits::{
    AdvertisementRepo, CategoryRepo, ChatRepo, RegisteredUserRepo, Snapshot, StringStore,
};
use ab_files_local::LocalTextStore;
use ab_repo_memory::{
    MemoryAdvertisementRepo, MemoryCategoryRepo, MemoryChatRepo, MemoryRegisteredUserRepo,
};
use ab_services::{account, catalog, listings, messaging};

const ADS_SNAPSHOT: &str = "ads.json";
const USERS_SNAPSHOT: &str = "users.json";
const CHATS_SNAPSHOT: &str = "chats.json";

struct Settings {
    data_dir: String,
}

impl Settings {
    fn from_env() -> Self {
        Self {
            data_dir: std::env::var("ADBOARD_DATA_DIR").unwrap_or_else(|_| "./data".into()),
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env();
    info!(data_dir = %settings.data_dir, "starting adboard");

    // 1. The snapshot store and the repositories.
    let store = LocalTextStore::new(&settings.data_dir);
    let advertisements = MemoryAdvertisementRepo::new();
    let categories = MemoryCategoryRepo::new();
    let users = MemoryRegisteredUserRepo::new();
    let chats = MemoryChatRepo::new();

    // 2. Load persisted state. A snapshot that fails to load leaves its
    //    repository empty; startup itself never fails on bad data.
    load(&store, ADS_SNAPSHOT, &advertisements);
    load(&store, USERS_SNAPSHOT, &users);
    load(&store, CHATS_SNAPSHOT, &chats);

    // 3. Optional sample data: `adboard seed`.
    if std::env::args().nth(1).as_deref() == Some("seed") {
        seed(&advertisements, &categories, &users, &chats)?;
    }

    info!(
        advertisements = advertisements.get_all().len(),
        users = users.get_all().len(),
        chats = chats.get_all().len(),
        "repositories ready"
    );

    // 4. Persist everything back.
    save(&store, ADS_SNAPSHOT, &advertisements);
    save(&store, USERS_SNAPSHOT, &users);
    save(&store, CHATS_SNAPSHOT, &chats);

    Ok(())
}

fn load(store: &impl StringStore, name: &str, repo: &impl Snapshot) {
    let result = store
        .read_string(name)
        .and_then(|text| repo.deserialize_all(&text));
    match result {
        Ok(()) => info!(snapshot = name, "snapshot loaded"),
        Err(err) => warn!(snapshot = name, error = %err, "failed to load snapshot; starting empty"),
    }
}

fn save(store: &impl StringStore, name: &str, repo: &impl Snapshot) {
    let result = repo
        .serialize_all()
        .and_then(|json| store.write_string(name, &json));
    match result {
        Ok(()) => info!(snapshot = name, "snapshot saved"),
        Err(err) => warn!(snapshot = name, error = %err, "failed to save snapshot"),
    }
}

/// Populates the repositories with a small, linked sample data set.
fn seed(
    advertisements: &impl AdvertisementRepo,
    categories: &impl CategoryRepo,
    users: &impl RegisteredUserRepo,
    chats: &impl ChatRepo,
) -> Result<()> {
    let electronics = catalog::create_category(categories, "Electronics")?;
    let vehicles = catalog::create_category(categories, "Vehicles")?;

    let seller = account::register(
        users,
        &RegisterUserDto {
            username: "marketmaven".into(),
            password: "sample1".into(),
            first_name: "Mara".into(),
            last_name: "Keller".into(),
            phone: "555-0101".into(),
        },
    )?;
    let buyer = account::register(
        users,
        &RegisterUserDto {
            username: "bargainbee".into(),
            password: "sample2".into(),
            first_name: "Ben".into(),
            last_name: "Okafor".into(),
            phone: "555-0102".into(),
        },
    )?;

    let bike = listings::create_advertisement(
        advertisements,
        seller.id(),
        &CreateAdvertisementDto {
            title: "City bike".into(),
            description: "Three gears, fresh tires, lights included".into(),
            category_id: vehicles.id(),
            advertisement_type: AdvertisementType::Selling,
            price: 120.0,
            photo_paths: vec!["photos/bike.jpg".into()],
        },
    )?;
    advertisements.publish(bike.id())?;

    listings::create_advertisement(
        advertisements,
        buyer.id(),
        &CreateAdvertisementDto {
            title: "Looking for a soldering station".into(),
            description: "Any working model, pickup possible".into(),
            category_id: electronics.id(),
            advertisement_type: AdvertisementType::Buying,
            price: 40.0,
            photo_paths: Vec::new(),
        },
    )?;

    let chat = messaging::start_chat(chats, bike.id(), buyer.id(), seller.id())?;
    messaging::send_message(chats, chat.id(), buyer.id(), "Is the bike still available?")?;
    messaging::send_message(chats, chat.id(), seller.id(), "It is, come by this weekend.")?;

    info!("sample data seeded");
    Ok(())
}
