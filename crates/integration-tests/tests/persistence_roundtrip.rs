//! Full snapshot cycle: populate repositories through the services, write
//! all three documents to a string store, load them into fresh repositories,
//! and check that nothing changed, including the derived per-user views.

use ab_core::filter::AdvertisementFilter;
use ab_core::models::Message;
use ab_core::traits::{AdvertisementRepo, ChatRepo, RegisteredUserRepo, Snapshot, StringStore};
use ab_repo_memory::{MemoryAdvertisementRepo, MemoryChatRepo, MemoryRegisteredUserRepo};
use ab_services::{account, listings, messaging};
use integration_tests::{exchange_dto, register_dto, selling_dto, FakeStringStore};
use uuid::Uuid;

fn save(store: &FakeStringStore, name: &str, repo: &impl Snapshot) {
    store.write_string(name, &repo.serialize_all().unwrap()).unwrap();
}

fn load(store: &FakeStringStore, name: &str, repo: &impl Snapshot) {
    repo.deserialize_all(&store.read_string(name).unwrap()).unwrap();
}

#[test]
fn snapshots_survive_a_process_restart() {
    let advertisements = MemoryAdvertisementRepo::new();
    let users = MemoryRegisteredUserRepo::new();
    let chats = MemoryChatRepo::new();
    let category = Uuid::new_v4();

    let seller = account::register(&users, &register_dto("sellerperson")).unwrap();
    let buyer = account::register(&users, &register_dto("buyerperson")).unwrap();

    let bike =
        listings::create_advertisement(&advertisements, seller.id(), &selling_dto(category, 120.0))
            .unwrap();
    advertisements.publish(bike.id()).unwrap();
    listings::create_advertisement(&advertisements, seller.id(), &selling_dto(category, 45.0))
        .unwrap();
    listings::create_advertisement(&advertisements, buyer.id(), &exchange_dto(category)).unwrap();

    let chat = messaging::start_chat(&chats, bike.id(), buyer.id(), seller.id()).unwrap();
    messaging::send_message(&chats, chat.id(), buyer.id(), "Still available?").unwrap();
    messaging::send_message(&chats, chat.id(), seller.id(), "Yes, it is.").unwrap();

    // "Process stop": persist everything into the external store.
    let store = FakeStringStore::new();
    save(&store, "ads.json", &advertisements);
    save(&store, "users.json", &users);
    save(&store, "chats.json", &chats);

    // "Process start": fresh repositories, loaded from the store.
    let advertisements2 = MemoryAdvertisementRepo::new();
    let users2 = MemoryRegisteredUserRepo::new();
    let chats2 = MemoryChatRepo::new();
    load(&store, "ads.json", &advertisements2);
    load(&store, "users.json", &users2);
    load(&store, "chats.json", &chats2);

    assert_eq!(advertisements2.get_all(), advertisements.get_all());
    assert_eq!(users2.get_all(), users.get_all());
    assert_eq!(chats2.get_all(), chats.get_all());

    // Publication state and message order made it through.
    assert!(advertisements2.get_by_id(bike.id()).unwrap().is_published());
    let restored_chat = chats2.get_by_id(chat.id()).unwrap();
    let texts: Vec<&str> = restored_chat.messages().iter().map(Message::text).collect();
    assert_eq!(texts, ["Still available?", "Yes, it is."]);

    // The derived views are recomputed from the loaded repositories.
    assert_eq!(listings::advertisements_owned_by(&advertisements2, seller.id()).len(), 2);
    assert_eq!(messaging::chats_of(&chats2, buyer.id()).len(), 1);
}

#[test]
fn a_broken_document_only_empties_its_own_repository() {
    let store = FakeStringStore::new();
    let users = MemoryRegisteredUserRepo::new();
    account::register(&users, &register_dto("sellerperson")).unwrap();
    store.write_string("users.json", &users.serialize_all().unwrap()).unwrap();
    store.write_string("ads.json", "this is not json").unwrap();

    let advertisements2 = MemoryAdvertisementRepo::new();
    let users2 = MemoryRegisteredUserRepo::new();
    assert!(advertisements2
        .deserialize_all(&store.read_string("ads.json").unwrap())
        .is_err());
    users2.deserialize_all(&store.read_string("users.json").unwrap()).unwrap();

    // Fail-open: the bad document leaves an empty repository, the good one
    // loads normally.
    assert!(advertisements2.get_all().is_empty());
    assert_eq!(users2.get_all().len(), 1);
    assert!(advertisements2
        .find_by_filters(&AdvertisementFilter::default())
        .is_empty());
}
