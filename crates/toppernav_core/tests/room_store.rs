use toppernav_core::db::open_db_in_memory;
use toppernav_core::{RepoError, Room, RoomRepository, RoomValidationError, SqliteRoomRepository};

fn seed(repo: &mut SqliteRoomRepository<'_>) {
    let mut rooms = vec![
        Room::new("SH", "210", 36.9857, -86.4517),
        Room::new("SH", "101", 36.9856, -86.4518),
        Room::new("GRH", "1001", 36.9860, -86.4495),
        Room::new("MMTH", "B10", 36.9871, -86.4521),
    ];
    rooms[0].floor = Some(2);
    rooms[0].notes = Some("computer lab".to_string());
    repo.upsert_all(&rooms).unwrap();
}

fn labels(rooms: &[Room]) -> Vec<String> {
    rooms.iter().map(Room::label).collect()
}

#[test]
fn count_reflects_upserted_rows() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteRoomRepository::new(&mut conn);
    assert_eq!(repo.count().unwrap(), 0);

    seed(&mut repo);
    assert_eq!(repo.count().unwrap(), 4);
}

#[test]
fn find_by_key_returns_stored_record_with_surrogate_id() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteRoomRepository::new(&mut conn);
    seed(&mut repo);

    let room = repo.find_by_key("SH", "210").unwrap().unwrap();
    assert!(room.id.is_some());
    assert_eq!(room.floor, Some(2));
    assert_eq!(room.notes.as_deref(), Some("computer lab"));
    assert_eq!(room.altitude_meters, None);
}

#[test]
fn find_by_key_is_exact_on_stored_values() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteRoomRepository::new(&mut conn);
    seed(&mut repo);

    assert!(repo.find_by_key("sh", "210").unwrap().is_none());
    assert!(repo.find_by_key("MMTH", "b10").unwrap().is_none());
    assert!(repo.find_by_key("SH", "999").unwrap().is_none());
}

#[test]
fn search_matches_concatenated_label() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteRoomRepository::new(&mut conn);
    seed(&mut repo);

    let hits = repo.search("%SH 210%").unwrap();
    assert_eq!(labels(&hits), vec!["SH 210"]);
}

#[test]
fn search_matches_building_or_room_case_insensitively() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteRoomRepository::new(&mut conn);
    seed(&mut repo);

    let by_building = repo.search("%sh%").unwrap();
    assert_eq!(labels(&by_building), vec!["SH 101", "SH 210"]);

    let by_room = repo.search("%b1%").unwrap();
    assert_eq!(labels(&by_room), vec!["MMTH B10"]);
}

#[test]
fn search_orders_by_building_then_room() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteRoomRepository::new(&mut conn);
    seed(&mut repo);

    let all = repo.search("%").unwrap();
    assert_eq!(
        labels(&all),
        vec!["GRH 1001", "MMTH B10", "SH 101", "SH 210"]
    );
}

#[test]
fn list_buildings_is_distinct_and_sorted() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteRoomRepository::new(&mut conn);
    seed(&mut repo);

    assert_eq!(repo.list_buildings().unwrap(), vec!["GRH", "MMTH", "SH"]);
}

#[test]
fn upsert_replaces_existing_key_instead_of_duplicating() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteRoomRepository::new(&mut conn);
    seed(&mut repo);

    let mut replacement = Room::new("SH", "210", 1.0, 2.0);
    replacement.floor = Some(3);
    repo.upsert_all(&[replacement]).unwrap();

    assert_eq!(repo.count().unwrap(), 4);
    let stored = repo.find_by_key("SH", "210").unwrap().unwrap();
    assert_eq!(stored.floor, Some(3));
    assert_eq!(stored.lat, 1.0);
    assert_eq!(stored.notes, None);
}

#[test]
fn upsert_rejects_invalid_batch_without_writing() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteRoomRepository::new(&mut conn);

    let valid = Room::new("SH", "210", 1.0, 2.0);
    let invalid = Room {
        room: "  ".to_string(),
        ..Room::new("SH", "211", 1.0, 2.0)
    };

    let err = repo.upsert_all(&[valid, invalid]).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(RoomValidationError::EmptyRoom)
    ));
    assert_eq!(repo.count().unwrap(), 0);
}
