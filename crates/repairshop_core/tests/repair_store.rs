use chrono::{NaiveDate, NaiveDateTime, Timelike};
use repairshop_core::db::migrations::latest_version;
use repairshop_core::db::open_db_in_memory;
use repairshop_core::{
    FixedClock, InputError, InputField, RepairRepository, RepairService, RepoError, ServiceError,
    SqliteRepairRepository,
};
use rusqlite::Connection;

fn at(day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

#[test]
fn add_repair_then_list_contains_matching_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRepairRepository::try_new(&conn).unwrap();
    let now = at(5, 14, 30, 9);
    let service = RepairService::with_clock(repo, FixedClock(now));

    let before = service.list_repairs().unwrap();
    let created = service.add_repair("screen repair", "50", "100.25").unwrap();
    let after = service.list_repairs().unwrap();

    assert!(before.is_empty());
    assert_eq!(after.len(), 1);
    assert_eq!(after[0], created);
    assert_eq!(created.description, "screen repair");
    assert_eq!(created.cost, 50.0);
    assert_eq!(created.income, 100.25);
    assert_eq!(created.date, now);
}

#[test]
fn add_repair_stores_second_precision_text_date() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRepairRepository::try_new(&conn).unwrap();
    let now = at(5, 8, 0, 1).with_nanosecond(123_000_000).unwrap();
    let service = RepairService::with_clock(repo, FixedClock(now));

    let created = service.add_repair("battery", "20", "40").unwrap();

    let stored: String = conn
        .query_row("SELECT date FROM repairs WHERE id = ?1;", [created.id], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(stored, "2024-01-05 08:00:01");
    assert_eq!(created.date, at(5, 8, 0, 1));
}

#[test]
fn ids_are_monotonic_and_list_keeps_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRepairRepository::try_new(&conn).unwrap();
    let service = RepairService::with_clock(repo, FixedClock(at(2, 10, 0, 0)));

    let first = service.add_repair("zebra case", "1", "2").unwrap();
    let second = service.add_repair("antenna", "3", "4").unwrap();
    let third = service.add_repair("microphone", "5", "6").unwrap();

    assert!(first.id < second.id && second.id < third.id);
    let descriptions: Vec<_> = service
        .list_repairs()
        .unwrap()
        .into_iter()
        .map(|repair| repair.description)
        .collect();
    assert_eq!(descriptions, vec!["zebra case", "antenna", "microphone"]);
}

#[test]
fn invalid_input_leaves_store_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRepairRepository::try_new(&conn).unwrap();
    let service = RepairService::with_clock(repo, FixedClock(at(3, 9, 0, 0)));
    service.add_repair("existing", "1", "1").unwrap();

    let cases = [
        ("", "10", "20", InputField::Description),
        ("   ", "10", "20", InputField::Description),
        ("glass", "ten", "20", InputField::Cost),
        ("glass", "10", "", InputField::Income),
        ("glass", "10", "-20", InputField::Income),
    ];

    for (description, cost, income, expected_field) in cases {
        let err = service.add_repair(description, cost, income).unwrap_err();
        let field = match err {
            ServiceError::InvalidInput(InputError::MissingField(field)) => field,
            ServiceError::InvalidInput(InputError::NotNumeric { field, .. }) => field,
            ServiceError::InvalidInput(InputError::NegativeAmount { field, .. }) => field,
            other => panic!("unexpected error: {other}"),
        };
        assert_eq!(field, expected_field, "input {description:?}/{cost:?}/{income:?}");
    }

    assert_eq!(service.list_repairs().unwrap().len(), 1);
}

#[test]
fn write_failure_surfaces_as_storage_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteRepairRepository::try_new(&conn).unwrap();
    let service = RepairService::with_clock(repo, FixedClock(at(3, 9, 0, 0)));
    conn.execute_batch("PRAGMA query_only = ON;").unwrap();

    let err = service.add_repair("screen", "1", "2").unwrap_err();
    assert!(matches!(err, ServiceError::Storage(RepoError::Db(_))));
}

#[test]
fn corrupted_date_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO repairs (date, description, cost, income)
         VALUES ('yesterday', 'battery', 1.0, 2.0);",
        [],
    )
    .unwrap();
    let repo = SqliteRepairRepository::try_new(&conn).unwrap();

    let err = repo.list_repairs().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("yesterday")));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteRepairRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_repairs_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteRepairRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("repairs"))
    ));
}

#[test]
fn repository_rejects_repairs_table_missing_income_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE repairs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            description TEXT NOT NULL,
            cost REAL NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteRepairRepository::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "repairs",
            column: "income"
        })
    ));
}
