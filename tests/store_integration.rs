/// Integration tests for the PostgreSQL persistence sink.
///
/// These tests verify:
/// 1. The sink table can be created and reached
/// 2. Replace semantics: a second persist fully overwrites the first
/// 3. Read-back preserves field values and provider order
///
/// Prerequisites:
/// - PostgreSQL running and reachable
/// - DATABASE_URL set in .env or the environment
///
/// All tests are `#[ignore]`d because they need a live database. Run with:
///   cargo test --test store_integration -- --ignored --test-threads=1

use chrono::NaiveDate;
use postgres::Client;

use forecast_service::db;
use forecast_service::model::ForecastRecord;

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn get_test_client() -> Client {
    dotenv::dotenv().ok();
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set to run store integration tests");
    db::connect_and_verify(&url).unwrap_or_else(|e| {
        panic!("Could not connect to the test database: {}", e);
    })
}

fn cleanup_test_data(client: &mut Client) {
    // Test datasets are namespaced with a test_ prefix
    let _ = client.execute(
        "DELETE FROM forecast_records WHERE dataset LIKE 'test_%'",
        &[],
    );
}

fn record(hour: u32, description: &str, temperature: f64) -> ForecastRecord {
    ForecastRecord {
        time: NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap(),
        description: description.to_string(),
        temperature,
        humidity: 55,
        wind_speed: 3,
    }
}

// ---------------------------------------------------------------------------
// Overwrite Semantics
// ---------------------------------------------------------------------------

#[test]
#[ignore]
fn test_second_persist_fully_replaces_the_first() {
    let mut client = get_test_client();
    cleanup_test_data(&mut client);

    let dataset = "test_overwrite";

    let first = vec![
        record(9, "clear sky", 22.35),
        record(12, "few clouds", 24.0),
        record(15, "light rain", 19.5),
    ];
    let second = vec![record(9, "snow shower", -2.0), record(12, "snow", -3.5)];

    db::replace_dataset(&mut client, dataset, &first).expect("first persist should succeed");
    assert_eq!(db::dataset_len(&mut client, dataset).expect("count should succeed"), 3);

    db::replace_dataset(&mut client, dataset, &second).expect("second persist should succeed");
    assert_eq!(
        db::dataset_len(&mut client, dataset).expect("count should succeed"),
        second.len() as u64,
        "row count after the second persist must equal the second set's length — \
         overwrite, not union"
    );

    let stored = db::fetch_dataset(&mut client, dataset).expect("read-back should succeed");
    assert_eq!(stored, second, "the store must hold exactly the second content");

    cleanup_test_data(&mut client);
}

#[test]
#[ignore]
fn test_persisting_an_empty_set_clears_the_dataset() {
    let mut client = get_test_client();
    cleanup_test_data(&mut client);

    let dataset = "test_clear";

    db::replace_dataset(&mut client, dataset, &[record(9, "mist", 10.0)])
        .expect("seed persist should succeed");
    db::replace_dataset(&mut client, dataset, &[]).expect("empty persist should succeed");

    assert_eq!(db::dataset_len(&mut client, dataset).expect("count should succeed"), 0);

    cleanup_test_data(&mut client);
}

// ---------------------------------------------------------------------------
// Read-back Fidelity
// ---------------------------------------------------------------------------

#[test]
#[ignore]
fn test_read_back_preserves_fields_and_order() {
    let mut client = get_test_client();
    cleanup_test_data(&mut client);

    let dataset = "test_roundtrip";
    let records = vec![
        record(9, "clear sky", 22.35),
        record(12, "broken clouds", 23.01),
        record(15, "light rain", 18.75),
    ];

    let written =
        db::replace_dataset(&mut client, dataset, &records).expect("persist should succeed");
    assert_eq!(written, records.len() as u64);

    let stored = db::fetch_dataset(&mut client, dataset).expect("read-back should succeed");
    assert_eq!(stored, records, "field values and provider order must survive the store");

    cleanup_test_data(&mut client);
}

#[test]
#[ignore]
fn test_datasets_are_isolated_from_each_other() {
    let mut client = get_test_client();
    cleanup_test_data(&mut client);

    db::replace_dataset(&mut client, "test_city_a", &[record(9, "clear sky", 25.0)])
        .expect("persist a should succeed");
    db::replace_dataset(&mut client, "test_city_b", &[record(9, "snow", -5.0)])
        .expect("persist b should succeed");

    // Overwriting one dataset must not touch the other
    db::replace_dataset(&mut client, "test_city_a", &[])
        .expect("clearing a should succeed");
    assert_eq!(db::dataset_len(&mut client, "test_city_b").expect("count should succeed"), 1);

    cleanup_test_data(&mut client);
}
