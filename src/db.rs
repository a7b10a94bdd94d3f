/// PostgreSQL persistence sink.
///
/// One table, `forecast_records`, keyed by `(dataset, seq)`. A dataset name
/// is a logical collection ("hourly_weather"); every persist call replaces
/// the dataset's full contents inside a single transaction, so the caller
/// either sees the new set or the untouched previous one. `seq` preserves
/// provider order on read-back.
///
/// Connections are plain blocking `postgres::Client` values; dropping the
/// client releases the connection on every exit path.

use postgres::{Client, NoTls};

use crate::model::{ForecastRecord, PersistError};

/// DDL for the sink table. Applied idempotently on connect.
const SCHEMA_DDL: &str = "
    CREATE TABLE IF NOT EXISTS forecast_records (
        dataset     TEXT NOT NULL,
        seq         INT NOT NULL,
        time        TIMESTAMP NOT NULL,
        description TEXT NOT NULL,
        temperature DOUBLE PRECISION NOT NULL,
        humidity    INT NOT NULL,
        wind_speed  INT NOT NULL,
        PRIMARY KEY (dataset, seq)
    )
";

// ---------------------------------------------------------------------------
// Connection
// ---------------------------------------------------------------------------

/// Connect to the store and make sure the sink table exists.
///
/// `database_url` is a standard postgres connection string, normally taken
/// from `DATABASE_URL` in `.env`. The connection string's own
/// `connect_timeout` parameter bounds the connect.
pub fn connect_and_verify(database_url: &str) -> Result<Client, PersistError> {
    let mut client =
        Client::connect(database_url, NoTls).map_err(|e| PersistError::Connection(e.to_string()))?;

    client
        .batch_execute(SCHEMA_DDL)
        .map_err(|e| PersistError::Schema(e.to_string()))?;

    Ok(client)
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Replace the full contents of `dataset_name` with `records`.
///
/// Overwrite semantics, never append: prior rows under the dataset are
/// deleted and the new set inserted in one transaction. On any failure the
/// transaction rolls back and the previous contents remain visible.
///
/// Returns the number of rows written.
pub fn replace_dataset(
    client: &mut Client,
    dataset_name: &str,
    records: &[ForecastRecord],
) -> Result<u64, PersistError> {
    let mut tx = client
        .transaction()
        .map_err(|e| PersistError::Write(e.to_string()))?;

    tx.execute("DELETE FROM forecast_records WHERE dataset = $1", &[&dataset_name])
        .map_err(|e| PersistError::Write(e.to_string()))?;

    for (seq, record) in records.iter().enumerate() {
        tx.execute(
            "INSERT INTO forecast_records
                 (dataset, seq, time, description, temperature, humidity, wind_speed)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
            &[
                &dataset_name,
                &(seq as i32),
                &record.time,
                &record.description,
                &record.temperature,
                &record.humidity,
                &record.wind_speed,
            ],
        )
        .map_err(|e| PersistError::Write(e.to_string()))?;
    }

    tx.commit().map_err(|e| PersistError::Write(e.to_string()))?;

    Ok(records.len() as u64)
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Read a dataset back in original provider order.
///
/// Used by the presentation side and by the overwrite-semantics tests; the
/// pipeline itself never reads what it wrote.
pub fn fetch_dataset(
    client: &mut Client,
    dataset_name: &str,
) -> Result<Vec<ForecastRecord>, PersistError> {
    let rows = client
        .query(
            "SELECT time, description, temperature, humidity, wind_speed
             FROM forecast_records
             WHERE dataset = $1
             ORDER BY seq",
            &[&dataset_name],
        )
        .map_err(|e| PersistError::Write(e.to_string()))?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        records.push(ForecastRecord {
            time: row.get(0),
            description: row.get(1),
            temperature: row.get(2),
            humidity: row.get(3),
            wind_speed: row.get(4),
        });
    }

    Ok(records)
}

/// Row count for a dataset.
pub fn dataset_len(client: &mut Client, dataset_name: &str) -> Result<u64, PersistError> {
    let row = client
        .query_one(
            "SELECT COUNT(*) FROM forecast_records WHERE dataset = $1",
            &[&dataset_name],
        )
        .map_err(|e| PersistError::Write(e.to_string()))?;

    let count: i64 = row.get(0);
    Ok(count as u64)
}
