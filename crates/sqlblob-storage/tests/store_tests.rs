// SPDX-FileCopyrightText: 2026 sqlblob Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the blob store on an on-disk database.
//!
//! Each test builds an isolated TestHarness with its own temp directory.

use proptest::prelude::*;
use rusqlite::Connection;
use sqlblob_core::{Blob, BlobError, SqlblobError, ZeroBlob};
use sqlblob_storage::{BlobLocation, Database, OpenMode, open_blob};
use sqlblob_test_utils::TestHarness;

// ---- Value conversions ----

#[test]
fn blob_binds_and_reads_back() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE t (v)").unwrap();
    let blob = Blob::new(vec![0xde, 0xad, 0xbe, 0xef]);
    conn.execute("INSERT INTO t (v) VALUES (?1)", [&blob]).unwrap();

    let (back, kind): (Blob, String) = conn
        .query_row("SELECT v, typeof(v) FROM t", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .unwrap();
    assert_eq!(back, blob);
    assert_eq!(kind, "blob");
}

#[test]
fn blob_literal_is_valid_sql() {
    let conn = Connection::open_in_memory().unwrap();
    let blob = Blob::new(vec![0x00, 0xab, 0xff]);
    let back: Blob = conn
        .query_row(&format!("SELECT {blob}"), [], |row| row.get(0))
        .unwrap();
    assert_eq!(back, blob);
}

#[test]
fn non_blob_column_is_a_type_error() {
    let conn = Connection::open_in_memory().unwrap();
    let result: rusqlite::Result<Blob> = conn.query_row("SELECT 42", [], |row| row.get(0));
    assert!(matches!(
        result,
        Err(rusqlite::Error::InvalidColumnType(..))
    ));
}

#[test]
fn zero_blob_binds_as_zeroes() {
    let conn = Connection::open_in_memory().unwrap();
    let (len, sum): (i64, i64) = conn
        .query_row(
            "SELECT length(?1), (SELECT count(*) WHERE ?1 = zeroblob(5))",
            [ZeroBlob::from(5i64)],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(len, 5);
    assert_eq!(sum, 1);
}

// ---- Streams on a shared connection ----

#[test]
fn independent_streams_on_two_rows() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE t (id INTEGER PRIMARY KEY, data BLOB);
         INSERT INTO t VALUES (1, zeroblob(3)), (2, x'0102030405');",
    )
    .unwrap();

    let mut writer =
        open_blob(&conn, &BlobLocation::new("t", "data", 1), OpenMode::ReadWrite).unwrap();
    let mut reader =
        open_blob(&conn, &BlobLocation::new("t", "data", 2), OpenMode::ReadOnly).unwrap();

    let mut buf = [0u8; 3];
    assert_eq!(reader.read(&mut buf).unwrap(), 3);
    writer.write(&buf).unwrap();
    assert_eq!(reader.remaining(), 2);
    writer.close();
    reader.close();

    let first: Blob = conn
        .query_row("SELECT data FROM t WHERE id = 1", [], |row| row.get(0))
        .unwrap();
    assert_eq!(first.bytes(), &[1, 2, 3]);
}

#[test]
fn io_copy_moves_bytes_between_cells() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE t (id INTEGER PRIMARY KEY, data BLOB);
         INSERT INTO t VALUES (1, x'68656c6c6f'), (2, zeroblob(5));",
    )
    .unwrap();

    let mut src =
        open_blob(&conn, &BlobLocation::new("t", "data", 1), OpenMode::ReadOnly).unwrap();
    let mut dst =
        open_blob(&conn, &BlobLocation::new("t", "data", 2), OpenMode::ReadWrite).unwrap();
    assert_eq!(std::io::copy(&mut src, &mut dst).unwrap(), 5);
    drop(src);
    drop(dst);

    let copied: Blob = conn
        .query_row("SELECT data FROM t WHERE id = 2", [], |row| row.get(0))
        .unwrap();
    assert_eq!(copied.bytes(), b"hello");
}

// ---- Store lifecycle ----

#[tokio::test]
async fn data_survives_reopen() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness
        .store
        .insert("persist", &Blob::new(b"durable".to_vec()))
        .await
        .unwrap();
    harness.store.checkpoint().await.unwrap();

    let db = Database::open(harness.db_path().to_str().unwrap())
        .await
        .unwrap();
    let blob = sqlblob_storage::queries::blobs::get(&db, "persist")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(blob.bytes(), b"durable");
    db.close().await.unwrap();
}

#[tokio::test]
async fn file_round_trip_with_small_chunks() {
    let harness = TestHarness::builder().with_chunk_size(7).build().await.unwrap();
    let src = harness.scratch_path("src.bin");
    let dst = harness.scratch_path("dst.bin");
    let content: Vec<u8> = (0..4096u32).map(|i| (i ^ (i >> 3)) as u8).collect();
    std::fs::write(&src, &content).unwrap();

    let entry = harness.store.import_file("payload", &src).await.unwrap();
    assert_eq!(entry.size, 4096);
    assert_eq!(entry.name, "payload");

    let written = harness.store.export_file("payload", &dst).await.unwrap();
    assert_eq!(written, 4096);
    assert_eq!(std::fs::read(&dst).unwrap(), content);
}

#[tokio::test]
async fn empty_file_round_trip() {
    let harness = TestHarness::builder().build().await.unwrap();
    let src = harness.scratch_path("empty.bin");
    let dst = harness.scratch_path("empty.out");
    std::fs::write(&src, b"").unwrap();

    let entry = harness.store.import_file("empty", &src).await.unwrap();
    assert_eq!(entry.size, 0);
    assert_eq!(harness.store.export_file("empty", &dst).await.unwrap(), 0);
    assert!(std::fs::read(&dst).unwrap().is_empty());
}

#[tokio::test]
async fn export_missing_blob_is_not_found() {
    let harness = TestHarness::builder().build().await.unwrap();
    let err = harness
        .store
        .export_file("ghost", &harness.scratch_path("ghost.bin"))
        .await
        .unwrap_err();
    assert!(matches!(err, SqlblobError::NotFound { .. }));
}

#[tokio::test]
async fn partial_stream_write_keeps_prefix() {
    let harness = TestHarness::builder()
        .with_chunk_size(3)
        .with_wal(false)
        .build()
        .await
        .unwrap();
    harness.store.allocate("fixed", ZeroBlob::new(5)).await.unwrap();

    let err = harness
        .store
        .write_stream("fixed", b"abcdefg".to_vec())
        .await
        .unwrap_err();
    assert!(matches!(err, SqlblobError::Blob(BlobError::Write { .. })));

    // The second chunk is rejected whole; the first stays written.
    let blob = harness.store.get("fixed").await.unwrap().unwrap();
    assert_eq!(blob.bytes(), b"abc\0\0");
}

// ---- Chunked streaming ----

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn chunked_stream_round_trips_any_payload(
        payload in proptest::collection::vec(any::<u8>(), 0..2048),
        chunk_size in 1usize..300,
    ) {
        use sqlblob_storage::queries::blobs;

        let rt = tokio::runtime::Runtime::new().unwrap();
        let back = rt.block_on(async {
            let db = Database::open_in_memory().await.unwrap();
            blobs::allocate(&db, "p", ZeroBlob::new(payload.len() as u64))
                .await
                .unwrap();
            blobs::write_stream(&db, "p", payload.clone(), chunk_size)
                .await
                .unwrap();
            blobs::read_stream(&db, "p", chunk_size).await.unwrap()
        });
        prop_assert_eq!(back.bytes(), payload.as_slice());
    }
}
