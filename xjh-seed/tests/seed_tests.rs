//! Integration tests for seeding a hub database

use std::path::Path;
use tempfile::TempDir;
use uuid::Uuid;
use xjh_common::db::init::{init_database, init_memory_database};
use xjh_common::db::{count, count_table, tables_in_construction_order};
use xjh_common::model::*;
use xjh_common::Error;
use xjh_seed::{content, SeedDocument, Seeder};

const BUILTIN_TOTAL: u64 = 87;

async fn stored_total(pool: &sqlx::SqlitePool) -> i64 {
    let mut total = 0;
    for table in tables_in_construction_order() {
        total += count_table(pool, table.table_name).await.unwrap();
    }
    total
}

#[tokio::test]
async fn test_builtin_content_commits() {
    let pool = init_memory_database().await.unwrap();

    let mut seeder = Seeder::begin(&pool).await.unwrap();
    content::go(&mut seeder).await.unwrap();
    let report = seeder.commit().await.unwrap();

    assert_eq!(report.total(), BUILTIN_TOTAL);
    assert_eq!(stored_total(&pool).await, BUILTIN_TOTAL as i64);
    assert_eq!(count::<Program, _>(&pool).await.unwrap(), 4);
    assert_eq!(count::<InstrumentAudioChord, _>(&pool).await.unwrap(), 6);
}

#[tokio::test]
async fn test_builtin_report_histogram() {
    let pool = init_memory_database().await.unwrap();

    let mut seeder = Seeder::begin(&pool).await.unwrap();
    content::go(&mut seeder).await.unwrap();
    let report = seeder.rollback().await.unwrap();

    let histogram = report.to_string();
    assert!(histogram.starts_with("1 Account, 2 AccountUser, 2 Instrument, "));
    assert!(histogram.ends_with("3 User, 4 UserRole"));
}

#[tokio::test]
async fn test_dry_run_leaves_database_empty() {
    let pool = init_memory_database().await.unwrap();

    let mut seeder = Seeder::begin(&pool).await.unwrap();
    content::go(&mut seeder).await.unwrap();
    let report = seeder.rollback().await.unwrap();

    assert_eq!(report.total(), BUILTIN_TOTAL);
    assert_eq!(stored_total(&pool).await, 0);
}

#[tokio::test]
async fn test_builtin_content_loads_twice() {
    let pool = init_memory_database().await.unwrap();

    for _ in 0..2 {
        let mut seeder = Seeder::begin(&pool).await.unwrap();
        content::go(&mut seeder).await.unwrap();
        seeder.commit().await.unwrap();
    }

    assert_eq!(count::<User, _>(&pool).await.unwrap(), 6);
    assert_eq!(stored_total(&pool).await, 2 * BUILTIN_TOTAL as i64);
}

#[tokio::test]
async fn test_reset_then_seed_replaces_content() {
    let pool = init_memory_database().await.unwrap();

    let mut seeder = Seeder::begin(&pool).await.unwrap();
    content::go(&mut seeder).await.unwrap();
    seeder.commit().await.unwrap();

    let mut seeder = Seeder::begin(&pool).await.unwrap();
    let deleted = seeder.truncate().await.unwrap();
    content::go(&mut seeder).await.unwrap();
    seeder.commit().await.unwrap();

    assert_eq!(deleted, BUILTIN_TOTAL);
    assert_eq!(stored_total(&pool).await, BUILTIN_TOTAL as i64);
}

#[tokio::test]
async fn test_reset_in_dry_run_is_rolled_back() {
    let pool = init_memory_database().await.unwrap();

    let mut seeder = Seeder::begin(&pool).await.unwrap();
    content::go(&mut seeder).await.unwrap();
    seeder.commit().await.unwrap();

    let mut seeder = Seeder::begin(&pool).await.unwrap();
    seeder.truncate().await.unwrap();
    seeder.rollback().await.unwrap();

    assert_eq!(stored_total(&pool).await, BUILTIN_TOTAL as i64);
}

#[tokio::test]
async fn test_failed_seed_writes_nothing() {
    let pool = init_memory_database().await.unwrap();

    // The sequence has no tempo, after its program and parents were inserted
    let document = SeedDocument::from_toml_str(
        r#"
        [[users]]
        ref = "john"
        name = "john"
        email = "john@email.com"

        [[accounts]]
        ref = "bananas"
        name = "bananas"

        [[libraries]]
        ref = "house"
        account = "bananas"
        name = "house"

        [[programs]]
        ref = "jam"
        user = "john"
        library = "house"
        type = "Main"
        state = "Draft"
        name = "Main Jam"
        key = "C minor"
        tempo = 140.0

        [[program_sequences]]
        program = "jam"
        total = 16
        name = "Intro"
        key = "G major"
        tempo = 0.0
        "#,
    )
    .unwrap();

    let mut seeder = Seeder::begin(&pool).await.unwrap();
    let result = document.load(&mut seeder).await;
    assert_eq!(seeder.report().total(), 4);
    drop(seeder);

    match result {
        Err(Error::InvalidInput(msg)) => assert_eq!(msg, "Non-zero tempo is required."),
        other => panic!("expected InvalidInput, got {:?}", other),
    }
    assert_eq!(stored_total(&pool).await, 0);
}

/// Two programs, each with one sequence and one voice carrying one track
const TWO_PROGRAMS: &str = r#"
    [[users]]
    ref = "john"
    name = "john"
    email = "john@email.com"

    [[accounts]]
    ref = "bananas"
    name = "bananas"

    [[libraries]]
    ref = "house"
    account = "bananas"
    name = "house"

    [[programs]]
    ref = "beat"
    user = "john"
    library = "house"
    type = "Rhythm"
    state = "Draft"
    name = "Beat"
    key = "C"
    tempo = 120.0

    [[programs]]
    ref = "bass"
    user = "john"
    library = "house"
    type = "Detail"
    state = "Draft"
    name = "Bass"
    key = "C"
    tempo = 120.0

    [[program_voices]]
    ref = "drums"
    program = "beat"
    type = "Percussive"
    name = "Drums"

    [[program_voices]]
    ref = "bassline"
    program = "bass"
    type = "Harmonic"
    name = "Bassline"

    [[program_voice_tracks]]
    ref = "kick"
    voice = "drums"
    name = "KICK"

    [[program_voice_tracks]]
    ref = "bum"
    voice = "bassline"
    name = "BUM"

    [[program_sequences]]
    ref = "groove"
    program = "beat"
    total = 16
    name = "Groove"
    key = "C"
    tempo = 120.0

    [[program_sequences]]
    ref = "walk"
    program = "bass"
    total = 16
    name = "Walk"
    key = "C"
    tempo = 120.0
"#;

async fn load_two_programs(extra: &str) -> (sqlx::SqlitePool, xjh_common::Result<()>) {
    let pool = init_memory_database().await.unwrap();
    let document = SeedDocument::from_toml_str(&format!("{}\n{}", TWO_PROGRAMS, extra)).unwrap();

    let mut seeder = Seeder::begin(&pool).await.unwrap();
    let result = document.load(&mut seeder).await;
    drop(seeder);
    (pool, result)
}

#[tokio::test]
async fn test_pattern_voice_from_another_program_is_rejected() {
    let (pool, result) = load_two_programs(
        r#"
        [[program_sequence_patterns]]
        sequence = "groove"
        voice = "bassline"
        type = "Loop"
        total = 4
        name = "Crossed"
        "#,
    )
    .await;

    match result {
        Err(Error::InvalidInput(msg)) => {
            assert_eq!(msg, "Pattern sequence and voice must belong to the same program.")
        }
        other => panic!("expected InvalidInput, got {:?}", other),
    }
    assert_eq!(stored_total(&pool).await, 0);
}

#[tokio::test]
async fn test_event_track_from_another_voice_is_rejected() {
    let (pool, result) = load_two_programs(
        r#"
        [[program_sequence_patterns]]
        ref = "drop"
        sequence = "groove"
        voice = "drums"
        type = "Loop"
        total = 4
        name = "Drop"

        [[program_sequence_pattern_events]]
        pattern = "drop"
        track = "bum"
        position = 0.0
        duration = 1.0
        note = "C2"
        velocity = 1.0
        "#,
    )
    .await;

    match result {
        Err(Error::InvalidInput(msg)) => {
            assert_eq!(msg, "Event pattern and track must belong to the same voice.")
        }
        other => panic!("expected InvalidInput, got {:?}", other),
    }
    assert_eq!(stored_total(&pool).await, 0);
}

#[tokio::test]
async fn test_dangling_ref_fails_before_any_insert() {
    let pool = init_memory_database().await.unwrap();
    let document = SeedDocument::from_json_str(
        r#"{
            "accounts": [ { "ref": "bananas", "name": "bananas" } ],
            "libraries": [ { "account": "coconuts", "name": "house" } ]
        }"#,
    )
    .unwrap();

    let mut seeder = Seeder::begin(&pool).await.unwrap();
    let result = document.load(&mut seeder).await;

    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert!(seeder.report().is_empty());
}

#[tokio::test]
async fn test_invalid_enum_value_is_invalid_input() {
    let pool = init_memory_database().await.unwrap();
    let document = SeedDocument::from_json_str(
        r#"{
            "users": [ { "ref": "john", "name": "john", "email": "john@email.com" } ],
            "user_roles": [ { "user": "john", "type": "Wizard" } ]
        }"#,
    )
    .unwrap();

    let mut seeder = Seeder::begin(&pool).await.unwrap();
    let result = document.load(&mut seeder).await;

    match result {
        Err(Error::InvalidInput(msg)) => assert_eq!(msg, "'Wizard' is not a valid role"),
        other => panic!("expected InvalidInput, got {:?}", other),
    }
}

#[tokio::test]
async fn test_example_document_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("seeds").join("example.toml");
    let document = SeedDocument::from_path(&path).unwrap();
    let pool = init_memory_database().await.unwrap();

    let mut seeder = Seeder::begin(&pool).await.unwrap();
    document.load(&mut seeder).await.unwrap();
    let report = seeder.commit().await.unwrap();

    assert_eq!(report.total(), document.len() as u64);
    assert_eq!(report.count(ProgramSequencePatternEvent::KIND), 4);
    assert_eq!(count::<InstrumentAudioEvent, _>(&pool).await.unwrap(), 2);
}

#[tokio::test]
async fn test_exported_ids_are_kept() {
    let account_id = Uuid::new_v4();
    let library_id = Uuid::new_v4();
    let document = SeedDocument::from_json_str(&format!(
        r#"{{
            "libraries": [ {{ "id": "{}", "account": "a", "name": "house" }} ],
            "accounts": [ {{ "ref": "a", "id": "{}", "name": "bananas" }} ]
        }}"#,
        library_id, account_id
    ))
    .unwrap();
    let pool = init_memory_database().await.unwrap();

    let mut seeder = Seeder::begin(&pool).await.unwrap();
    document.load(&mut seeder).await.unwrap();
    seeder.commit().await.unwrap();

    let stored: String = sqlx::query_scalar("SELECT account_id FROM libraries WHERE id = ?")
        .bind(library_id.to_string())
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, account_id.to_string());
}

#[tokio::test]
async fn test_seeded_file_database_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("hub.db");

    {
        let pool = init_database(&db_path).await.unwrap();
        let mut seeder = Seeder::begin(&pool).await.unwrap();
        content::go(&mut seeder).await.unwrap();
        seeder.commit().await.unwrap();
        pool.close().await;
    }

    let pool = init_database(&db_path).await.unwrap();
    assert_eq!(stored_total(&pool).await, BUILTIN_TOTAL as i64);
}
