//! Integration tests for the generic insert DAO

use xjh_common::db::init::init_memory_database;
use xjh_common::db::{count, count_table, insert, truncate_all};
use xjh_common::model::*;
use xjh_common::Error;

#[tokio::test]
async fn test_insert_returns_entity_with_identity() {
    let pool = init_memory_database().await.unwrap();

    let account = Account::create("bananas");
    let expected_id = account.id;
    let stored = insert(&pool, account).await.unwrap();

    assert_eq!(stored.id, expected_id);
    let name: String = sqlx::query_scalar("SELECT name FROM accounts WHERE id = ?")
        .bind(stored.id.to_string())
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "bananas");
}

#[tokio::test]
async fn test_returned_entities_chain_as_foreign_keys() {
    let pool = init_memory_database().await.unwrap();

    let user = insert(&pool, User::create("john", "john@email.com", None)).await.unwrap();
    let account = insert(&pool, Account::create("bananas")).await.unwrap();
    let library = insert(&pool, Library::create(&account, "palm tree")).await.unwrap();
    let program = insert(
        &pool,
        Program::create(&user, &library, ProgramType::Main, ProgramState::Published, "fonds", "C#", 120.0, 0.6),
    )
    .await
    .unwrap();
    let sequence = insert(&pool, ProgramSequence::create(&program, 16, "Base", 0.5, "C", 110.3))
        .await
        .unwrap();
    let binding = insert(&pool, ProgramSequenceBinding::create(&sequence, 0)).await.unwrap();
    insert(&pool, ProgramSequenceBindingMeme::create(&binding, "Gravel")).await.unwrap();

    assert_eq!(count::<ProgramSequenceBindingMeme, _>(&pool).await.unwrap(), 1);

    let (offset, program_id): (i64, String) =
        sqlx::query_as("SELECT \"offset\", program_id FROM program_sequence_bindings WHERE id = ?")
            .bind(binding.id.to_string())
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(offset, 0);
    assert_eq!(program_id, program.id.to_string());
}

#[tokio::test]
async fn test_insert_rejects_invalid_entity_without_writing() {
    let pool = init_memory_database().await.unwrap();

    let result = insert(&pool, Account::create("")).await;

    match result {
        Err(Error::InvalidInput(msg)) => assert_eq!(msg, "Name is required."),
        other => panic!("expected InvalidInput, got {:?}", other),
    }
    assert_eq!(count::<Account, _>(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_insert_with_missing_parent_is_not_found() {
    let pool = init_memory_database().await.unwrap();

    // Account never inserted
    let orphan = Library::create(&Account::create("ghost"), "nowhere");
    let result = insert(&pool, orphan).await;

    match result {
        Err(Error::NotFound(msg)) => assert_eq!(msg, "Library parent does not exist"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_insert_twice_is_conflict() {
    let pool = init_memory_database().await.unwrap();

    let account = insert(&pool, Account::create("bananas")).await.unwrap();
    let result = insert(&pool, account.clone()).await;

    match result {
        Err(Error::Conflict(msg)) => assert_eq!(msg, "Account already exists"),
        other => panic!("expected Conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_insert_inside_transaction_rolls_back() {
    let pool = init_memory_database().await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    insert(&mut *tx, Account::create("bananas")).await.unwrap();
    assert_eq!(count::<Account, _>(&mut *tx).await.unwrap(), 1);
    tx.rollback().await.unwrap();

    assert_eq!(count::<Account, _>(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_count_table_rejects_unknown_table() {
    let pool = init_memory_database().await.unwrap();

    assert_eq!(count_table(&pool, "instrument_audios").await.unwrap(), 0);
    assert!(matches!(
        count_table(&pool, "sqlite_master").await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn test_truncate_all_empties_every_table() {
    let pool = init_memory_database().await.unwrap();

    let user = insert(&pool, User::create("jenny", "jenny@email.com", None)).await.unwrap();
    insert(&pool, UserRole::create(&user, UserRoleType::Artist)).await.unwrap();
    let account = insert(&pool, Account::create("bananas")).await.unwrap();
    insert(&pool, AccountUser::create(&account, &user)).await.unwrap();
    let library = insert(&pool, Library::create(&account, "palm tree")).await.unwrap();
    let instrument = insert(
        &pool,
        Instrument::create(&user, &library, InstrumentType::Percussive, InstrumentState::Published, "brilliant"),
    )
    .await
    .unwrap();
    let audio = insert(
        &pool,
        InstrumentAudio::create(&instrument, "Kick", "kick.wav", 0.01, 2.123, 120.0, 440.0, 0.62),
    )
    .await
    .unwrap();
    insert(&pool, InstrumentAudioEvent::create(&audio, 0.0, 1.0, "KICK", "Eb", 1.0)).await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    let deleted = truncate_all(&mut tx).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(deleted, 8);
    assert_eq!(count::<User, _>(&pool).await.unwrap(), 0);
    assert_eq!(count::<InstrumentAudioEvent, _>(&pool).await.unwrap(), 0);
}
