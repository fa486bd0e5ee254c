use biblio_dal::library::{CreateLibraryEntry, LibraryRepository};
use biblio_dal::review::ReviewRepository;
use biblio_dal::{Error, SqliteStore};
use biblio_review::{
    BookInfo, Review, ReviewDraft, ReviewId, ReviewService, SubmitError, SubmitOutcome,
};
use biblio_types::clock::FixedClock;
use biblio_types::identity::{StaticIdentity, UserIdentity};
use time::macros::datetime;
use tokio_util::sync::CancellationToken;

const NOW: time::OffsetDateTime = datetime!(2026-08-01 12:00 UTC);

async fn init_db() -> sqlx::Pool<sqlx::Sqlite> {
    const DB_URL: &str = "sqlite::memory:";
    let conn = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect(DB_URL)
        .await
        .unwrap();
    sqlx::migrate!("../../migrations").run(&conn).await.unwrap();
    conn
}

fn sample_review(book_id: &str, user_id: &str) -> Review {
    Review {
        id: None,
        book_id: book_id.to_string(),
        user_id: user_id.to_string(),
        rating: 4,
        text: "A very solid read".to_string(),
        is_private: false,
        created: NOW,
        modified: NOW,
        book_title: "Dune".to_string(),
        book_author: "Frank Herbert".to_string(),
        book_cover: Some("covers/dune.jpg".to_string()),
        user_name: "Jane Reader".to_string(),
        user_email: "jane@example.com".to_string(),
    }
}

fn sample_entry(book_id: &str, user_id: &str) -> CreateLibraryEntry {
    CreateLibraryEntry {
        user_id: user_id.to_string(),
        book_id: book_id.to_string(),
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        cover: Some("covers/dune.jpg".to_string()),
        added: NOW,
    }
}

fn reader() -> StaticIdentity {
    StaticIdentity::new(UserIdentity {
        id: "u1".to_string(),
        display_name: "Jane Reader".to_string(),
        email: "jane@example.com".parse().unwrap(),
    })
}

#[tokio::test]
async fn test_review_roundtrip() {
    let conn = init_db().await;
    let repo = ReviewRepository::new(conn);

    let id = repo.create(&sample_review("b1", "u1")).await.unwrap();
    let stored = repo.get(&id).await.unwrap();
    assert_eq!(stored.id, Some(id.clone()));
    assert_eq!(stored.rating, 4);
    assert_eq!(stored.text, "A very solid read");
    assert_eq!(stored.created, NOW);
    assert_eq!(stored.book_title, "Dune");

    let mut updated = stored.clone();
    updated.rating = 5;
    updated.text = "Even better the second time".to_string();
    updated.modified = datetime!(2026-08-02 09:30 UTC);
    repo.update(&id, &updated).await.unwrap();

    let stored = repo.get(&id).await.unwrap();
    assert_eq!(stored.rating, 5);
    assert_eq!(stored.created, NOW);
    assert_eq!(stored.modified, datetime!(2026-08-02 09:30 UTC));

    repo.delete(&id).await.unwrap();
    assert!(repo.get(&id).await.is_err());
    assert!(matches!(
        repo.delete(&id).await,
        Err(Error::RecordNotFound(_))
    ));
}

#[tokio::test]
async fn test_list_for_book() {
    let conn = init_db().await;
    let repo = ReviewRepository::new(conn);

    let mut older = sample_review("b1", "u2");
    older.created = datetime!(2026-07-20 08:00 UTC);
    older.modified = older.created;
    repo.create(&older).await.unwrap();
    repo.create(&sample_review("b1", "u1")).await.unwrap();
    repo.create(&sample_review("b2", "u1")).await.unwrap();

    let reviews = repo.list_for_book("b1").await.unwrap();
    assert_eq!(reviews.len(), 2);
    // newest first
    assert_eq!(reviews[0].user_id, "u1");
    assert_eq!(reviews[1].user_id, "u2");

    let found = repo.find_for_user("b1", "u2").await.unwrap().unwrap();
    assert_eq!(found.user_id, "u2");
    assert!(repo.find_for_user("b3", "u1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_library_rating() {
    let conn = init_db().await;
    let repo = LibraryRepository::new(conn);

    let entry = repo.add(sample_entry("b1", "u1")).await.unwrap();
    assert_eq!(entry.user_rating, None);
    assert_eq!(entry.rated_at, None);

    repo.update_rating("u1", "b1", 5, NOW).await.unwrap();
    let entry = repo.get("u1", "b1").await.unwrap();
    assert_eq!(entry.user_rating, Some(5));
    assert_eq!(entry.rated_at, Some(NOW));

    // rating update requires an existing entry
    assert!(matches!(
        repo.update_rating("u1", "b9", 3, NOW).await,
        Err(Error::RecordNotFound(_))
    ));

    let entries = repo.list_for_user("u1").await.unwrap();
    assert_eq!(entries.len(), 1);

    repo.remove("u1", "b1").await.unwrap();
    assert!(repo.get("u1", "b1").await.is_err());
}

#[tokio::test]
async fn test_submit_end_to_end() {
    let conn = init_db().await;
    LibraryRepository::new(conn.clone())
        .add(sample_entry("b1", "u1"))
        .await
        .unwrap();

    let store = SqliteStore::new(conn.clone());
    let service = ReviewService::new(store, reader(), FixedClock(NOW));

    let book = BookInfo {
        id: "b1".to_string(),
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        cover: Some("covers/dune.jpg".to_string()),
    };
    let draft = ReviewDraft {
        rating: Some(5),
        text: "Loved the pacing and characters.".to_string(),
        is_private: None,
    };
    let record = service
        .build_record(draft.validate().unwrap(), &book, None)
        .unwrap();

    let outcome = service
        .submit(record, &CancellationToken::new())
        .await
        .unwrap();
    let id = match outcome {
        SubmitOutcome::Created { id } => id,
        other => panic!("expected Created, got {other:?}"),
    };

    // rating was denormalized into the library entry
    let entry = LibraryRepository::new(conn.clone())
        .get("u1", "b1")
        .await
        .unwrap();
    assert_eq!(entry.user_rating, Some(5));
    assert_eq!(entry.rated_at, Some(NOW));

    // second save becomes an edit of the same record
    let later = datetime!(2026-08-02 09:30 UTC);
    let store = SqliteStore::new(conn.clone());
    let service = ReviewService::new(store, reader(), FixedClock(later));
    let existing = ReviewRepository::new(conn.clone())
        .find_for_user("b1", "u1")
        .await
        .unwrap()
        .unwrap();
    let draft = ReviewDraft {
        rating: Some(3),
        text: "Cooled off on it a bit.".to_string(),
        is_private: Some(true),
    };
    let record = service
        .build_record(draft.validate().unwrap(), &book, Some(&existing))
        .unwrap();
    let outcome = service
        .submit(record, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(outcome, SubmitOutcome::Updated);

    let stored = ReviewRepository::new(conn.clone()).get(&id).await.unwrap();
    assert_eq!(stored.rating, 3);
    assert!(stored.is_private);
    assert_eq!(stored.created, NOW);
    assert_eq!(stored.modified, later);

    let entry = LibraryRepository::new(conn).get("u1", "b1").await.unwrap();
    assert_eq!(entry.user_rating, Some(3));
    assert_eq!(entry.rated_at, Some(later));
}

#[tokio::test]
async fn test_submit_without_library_entry() {
    let conn = init_db().await;
    let store = SqliteStore::new(conn.clone());
    let service = ReviewService::new(store, reader(), FixedClock(NOW));

    let book = BookInfo {
        id: "b1".to_string(),
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        cover: None,
    };
    let draft = ReviewDraft {
        rating: Some(4),
        text: "Reviewed straight from search.".to_string(),
        is_private: None,
    };
    let record = service
        .build_record(draft.validate().unwrap(), &book, None)
        .unwrap();

    let err = service
        .submit(record, &CancellationToken::new())
        .await
        .unwrap_err();
    let id = match err {
        SubmitError::DenormalizationFailed { id, .. } => id,
        other => panic!("expected DenormalizationFailed, got {other:?}"),
    };

    // the review itself is persisted regardless
    let stored = ReviewRepository::new(conn).get(&id).await.unwrap();
    assert_eq!(stored.rating, 4);
}

#[tokio::test]
async fn test_delete_review_id_missing() {
    let conn = init_db().await;
    let store = SqliteStore::new(conn);
    let service = ReviewService::new(store, reader(), FixedClock(NOW));

    let err = service
        .delete(&ReviewId::from("nope"), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::PersistenceFailed(_)));
}
