//! Persistence across process restarts, using a real database file

use libcat_server::db::{AuthorRepo, BookRepo, BorrowRepo, UserRepo};
use libcat_server::models::{AuthorName, BookTitle, Email, UserName};
use libcat_server::{create_pool, run_migrations, DbError};

#[tokio::test]
async fn records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.db");

    let pool = create_pool(&path).await.unwrap();
    run_migrations(&pool).await.unwrap();
    let author = AuthorRepo::new(&pool)
        .create(AuthorName::new("Tolkien").unwrap())
        .await
        .unwrap();
    UserRepo::new(&pool)
        .create(UserName::new("Bob").unwrap(), Email::new("b@x.com").unwrap())
        .await
        .unwrap();
    pool.close().await;

    // Second startup: schema creation must not disturb existing rows
    let pool = create_pool(&path).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let authors = AuthorRepo::new(&pool).list().await.unwrap();
    assert_eq!(authors, vec![author]);

    let err = UserRepo::new(&pool)
        .create(UserName::new("Other").unwrap(), Email::new("b@x.com").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Conflict { .. }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_writers_all_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let pool = create_pool(&dir.path().join("library.db")).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let author = AuthorRepo::new(&pool)
        .create(AuthorName::new("Tolkien").unwrap())
        .await
        .unwrap();
    let book = BookRepo::new(&pool)
        .create(BookTitle::new("LOTR").unwrap(), author.id)
        .await
        .unwrap();
    let user = UserRepo::new(&pool)
        .create(UserName::new("Bob").unwrap(), Email::new("b@x.com").unwrap())
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..200 {
        let pool = pool.clone();
        let (author_id, book_id, user_id) = (author.id, book.id, user.id);
        handles.push(tokio::spawn(async move {
            if i % 4 == 0 {
                let title = BookTitle::new(&format!("Volume {i}")).unwrap();
                BookRepo::new(&pool).create(title, author_id).await.map(|_| ())
            } else {
                BorrowRepo::new(&pool).create(user_id, book_id).await.map(|_| ())
            }
        }));
    }

    let mut failures = Vec::new();
    for handle in handles {
        if let Err(e) = handle.await.unwrap() {
            failures.push(e.to_string());
        }
    }
    assert!(failures.is_empty(), "failed writes: {failures:?}");

    let borrows = BorrowRepo::new(&pool).list_for_user(user.id).await.unwrap();
    assert_eq!(borrows.len(), 150);
    let books = BookRepo::new(&pool).list_for_author(author.id).await.unwrap();
    assert_eq!(books.len(), 51);
}
