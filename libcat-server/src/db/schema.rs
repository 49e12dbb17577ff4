//! Table definitions, created at startup when absent

use sqlx::SqlitePool;
use tracing::info;

const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE
    );
"#;

const CREATE_AUTHORS: &str = r#"
    CREATE TABLE IF NOT EXISTS authors (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    );
"#;

const CREATE_BOOKS: &str = r#"
    CREATE TABLE IF NOT EXISTS books (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        author_id INTEGER NOT NULL REFERENCES authors(id)
    );
"#;

const CREATE_BORROWS: &str = r#"
    CREATE TABLE IF NOT EXISTS borrows (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id),
        book_id INTEGER NOT NULL REFERENCES books(id),
        borrow_date TEXT NOT NULL
    );
"#;

// borrow_date is write-once
const CREATE_BORROW_DATE_GUARD: &str = r#"
    CREATE TRIGGER IF NOT EXISTS borrows_borrow_date_immutable
    BEFORE UPDATE OF borrow_date ON borrows
    BEGIN
        SELECT RAISE(ABORT, 'borrow_date is immutable');
    END;
"#;

const CREATE_INDEXES: [&str; 3] = [
    "CREATE INDEX IF NOT EXISTS idx_books_author_id ON books(author_id);",
    "CREATE INDEX IF NOT EXISTS idx_borrows_user_id ON borrows(user_id);",
    "CREATE INDEX IF NOT EXISTS idx_borrows_book_id ON borrows(book_id);",
];

/// Create every table, index, and trigger that does not exist yet.
///
/// Safe to run on every startup.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for statement in [
        CREATE_USERS,
        CREATE_AUTHORS,
        CREATE_BOOKS,
        CREATE_BORROWS,
        CREATE_BORROW_DATE_GUARD,
    ]
    .into_iter()
    .chain(CREATE_INDEXES)
    {
        sqlx::query(statement).execute(&mut *tx).await?;
    }

    tx.commit().await?;

    info!("database schema ready");
    Ok(())
}
