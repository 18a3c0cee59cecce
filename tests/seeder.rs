use rusqlite::Connection;
use shelfseed::catalog::{bundled_books, schema};
use shelfseed::{BookRecord, CatalogSeeder, Error};

fn store_with_table(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("library.db");
    let conn = Connection::open(&path).expect("create store");
    schema::create_books_table(&conn).expect("create books table");
    path
}

fn count_rows(path: &std::path::Path) -> i64 {
    let conn = Connection::open(path).expect("reopen store");
    conn.query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))
        .expect("count rows")
}

#[test]
fn seeding_twice_inserts_nothing_the_second_time() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_with_table(&dir);
    let books = bundled_books().unwrap();
    let seeder = CatalogSeeder::new(&path);

    let first = seeder.seed(&books).expect("first run");
    assert_eq!(first.attempted, 15);
    assert_eq!(first.inserted, 15);
    assert_eq!(first.skipped(), 0);

    let second = seeder.seed(&books).expect("second run");
    assert_eq!(second.attempted, 15);
    assert_eq!(second.inserted, 0);
    assert_eq!(second.already_present, 15);
    assert_eq!(second.skipped(), 15);

    assert_eq!(count_rows(&path), 15);
}

#[test]
fn rows_match_the_seed_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_with_table(&dir);
    let books = bundled_books().unwrap();
    CatalogSeeder::new(&path).seed(&books).unwrap();

    let conn = Connection::open(&path).unwrap();
    let stored: BookRecord = conn
        .query_row(
            "SELECT isbn, title, author, category, publication_year, description, copies, available
             FROM books WHERE isbn = '9781449355739'",
            [],
            |row| {
                Ok(BookRecord {
                    isbn: row.get(0)?,
                    title: row.get(1)?,
                    author: row.get(2)?,
                    category: row.get(3)?,
                    publication_year: row.get(4)?,
                    description: row.get(5)?,
                    copies: row.get(6)?,
                    available: row.get(7)?,
                })
            },
        )
        .unwrap();

    let expected = books
        .iter()
        .find(|b| b.isbn == "9781449355739")
        .unwrap();
    assert_eq!(&stored, expected);
}

#[test]
fn missing_store_aborts_without_creating_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.db");

    let err = CatalogSeeder::new(&path)
        .seed(&bundled_books().unwrap())
        .unwrap_err();
    assert!(matches!(err, Error::Catalog(_)));
    assert!(!path.exists());
}

#[test]
fn store_without_books_table_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch("CREATE TABLE members (id INTEGER PRIMARY KEY);")
        .unwrap();

    let err = CatalogSeeder::new(&path)
        .seed(&bundled_books().unwrap())
        .unwrap_err();
    assert!(matches!(err, Error::Catalog(_)));
}

#[test]
fn create_schema_bootstraps_a_fresh_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.db");

    let report = CatalogSeeder::new(&path)
        .create_schema(true)
        .seed(&bundled_books().unwrap())
        .unwrap();
    assert_eq!(report.inserted, 15);
    assert_eq!(count_rows(&path), 15);
}

#[test]
fn per_record_failures_are_committed_around() {
    let dir = tempfile::tempdir().unwrap();
    let path = store_with_table(&dir);
    let mut books = bundled_books().unwrap();
    books[3].available = books[3].copies + 1;
    let broken_title = books[3].title.clone();

    let report = CatalogSeeder::new(&path).seed(&books).unwrap();
    assert_eq!(report.inserted, 14);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].title, broken_title);

    // Rows from the batch survive the failure
    assert_eq!(count_rows(&path), 14);
}
