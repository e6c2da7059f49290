//! SQL for the `books` table. MySQL dialect.

/// Column width of `books.title`.
pub const TITLE_MAX_LEN: usize = 20;

/// MySQL schema with:
/// - `id` INT AUTO_INCREMENT primary key
/// - `title` VARCHAR(20), empty string by default
pub const MYSQL_INIT: &str = "CREATE TABLE IF NOT EXISTS books (id INT AUTO_INCREMENT, title VARCHAR(20) NOT NULL DEFAULT '', PRIMARY KEY (id))";

/// `REPLACE` deletes any row with the same primary key before inserting.
pub const UPSERT_BOOK: &str = "REPLACE INTO books (id, title) VALUES (?, ?)";

pub const SELECT_BOOKS: &str = "SELECT id, title FROM books";

/// Rows written on every run, in execution order.
pub const SEED_BOOKS: [(i32, &str); 4] = [
    (1, "Book 1"),
    (2, "Book 2"),
    (3, "Book 3"),
    (4, "Book 4"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_are_ordered_and_unique() {
        let ids: Vec<i32> = SEED_BOOKS.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn seed_titles_fit_the_column() {
        for (id, title) in SEED_BOOKS {
            assert_eq!(title, format!("Book {id}"));
            assert!(title.chars().count() <= TITLE_MAX_LEN);
        }
    }

    #[test]
    fn schema_creation_is_idempotent_ddl() {
        assert!(MYSQL_INIT.starts_with("CREATE TABLE IF NOT EXISTS books"));
        assert!(MYSQL_INIT.contains(&format!("VARCHAR({TITLE_MAX_LEN})")));
        assert!(MYSQL_INIT.contains("PRIMARY KEY (id)"));
    }
}
