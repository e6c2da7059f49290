//! Database module: the `books` table and the statements run against it.
//!
//! Layout:
//! - `models.rs`: the `Book` row and its display form
//! - `schema.rs`: SQL text and the fixed seed rows (MySQL)
//! - `mysql.rs`: `BooksStorage`, owner of the single connection

pub mod models;
pub mod mysql;
pub mod schema;

pub use models::Book;
pub use mysql::BooksStorage;
pub use schema::{MYSQL_INIT, SEED_BOOKS};
