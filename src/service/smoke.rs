use crate::config::MySqlConfig;
use crate::db::{Book, BooksStorage, SEED_BOOKS};
use crate::error::{SmokeError, Stage};
use crate::report::Reporter;
use crate::service::waiter::{self, WaitPolicy};
use sqlx::ConnectOptions;
use std::io::Write;
use tracing::{info, warn};

/// Wait for the database, create and seed the table, then read it back.
///
/// The connection is closed before returning, whether the steps succeeded or
/// not. The final report is printed only on success.
pub async fn run<W: Write>(
    cfg: &MySqlConfig,
    policy: &WaitPolicy,
    reporter: &mut Reporter<W>,
) -> Result<Vec<Book>, SmokeError> {
    let options = cfg.connect_options();
    info!(host = %cfg.host, port = cfg.port, database = %cfg.database, "connecting");

    let conn = waiter::wait_for(policy, || {
        if let Err(e) = reporter.waiting() {
            warn!(error = %e, "failed to write progress");
        }
        options.connect()
    })
    .await?;

    let mut storage = BooksStorage::new(conn);
    let outcome = seed_and_read(&mut storage, reporter).await;
    storage.close().await;

    let books = outcome?;
    reporter.report(&books)?;
    Ok(books)
}

async fn seed_and_read<W: Write>(
    storage: &mut BooksStorage,
    reporter: &mut Reporter<W>,
) -> Result<Vec<Book>, SmokeError> {
    reporter.begin("Creating table if it doesn't already exist... ")?;
    storage
        .init_schema()
        .await
        .map_err(SmokeError::statement(Stage::CreatingTable))?;
    reporter.done()?;

    reporter.line("Inserting seed records... ")?;
    for (id, title) in SEED_BOOKS {
        reporter.begin("- Inserting record... ")?;
        storage
            .upsert(id, title)
            .await
            .map_err(SmokeError::statement(Stage::Seeding))?;
        reporter.done()?;
    }
    reporter.done()?;

    reporter.begin("Retrieving books... ")?;
    let books = storage
        .list()
        .await
        .map_err(SmokeError::statement(Stage::Reading))?;
    reporter.done()?;

    info!(count = books.len(), "books retrieved");
    Ok(books)
}
