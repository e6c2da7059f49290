use books_smoke::{MySqlConfig, report::Reporter, service::smoke, service::waiter::WaitPolicy};
use mimalloc::MiMalloc;
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let mut reporter = Reporter::stdout();
    let result = match MySqlConfig::from_env() {
        Ok(cfg) => smoke::run(&cfg, &WaitPolicy::default(), &mut reporter).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = ?e, "run failed");
            for message in e.user_messages() {
                if let Err(write_err) = reporter.line(&message) {
                    warn!(error = %write_err, "failed to write failure message");
                }
            }
            ExitCode::FAILURE
        }
    }
}
