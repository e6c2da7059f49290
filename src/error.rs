use sqlx::Error as SqlxError;
use std::fmt;
use std::num::ParseIntError;
use std::time::Duration;
use thiserror::Error as ThisError;

/// Step of the run a statement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CreatingTable,
    Seeding,
    Reading,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::CreatingTable => "creating table",
            Stage::Seeding => "seeding",
            Stage::Reading => "reading",
        };
        f.write_str(name)
    }
}

#[derive(Debug, ThisError)]
pub enum SmokeError {
    #[error("Invalid configuration: {0}")]
    Config(Box<figment::Error>),

    #[error("Invalid configuration: MYSQL_PORT={value:?} is not a valid port: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Required environment variable was not provided: {}.", .0.join(", "))]
    MissingEnv(Vec<&'static str>),

    #[error("A connection to the database could not be established.")]
    ConnectTimeout {
        attempts: usize,
        elapsed: Duration,
        #[source]
        source: SqlxError,
    },

    #[error("Statement failed while {stage}: {source}")]
    Statement {
        stage: Stage,
        #[source]
        source: SqlxError,
    },

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl SmokeError {
    /// Adapter for `map_err` on statement results.
    pub fn statement(stage: Stage) -> impl FnOnce(SqlxError) -> Self {
        move |source| SmokeError::Statement { stage, source }
    }

    /// Lines shown to the user on stdout when the run fails.
    pub fn user_messages(&self) -> Vec<String> {
        match self {
            SmokeError::MissingEnv(names) => names
                .iter()
                .map(|name| format!("Required environment variable was not provided: {name}."))
                .collect(),
            other => vec![other.to_string()],
        }
    }
}

impl From<figment::Error> for SmokeError {
    fn from(e: figment::Error) -> Self {
        SmokeError::Config(Box::new(e))
    }
}
