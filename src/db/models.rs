use sqlx::FromRow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
}

impl Book {
    pub fn new(id: i32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Record string used by the report: `<id>: <title>`.
impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.title)
    }
}
