//! Structured logging utilities.
//!
//! Provides context-aware logging with query_id and table name included
//! in every log message.

use std::fmt;

/// Logging context for one Data Graph query result.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub query_id: String,
    pub table: Option<String>,
}

impl LogContext {
    pub fn new(query_id: &str) -> Self {
        Self {
            query_id: query_id.to_string(),
            table: None,
        }
    }

    pub fn with_table(&self, table: &str) -> Self {
        Self {
            query_id: self.query_id.clone(),
            table: Some(table.to_string()),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "[query={}] [table={}]", self.query_id, table),
            None => write!(f, "[query={}]", self.query_id),
        }
    }
}
