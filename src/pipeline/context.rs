//! Query context management.
//!
//! Provides a per-query context for logging and bookkeeping.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::logging::structured::LogContext;

/// Context for one Data Graph query result pass.
#[derive(Debug, Clone)]
pub struct QueryContext {
    pub query_id: String,
    pub graph_name: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl QueryContext {
    pub fn new(graph_name: Option<&str>) -> Self {
        let query_id = format!("query-{}", &Uuid::new_v4().to_string()[..8]);

        Self {
            query_id,
            graph_name: graph_name.map(|s| s.to_string()),
            received_at: Utc::now(),
        }
    }

    pub fn log_context(&self) -> LogContext {
        LogContext::new(&self.query_id)
    }
}
