//! Read access to the relational store holding releases and observability
//! snapshots.

mod gateway;
mod models;
mod postgrest;

pub use gateway::{StoreGateway, StoreRead, DEFAULT_HISTORY_HOURS, MAX_HISTORY_HOURS};
pub use models::{
    ObservabilityPoint, ObservabilitySnapshot, ReleaseRecord, ReleaseStatus, ReleasesSummary,
};
pub use postgrest::{PostgrestStore, DEFAULT_PAGE_SIZE};

use async_trait::async_trait;
use serde_json::Value;

pub const RELEASES_TABLE: &str = "releases";
pub const OBSERVABILITY_TABLE: &str = "nucleus_observability";

/// Failure reported by a store backend, already rendered to text.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StoreFailure {
    #[error("store request failed: {0}")]
    Transport(String),
    #[error("store rejected query ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("store returned malformed rows: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Gte,
    Lte,
}

impl FilterOp {
    fn as_str(self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Gte => "gte",
            FilterOp::Lte => "lte",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// A single-table read: projection, filters, ordering, and an optional row
/// cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub table: String,
    pub columns: Vec<String>,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<u32>,
}

impl SelectQuery {
    pub fn from(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn filter(mut self, column: &str, op: FilterOp, value: impl Into<String>) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            op,
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            ascending,
        });
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// `select` projection; `*` when no columns were named.
    pub fn projection(&self) -> String {
        if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(",")
        }
    }

    /// Query-string pairs in PostgREST's filter grammar.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.projection())];
        for f in &self.filters {
            params.push((f.column.clone(), format!("{}.{}", f.op.as_str(), f.value)));
        }
        if let Some(order) = &self.order {
            let dir = if order.ascending { "asc" } else { "desc" };
            params.push(("order".to_string(), format!("{}.{dir}", order.column)));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

/// Backend seam for the gateway: run a read, get JSON rows back.
#[async_trait]
pub trait RelationalStore: Send + Sync {
    async fn select(&self, query: &SelectQuery) -> Result<Vec<Value>, StoreFailure>;
}
