//! Generic CRUD execution against one admin REST resource.

use crate::config::ResourceIdentity;
use crate::error::AppError;
use crate::response::Paginated;
use crate::row::{Row, RowId};
use crate::transport::Transport;
use serde_json::Value;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collection query: `page` (1-based), `page_size`, `order`, optional `sort` and `q`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u64,
    pub page_size: u64,
    pub order: SortOrder,
    pub sort: Option<String>,
    pub q: Option<String>,
}

impl ListQuery {
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("page_size".to_string(), self.page_size.to_string()),
            ("order".to_string(), self.order.to_string()),
        ];
        if let Some(sort) = self.sort.as_deref().filter(|s| !s.is_empty()) {
            params.push(("sort".into(), sort.to_string()));
        }
        if let Some(q) = self.q.as_deref().filter(|s| !s.is_empty()) {
            params.push(("q".into(), q.to_string()));
        }
        params
    }
}

pub struct CrudService;

impl CrudService {
    /// One page of the collection.
    pub async fn list(
        transport: &dyn Transport,
        resource: &ResourceIdentity,
        query: &ListQuery,
    ) -> Result<Paginated<Row>, AppError> {
        let value = transport.get(&resource.base_path, &query.to_params()).await?;
        let page: Paginated<Row> = serde_json::from_value(value)?;
        Ok(page)
    }

    /// Fetch one record by id.
    pub async fn read(
        transport: &dyn Transport,
        resource: &ResourceIdentity,
        id: RowId,
    ) -> Result<Row, AppError> {
        let value = transport.get(&resource.item_path(id), &[]).await?;
        if value.is_null() {
            return Err(AppError::NotFound(resource.item_path(id)));
        }
        Row::from_value(value)
    }

    /// POST the body. Returns the created row when the server sent one back.
    pub async fn create(
        transport: &dyn Transport,
        resource: &ResourceIdentity,
        body: &Value,
    ) -> Result<Option<Row>, AppError> {
        let created = transport.post(&resource.base_path, body).await?;
        Ok(created.and_then(|v| Row::from_value(v).ok()))
    }

    /// PATCH the record. Returns the updated row when the server sent one back.
    pub async fn update(
        transport: &dyn Transport,
        resource: &ResourceIdentity,
        id: RowId,
        body: &Value,
    ) -> Result<Option<Row>, AppError> {
        let updated = transport.patch(&resource.item_path(id), body).await?;
        Ok(Row::from_value(updated).ok())
    }

    /// DELETE by id. Deleting an already-deleted record is the server's 404 to report.
    pub async fn delete(
        transport: &dyn Transport,
        resource: &ResourceIdentity,
        id: RowId,
    ) -> Result<(), AppError> {
        transport.delete(&resource.item_path(id)).await
    }
}
