//! Pagination and search query parameters and the paginated envelope.

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::repositories::ListQuery;
use crate::error::AppError;

const DEFAULT_PAGE_SIZE: u32 = 25;
const MAX_PAGE_SIZE: u32 = 1000;

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Case-insensitive substring matched against the resource's text columns.
    #[serde(default)]
    pub search: Option<String>,
}

impl PaginationParams {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Validates pagination parameters and converts to database offset/limit.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `page_size`: 25
    ///
    /// # Validation
    ///
    /// - Page must be > 0
    /// - Page size must be between 1 and 1000
    ///
    /// # Returns
    ///
    /// `(offset, limit)` tuple for SQL queries.
    pub fn validate_and_get_offset_limit(&self) -> Result<(i64, i64), String> {
        let page = self.page();
        let page_size = self.page_size();

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(format!("Page size must be between 1 and {MAX_PAGE_SIZE}"));
        }

        let offset = (i64::from(page) - 1) * i64::from(page_size);
        let limit = i64::from(page_size);

        Ok((offset, limit))
    }

    /// The repository query for these parameters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an invalid page or page size.
    pub fn to_list_query(&self) -> Result<ListQuery, AppError> {
        let (offset, limit) = self.validate_and_get_offset_limit().map_err(|e| {
            AppError::bad_request(
                e,
                json!({ "page": self.page, "page_size": self.page_size }),
            )
        })?;

        Ok(ListQuery::new(self.search.clone(), offset, limit))
    }
}

/// Pagination metadata for responses.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: u32,
}

/// `{"pagination": {...}, "items": [...]}`
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub pagination: PaginationMeta,
    pub items: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, params: &PaginationParams, total_items: i64) -> Self {
        let page_size = params.page_size();
        let total_pages = ((total_items as f64) / (page_size as f64)).ceil() as u32;

        Self {
            pagination: PaginationMeta {
                page: params.page(),
                page_size,
                total_items,
                total_pages,
            },
            items,
        }
    }
}
