//! Pagination argument types for CLI commands

use clap::Args;

use crate::client::{ListRequest, PaginationCursor};

use super::SortDir;

/// Shared pagination arguments for list commands.
///
/// Flatten this into any command that supports pagination:
/// ```ignore
/// List {
///     #[command(flatten)]
///     pagination: PaginationArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct PaginationArgs {
    /// Maximum results to return (all when omitted)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Index of the first result
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Records fetched per request (defaults to the configured page size)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,
}

impl PaginationArgs {
    /// Page size for the first request.
    ///
    /// A limit smaller than the default page size is requested directly so
    /// a short listing needs a single call.
    pub fn page_size_or(&self, default_page_size: usize) -> usize {
        match (self.page_size, self.limit) {
            (Some(size), _) => size as usize,
            (None, Some(limit)) => limit.clamp(1, default_page_size.max(1)),
            (None, None) => default_page_size,
        }
    }

    /// Cursor of the first page.
    pub fn cursor(&self, default_page_size: usize) -> PaginationCursor {
        PaginationCursor::new(self.offset, self.page_size_or(default_page_size))
    }
}

/// Arguments shared by the group and user listings.
#[derive(Args, Debug, Default, Clone)]
pub struct ListArgs {
    /// JSON filter expression, e.g. '{"name":{"$ilike":"%sales%"}}'
    #[arg(long)]
    pub filter: Option<String>,

    /// Field to sort by
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort direction (asc, desc)
    #[arg(long, value_enum, hide_possible_values = true)]
    pub sort_dir: Option<SortDir>,

    #[command(flatten)]
    pub pagination: PaginationArgs,
}

impl ListArgs {
    /// Apply the arguments to a listing's default request.
    pub fn to_request(&self, base: ListRequest, default_page_size: usize) -> ListRequest {
        let mut request = base;

        if let Some(filter) = &self.filter {
            request = request.filter(filter.clone());
        }

        let field = self.sort_by.clone().or_else(|| request.sort.clone());
        if let Some(field) = field {
            let dir = self.sort_dir.unwrap_or(SortDir::Asc);
            request = request.sort(dir.apply(&field));
        }

        let cursor = self.pagination.cursor(default_page_size);
        request.offset(cursor.offset).limit(cursor.page_size)
    }
}
