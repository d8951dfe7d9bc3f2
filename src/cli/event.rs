//! Keycloak event commands

use crate::cli::args::{AdminEventFilterArgs, GlobalOptions, LoginEventFilterArgs, PaginationArgs};
use crate::cli::handlers::run_list_command;
use crate::cli::CommandContext;
use crate::client::pagination::DEFAULT_EVENT_PAGE_SIZE;
use crate::error::Result;
use crate::models::{AdminEventDisplay, LoginEventDisplay};

/// Run the login event list command
pub async fn list(
    opts: &GlobalOptions,
    filters: &LoginEventFilterArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let cursor = pagination.cursor(DEFAULT_EVENT_PAGE_SIZE);
    let request = filters.to_request(cursor.offset, cursor.page_size);
    let results = ctx.client.list_login_events(&request).await?;

    run_list_command::<_, LoginEventDisplay, _>(ctx.format, results, pagination.limit, "events")
        .await
}

/// Run the admin event list command
pub async fn admin(
    opts: &GlobalOptions,
    filters: &AdminEventFilterArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let cursor = pagination.cursor(DEFAULT_EVENT_PAGE_SIZE);
    let request = filters.to_request(cursor.offset, cursor.page_size);
    let results = ctx.client.list_admin_events(&request).await?;

    run_list_command::<_, AdminEventDisplay, _>(
        ctx.format,
        results,
        pagination.limit,
        "admin events",
    )
    .await
}
