//! User listing commands

use crate::cli::args::{GlobalOptions, ListArgs};
use crate::cli::handlers::run_list_command;
use crate::cli::CommandContext;
use crate::client::ListRequest;
use crate::error::Result;
use crate::models::UserDisplay;

/// Run the user list command
pub async fn list(opts: &GlobalOptions, args: &ListArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let request = args.to_request(ListRequest::users(), ctx.page_size());
    let results = ctx.client.list_users(&request).await?;

    run_list_command::<_, UserDisplay, _>(ctx.format, results, args.pagination.limit, "users").await
}
