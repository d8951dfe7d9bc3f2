//! Group listing commands

use crate::cli::args::{GlobalOptions, ListArgs};
use crate::cli::handlers::run_list_command;
use crate::cli::CommandContext;
use crate::client::ListRequest;
use crate::error::Result;
use crate::models::GroupDisplay;

/// Run the group list command
pub async fn list(opts: &GlobalOptions, args: &ListArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let request = args.to_request(ListRequest::groups(), ctx.page_size());
    let results = ctx.client.list_groups(&request).await?;

    run_list_command::<_, GroupDisplay, _>(ctx.format, results, args.pagination.limit, "groups")
        .await
}
