use crate::errors::Result;
use crate::gateway::Rest;
use crate::models::{BackupLog, Page};
use tracing::instrument;

fn page_bounds(page: usize, page_size: usize) -> (usize, usize) {
    let from = page * page_size;
    let to = (from + page_size).saturating_sub(1);
    (from, to)
}

/// One page of a client's backup logs, newest first, with the exact total.
#[instrument(skip(rest))]
pub async fn list_backup_logs(
    rest: &Rest,
    client_id: &str,
    page: usize,
    page_size: usize,
) -> Result<Page<BackupLog>> {
    let (from, to) = page_bounds(page, page_size);
    let query = [
        ("select", "*".to_string()),
        ("order", "created_at.desc".to_string()),
        ("client_id", format!("eq.{client_id}")),
    ];
    let (rows, total) = rest.select_page("backup_logs", &query, from, to).await?;
    Ok(Page { rows, total })
}

/// One page across every client, with an optional server-side free-text
/// filter over the file name and error message.
#[instrument(skip(rest))]
pub async fn list_backup_logs_global(
    rest: &Rest,
    page: usize,
    page_size: usize,
    filter: &str,
) -> Result<Page<BackupLog>> {
    let (from, to) = page_bounds(page, page_size);
    let mut query = vec![
        ("select", "*".to_string()),
        ("order", "created_at.desc".to_string()),
    ];
    let term = filter.trim();
    if !term.is_empty() {
        query.push((
            "or",
            format!("(file_name.ilike.*{term}*,error_message.ilike.*{term}*)"),
        ));
    }
    let (rows, total) = rest.select_page("backup_logs", &query, from, to).await?;
    Ok(Page { rows, total })
}
