use crate::errors::Result;
use crate::gateway::Rest;
use crate::models::{PlaybookCommand, PlaybookCommandInsert, PlaybookCommandUpdate};
use tracing::instrument;

/// Lists the reusable command templates, ordered by title.
#[instrument(skip(rest))]
pub async fn list_playbook_commands(rest: &Rest) -> Result<Vec<PlaybookCommand>> {
    rest.select(
        "playbook_comandos",
        &[
            ("select", "*".to_string()),
            ("order", "titulo.asc".to_string()),
        ],
    )
    .await
}

#[instrument(skip(rest, payload))]
pub async fn create_playbook_command(
    rest: &Rest,
    payload: &PlaybookCommandInsert,
) -> Result<PlaybookCommand> {
    rest.insert("playbook_comandos", payload).await
}

#[instrument(skip(rest, payload))]
pub async fn update_playbook_command(
    rest: &Rest,
    id: i64,
    payload: &PlaybookCommandUpdate,
) -> Result<PlaybookCommand> {
    rest.update("playbook_comandos", "comando do playbook", id, payload)
        .await
}

#[instrument(skip(rest))]
pub async fn delete_playbook_command(rest: &Rest, id: i64) -> Result<()> {
    rest.delete("playbook_comandos", id).await
}
