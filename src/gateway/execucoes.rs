use crate::errors::Result;
use crate::gateway::Rest;
use crate::models::{ExecucaoInsert, ExecucaoRealtime};
use tracing::instrument;

/// Lists recent one-off executions, most recent first, capped at `limit`,
/// optionally scoped to one client key.
#[instrument(skip(rest))]
pub async fn list_execucoes_recentes(
    rest: &Rest,
    client_id: Option<&str>,
    limit: u32,
) -> Result<Vec<ExecucaoRealtime>> {
    let mut query = vec![
        ("select", "*".to_string()),
        ("order", "created_at.desc".to_string()),
        ("limit", limit.to_string()),
    ];
    if let Some(client_id) = client_id {
        query.push(("client_id", format!("eq.{client_id}")));
    }
    rest.select("execucoes_realtime", &query).await
}

/// Records a one-off execution request. Inserting the row is the entire
/// contract; the agents pick it up out of band.
#[instrument(skip(rest, payload))]
pub async fn inserir_execucao(rest: &Rest, payload: &ExecucaoInsert) -> Result<ExecucaoRealtime> {
    rest.insert("execucoes_realtime", payload).await
}
