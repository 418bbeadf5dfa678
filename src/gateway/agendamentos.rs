use crate::errors::Result;
use crate::gateway::Rest;
use crate::models::{Agendamento, AgendamentoInsert, AgendamentoUpdate};
use tracing::instrument;

/// Lists schedules, newest first, optionally scoped to one client key.
#[instrument(skip(rest))]
pub async fn list_agendamentos(rest: &Rest, client_id: Option<&str>) -> Result<Vec<Agendamento>> {
    let mut query = vec![
        ("select", "*".to_string()),
        ("order", "created_at.desc".to_string()),
    ];
    if let Some(client_id) = client_id {
        query.push(("client_id", format!("eq.{client_id}")));
    }
    rest.select("agendamentos", &query).await
}

#[instrument(skip(rest, payload))]
pub async fn create_agendamento(rest: &Rest, payload: &AgendamentoInsert) -> Result<Agendamento> {
    rest.insert("agendamentos", payload).await
}

#[instrument(skip(rest, payload))]
pub async fn update_agendamento(
    rest: &Rest,
    id: i64,
    payload: &AgendamentoUpdate,
) -> Result<Agendamento> {
    rest.update("agendamentos", "agendamento", id, payload).await
}

#[instrument(skip(rest))]
pub async fn delete_agendamento(rest: &Rest, id: i64) -> Result<()> {
    rest.delete("agendamentos", id).await
}
