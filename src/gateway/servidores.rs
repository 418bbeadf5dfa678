use crate::errors::Result;
use crate::gateway::Rest;
use crate::models::{Servidor, ServidorInsert, ServidorUpdate};
use tracing::instrument;

/// Lists servers, optionally scoped to one client, ordered by name.
#[instrument(skip(rest))]
pub async fn list_servidores(rest: &Rest, cliente_id: Option<i64>) -> Result<Vec<Servidor>> {
    let mut query = vec![
        ("select", "*".to_string()),
        ("order", "nome.asc".to_string()),
    ];
    if let Some(id) = cliente_id {
        query.push(("cliente_id", format!("eq.{id}")));
    }
    rest.select("servidores", &query).await
}

#[instrument(skip(rest, payload))]
pub async fn create_servidor(rest: &Rest, payload: &ServidorInsert) -> Result<Servidor> {
    rest.insert("servidores", payload).await
}

#[instrument(skip(rest, payload))]
pub async fn update_servidor(rest: &Rest, id: i64, payload: &ServidorUpdate) -> Result<Servidor> {
    rest.update("servidores", "servidor", id, payload).await
}

#[instrument(skip(rest))]
pub async fn delete_servidor(rest: &Rest, id: i64) -> Result<()> {
    rest.delete("servidores", id).await
}
