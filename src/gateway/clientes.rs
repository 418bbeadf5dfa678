use crate::errors::Result;
use crate::gateway::Rest;
use crate::models::{Cliente, ClienteInsert, ClienteUpdate};
use tracing::instrument;

/// Lists every client, ordered by company name.
#[instrument(skip(rest))]
pub async fn list_clientes(rest: &Rest) -> Result<Vec<Cliente>> {
    rest.select(
        "clientes",
        &[
            ("select", "*".to_string()),
            ("order", "nome_empresa.asc".to_string()),
        ],
    )
    .await
}

/// Inserts a client and returns the persisted row.
#[instrument(skip(rest, payload))]
pub async fn create_cliente(rest: &Rest, payload: &ClienteInsert) -> Result<Cliente> {
    rest.insert("clientes", payload).await
}

/// Updates a client by primary key and returns the persisted row.
#[instrument(skip(rest, payload))]
pub async fn update_cliente(rest: &Rest, id: i64, payload: &ClienteUpdate) -> Result<Cliente> {
    rest.update("clientes", "cliente", id, payload).await
}

#[instrument(skip(rest))]
pub async fn delete_cliente(rest: &Rest, id: i64) -> Result<()> {
    rest.delete("clientes", id).await
}
