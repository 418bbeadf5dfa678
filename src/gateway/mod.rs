//! Data-access gateway over the hosted relational backend.
//!
//! Laid out one module per entity; every function takes the shared [`Rest`]
//! handle. The [`Gateway`] trait is the single seam the screens and the
//! session service depend on, so tests can run against an in-memory fake
//! instead of the network.

pub mod agendamentos;
pub mod auth_api;
pub mod backup_logs;
pub mod clientes;
pub mod execucoes;
pub mod playbook;
pub mod rest;
pub mod servidores;

pub use rest::Rest;

use crate::errors::Result;
use crate::models::{
    Agendamento, AgendamentoInsert, AgendamentoUpdate, AuthSession, AuthUser, BackupLog, Cliente,
    ClienteInsert, ClienteUpdate, ExecucaoInsert, ExecucaoRealtime, Page, PlaybookCommand,
    PlaybookCommandInsert, PlaybookCommandUpdate, Servidor, ServidorInsert, ServidorUpdate,
};

/// Contract of the data-access layer: one method per entity and operation,
/// plus the identity-provider operations the session service needs.
///
/// List operations take their optional equality filters as parameters;
/// create and update return the persisted row so callers can reconcile
/// their local collections without a second round trip. Every method fails
/// by returning an error carrying the backend's message; no retries happen
/// at this layer.
pub trait Gateway {
    async fn list_clientes(&self) -> Result<Vec<Cliente>>;
    async fn create_cliente(&self, payload: &ClienteInsert) -> Result<Cliente>;
    async fn update_cliente(&self, id: i64, payload: &ClienteUpdate) -> Result<Cliente>;
    async fn delete_cliente(&self, id: i64) -> Result<()>;

    async fn list_servidores(&self, cliente_id: Option<i64>) -> Result<Vec<Servidor>>;
    async fn create_servidor(&self, payload: &ServidorInsert) -> Result<Servidor>;
    async fn update_servidor(&self, id: i64, payload: &ServidorUpdate) -> Result<Servidor>;
    async fn delete_servidor(&self, id: i64) -> Result<()>;

    async fn list_agendamentos(&self, client_id: Option<&str>) -> Result<Vec<Agendamento>>;
    async fn create_agendamento(&self, payload: &AgendamentoInsert) -> Result<Agendamento>;
    async fn update_agendamento(&self, id: i64, payload: &AgendamentoUpdate)
    -> Result<Agendamento>;
    async fn delete_agendamento(&self, id: i64) -> Result<()>;

    async fn list_execucoes_recentes(
        &self,
        client_id: Option<&str>,
        limit: u32,
    ) -> Result<Vec<ExecucaoRealtime>>;
    async fn inserir_execucao(&self, payload: &ExecucaoInsert) -> Result<ExecucaoRealtime>;

    async fn list_playbook_commands(&self) -> Result<Vec<PlaybookCommand>>;
    async fn create_playbook_command(
        &self,
        payload: &PlaybookCommandInsert,
    ) -> Result<PlaybookCommand>;
    async fn update_playbook_command(
        &self,
        id: i64,
        payload: &PlaybookCommandUpdate,
    ) -> Result<PlaybookCommand>;
    async fn delete_playbook_command(&self, id: i64) -> Result<()>;

    async fn list_backup_logs(
        &self,
        client_id: &str,
        page: usize,
        page_size: usize,
    ) -> Result<Page<BackupLog>>;
    async fn list_backup_logs_global(
        &self,
        page: usize,
        page_size: usize,
        filter: &str,
    ) -> Result<Page<BackupLog>>;

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthSession>;
    async fn get_user(&self, access_token: &str) -> Result<AuthUser>;
    async fn sign_out(&self, access_token: &str) -> Result<()>;
}

impl Gateway for Rest {
    async fn list_clientes(&self) -> Result<Vec<Cliente>> {
        clientes::list_clientes(self).await
    }
    async fn create_cliente(&self, payload: &ClienteInsert) -> Result<Cliente> {
        clientes::create_cliente(self, payload).await
    }
    async fn update_cliente(&self, id: i64, payload: &ClienteUpdate) -> Result<Cliente> {
        clientes::update_cliente(self, id, payload).await
    }
    async fn delete_cliente(&self, id: i64) -> Result<()> {
        clientes::delete_cliente(self, id).await
    }

    async fn list_servidores(&self, cliente_id: Option<i64>) -> Result<Vec<Servidor>> {
        servidores::list_servidores(self, cliente_id).await
    }
    async fn create_servidor(&self, payload: &ServidorInsert) -> Result<Servidor> {
        servidores::create_servidor(self, payload).await
    }
    async fn update_servidor(&self, id: i64, payload: &ServidorUpdate) -> Result<Servidor> {
        servidores::update_servidor(self, id, payload).await
    }
    async fn delete_servidor(&self, id: i64) -> Result<()> {
        servidores::delete_servidor(self, id).await
    }

    async fn list_agendamentos(&self, client_id: Option<&str>) -> Result<Vec<Agendamento>> {
        agendamentos::list_agendamentos(self, client_id).await
    }
    async fn create_agendamento(&self, payload: &AgendamentoInsert) -> Result<Agendamento> {
        agendamentos::create_agendamento(self, payload).await
    }
    async fn update_agendamento(
        &self,
        id: i64,
        payload: &AgendamentoUpdate,
    ) -> Result<Agendamento> {
        agendamentos::update_agendamento(self, id, payload).await
    }
    async fn delete_agendamento(&self, id: i64) -> Result<()> {
        agendamentos::delete_agendamento(self, id).await
    }

    async fn list_execucoes_recentes(
        &self,
        client_id: Option<&str>,
        limit: u32,
    ) -> Result<Vec<ExecucaoRealtime>> {
        execucoes::list_execucoes_recentes(self, client_id, limit).await
    }
    async fn inserir_execucao(&self, payload: &ExecucaoInsert) -> Result<ExecucaoRealtime> {
        execucoes::inserir_execucao(self, payload).await
    }

    async fn list_playbook_commands(&self) -> Result<Vec<PlaybookCommand>> {
        playbook::list_playbook_commands(self).await
    }
    async fn create_playbook_command(
        &self,
        payload: &PlaybookCommandInsert,
    ) -> Result<PlaybookCommand> {
        playbook::create_playbook_command(self, payload).await
    }
    async fn update_playbook_command(
        &self,
        id: i64,
        payload: &PlaybookCommandUpdate,
    ) -> Result<PlaybookCommand> {
        playbook::update_playbook_command(self, id, payload).await
    }
    async fn delete_playbook_command(&self, id: i64) -> Result<()> {
        playbook::delete_playbook_command(self, id).await
    }

    async fn list_backup_logs(
        &self,
        client_id: &str,
        page: usize,
        page_size: usize,
    ) -> Result<Page<BackupLog>> {
        backup_logs::list_backup_logs(self, client_id, page, page_size).await
    }
    async fn list_backup_logs_global(
        &self,
        page: usize,
        page_size: usize,
        filter: &str,
    ) -> Result<Page<BackupLog>> {
        backup_logs::list_backup_logs_global(self, page, page_size, filter).await
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthSession> {
        auth_api::sign_in_with_password(self, email, password).await
    }
    async fn get_user(&self, access_token: &str) -> Result<AuthUser> {
        auth_api::get_user(self, access_token).await
    }
    async fn sign_out(&self, access_token: &str) -> Result<()> {
        auth_api::sign_out(self, access_token).await
    }
}
