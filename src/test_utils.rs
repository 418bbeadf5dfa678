//! Shared test utilities for `backup-console`.
//!
//! Provides an in-memory [`FakeGateway`] standing in for the hosted backend,
//! recording implementations of the notification and confirmation seams, and
//! small helpers for test setup. The fake mirrors the backend's observable
//! contract: orderings, generated ids and timestamps, equality filters,
//! range pagination with exact counts, and the update-matched-no-row error.

use crate::errors::{Error, Result};
use crate::gateway::Gateway;
use crate::models::{
    Agendamento, AgendamentoInsert, AgendamentoUpdate, AuthSession, AuthUser, BackupLog, Cliente,
    ClienteInsert, ClienteUpdate, ExecucaoInsert, ExecucaoRealtime, Page, PlaybookCommand,
    PlaybookCommandInsert, PlaybookCommandUpdate, Servidor, ServidorInsert, ServidorUpdate,
};
use crate::screens::{ConfirmPrompt, Notifier};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// A unique, non-existing session file path for auth tests.
pub fn test_session_path() -> PathBuf {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!(
        "backup-console-test-session-{}-{n}.json",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    path
}

#[derive(Default)]
struct FakeState {
    clientes: Vec<Cliente>,
    servidores: Vec<Servidor>,
    agendamentos: Vec<Agendamento>,
    execucoes: Vec<ExecucaoRealtime>,
    playbook: Vec<PlaybookCommand>,
    backup_logs: Vec<BackupLog>,
    next_id: i64,
    clock: i64,
    calls: Vec<String>,
    fail_next: HashSet<String>,
    credentials: Option<(String, String, AuthUser)>,
    tokens: Vec<(String, AuthUser)>,
}

impl FakeState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn next_timestamp(&mut self) -> DateTime<Utc> {
        self.clock += 1;
        Utc.timestamp_opt(1_700_000_000 + self.clock * 60, 0).unwrap()
    }
}

/// In-memory backend double implementing [`Gateway`].
///
/// Records every operation name so tests can assert which calls were (or
/// were not) issued, and can be told to fail the next occurrence of a named
/// operation.
#[derive(Clone)]
pub struct FakeGateway {
    state: Arc<Mutex<FakeState>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState::default())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake gateway state poisoned")
    }

    fn record(&self, op: &str) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(op.to_string());
        if state.fail_next.remove(op) {
            return Err(Error::Backend(format!("injected failure in {op}")));
        }
        Ok(())
    }

    /// Every gateway operation issued so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Makes the next occurrence of the named operation fail.
    pub fn fail_next(&self, op: &str) {
        self.lock().fail_next.insert(op.to_string());
    }

    pub fn set_credentials(&self, email: &str, password: &str, user: AuthUser) {
        self.lock().credentials = Some((email.to_string(), password.to_string(), user));
    }

    /// Forgets every issued token, as if the provider expired them all.
    pub fn invalidate_tokens(&self) {
        self.lock().tokens.clear();
    }

    pub fn seed_cliente(&self, client_id: &str, nome_empresa: &str, cnpj: &str) -> Cliente {
        let mut state = self.lock();
        let cliente = Cliente {
            id: state.next_id(),
            client_id: client_id.to_string(),
            nome_empresa: nome_empresa.to_string(),
            cnpj_empresa: cnpj.to_string(),
            ativo: true,
            created_at: state.next_timestamp(),
        };
        state.clientes.push(cliente.clone());
        cliente
    }

    pub fn seed_servidor(&self, cliente_id: i64, nome: &str, endereco_ip: &str) -> Servidor {
        let mut state = self.lock();
        let servidor = Servidor {
            id: state.next_id(),
            cliente_id,
            nome: nome.to_string(),
            endereco_ip: endereco_ip.to_string(),
            sistema_operacional: None,
            status: 0,
            uptime_inicio: None,
            mensagem_erro: None,
        };
        state.servidores.push(servidor.clone());
        servidor
    }

    pub fn seed_agendamento(&self, client_id: &str, schedule_name: &str) -> Agendamento {
        let mut state = self.lock();
        let now = state.next_timestamp();
        let agendamento = Agendamento {
            id: state.next_id(),
            client_id: client_id.to_string(),
            schedule_name: schedule_name.to_string(),
            rclone_command: "rclone copy /srv/backup remote:backup".to_string(),
            cron_expression: "0 2 * * *".to_string(),
            is_active: true,
            remote_path: None,
            created_at: now,
            updated_at: now,
        };
        state.agendamentos.push(agendamento.clone());
        agendamento
    }

    pub fn seed_execucao(&self, client_id: &str, nome_tarefa: &str) -> ExecucaoRealtime {
        let mut state = self.lock();
        let execucao = ExecucaoRealtime {
            id: state.next_id(),
            client_id: client_id.to_string(),
            servidor_ip: None,
            nome_tarefa: nome_tarefa.to_string(),
            comando: "df -h".to_string(),
            created_at: state.next_timestamp(),
        };
        state.execucoes.push(execucao.clone());
        execucao
    }

    pub fn seed_playbook(&self, titulo: &str, comando: &str) -> PlaybookCommand {
        let mut state = self.lock();
        let now = state.next_timestamp();
        let command = PlaybookCommand {
            id: state.next_id(),
            titulo: titulo.to_string(),
            descricao: None,
            comando: comando.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.playbook.push(command.clone());
        command
    }

    pub fn seed_backup_log(
        &self,
        client_id: &str,
        file_name: &str,
        error_message: Option<&str>,
    ) -> BackupLog {
        let mut state = self.lock();
        let now = state.next_timestamp();
        let log = BackupLog {
            id: state.next_id(),
            client_id: client_id.to_string(),
            file_name: file_name.to_string(),
            file_size_bytes: 1024,
            file_creation_date: now,
            error_message: error_message.map(str::to_string),
            created_at: now,
        };
        state.backup_logs.push(log.clone());
        log
    }
}

fn paginate<T: Clone>(rows: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let total = rows.len() as u64;
    let from = page * page_size;
    let slice = rows.into_iter().skip(from).take(page_size).collect();
    Page { rows: slice, total }
}

impl Gateway for FakeGateway {
    async fn list_clientes(&self) -> Result<Vec<Cliente>> {
        self.record("list_clientes")?;
        let mut rows = self.lock().clientes.clone();
        rows.sort_by(|a, b| a.nome_empresa.cmp(&b.nome_empresa));
        Ok(rows)
    }

    async fn create_cliente(&self, payload: &ClienteInsert) -> Result<Cliente> {
        self.record("create_cliente")?;
        let mut state = self.lock();
        let cliente = Cliente {
            id: state.next_id(),
            client_id: payload.client_id.clone(),
            nome_empresa: payload.nome_empresa.clone(),
            cnpj_empresa: payload.cnpj_empresa.clone(),
            ativo: payload.ativo,
            created_at: state.next_timestamp(),
        };
        state.clientes.push(cliente.clone());
        Ok(cliente)
    }

    async fn update_cliente(&self, id: i64, payload: &ClienteUpdate) -> Result<Cliente> {
        self.record("update_cliente")?;
        let mut state = self.lock();
        let cliente = state
            .clientes
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(Error::NotFoundForUpdate("cliente"))?;
        if let Some(client_id) = &payload.client_id {
            cliente.client_id = client_id.clone();
        }
        if let Some(nome) = &payload.nome_empresa {
            cliente.nome_empresa = nome.clone();
        }
        if let Some(cnpj) = &payload.cnpj_empresa {
            cliente.cnpj_empresa = cnpj.clone();
        }
        if let Some(ativo) = payload.ativo {
            cliente.ativo = ativo;
        }
        Ok(cliente.clone())
    }

    async fn delete_cliente(&self, id: i64) -> Result<()> {
        self.record("delete_cliente")?;
        self.lock().clientes.retain(|c| c.id != id);
        Ok(())
    }

    async fn list_servidores(&self, cliente_id: Option<i64>) -> Result<Vec<Servidor>> {
        self.record("list_servidores")?;
        let mut rows = self.lock().servidores.clone();
        if let Some(cliente_id) = cliente_id {
            rows.retain(|s| s.cliente_id == cliente_id);
        }
        rows.sort_by(|a, b| a.nome.cmp(&b.nome));
        Ok(rows)
    }

    async fn create_servidor(&self, payload: &ServidorInsert) -> Result<Servidor> {
        self.record("create_servidor")?;
        let mut state = self.lock();
        let servidor = Servidor {
            id: state.next_id(),
            cliente_id: payload.cliente_id,
            nome: payload.nome.clone(),
            endereco_ip: payload.endereco_ip.clone(),
            sistema_operacional: payload.sistema_operacional.clone(),
            status: payload.status,
            uptime_inicio: payload.uptime_inicio,
            mensagem_erro: payload.mensagem_erro.clone(),
        };
        state.servidores.push(servidor.clone());
        Ok(servidor)
    }

    async fn update_servidor(&self, id: i64, payload: &ServidorUpdate) -> Result<Servidor> {
        self.record("update_servidor")?;
        let mut state = self.lock();
        let servidor = state
            .servidores
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(Error::NotFoundForUpdate("servidor"))?;
        if let Some(cliente_id) = payload.cliente_id {
            servidor.cliente_id = cliente_id;
        }
        if let Some(nome) = &payload.nome {
            servidor.nome = nome.clone();
        }
        if let Some(ip) = &payload.endereco_ip {
            servidor.endereco_ip = ip.clone();
        }
        if let Some(so) = &payload.sistema_operacional {
            servidor.sistema_operacional = so.clone();
        }
        if let Some(status) = payload.status {
            servidor.status = status;
        }
        if let Some(uptime) = payload.uptime_inicio {
            servidor.uptime_inicio = uptime;
        }
        if let Some(msg) = &payload.mensagem_erro {
            servidor.mensagem_erro = msg.clone();
        }
        Ok(servidor.clone())
    }

    async fn delete_servidor(&self, id: i64) -> Result<()> {
        self.record("delete_servidor")?;
        self.lock().servidores.retain(|s| s.id != id);
        Ok(())
    }

    async fn list_agendamentos(&self, client_id: Option<&str>) -> Result<Vec<Agendamento>> {
        self.record("list_agendamentos")?;
        let mut rows = self.lock().agendamentos.clone();
        if let Some(client_id) = client_id {
            rows.retain(|a| a.client_id == client_id);
        }
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn create_agendamento(&self, payload: &AgendamentoInsert) -> Result<Agendamento> {
        self.record("create_agendamento")?;
        let mut state = self.lock();
        let now = state.next_timestamp();
        let agendamento = Agendamento {
            id: state.next_id(),
            client_id: payload.client_id.clone(),
            schedule_name: payload.schedule_name.clone(),
            rclone_command: payload.rclone_command.clone(),
            cron_expression: payload.cron_expression.clone(),
            is_active: payload.is_active,
            remote_path: payload.remote_path.clone(),
            created_at: now,
            updated_at: now,
        };
        state.agendamentos.push(agendamento.clone());
        Ok(agendamento)
    }

    async fn update_agendamento(
        &self,
        id: i64,
        payload: &AgendamentoUpdate,
    ) -> Result<Agendamento> {
        self.record("update_agendamento")?;
        let mut state = self.lock();
        let now = state.next_timestamp();
        let agendamento = state
            .agendamentos
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(Error::NotFoundForUpdate("agendamento"))?;
        if let Some(client_id) = &payload.client_id {
            agendamento.client_id = client_id.clone();
        }
        if let Some(name) = &payload.schedule_name {
            agendamento.schedule_name = name.clone();
        }
        if let Some(command) = &payload.rclone_command {
            agendamento.rclone_command = command.clone();
        }
        if let Some(cron) = &payload.cron_expression {
            agendamento.cron_expression = cron.clone();
        }
        if let Some(is_active) = payload.is_active {
            agendamento.is_active = is_active;
        }
        if let Some(remote_path) = &payload.remote_path {
            agendamento.remote_path = remote_path.clone();
        }
        agendamento.updated_at = now;
        Ok(agendamento.clone())
    }

    async fn delete_agendamento(&self, id: i64) -> Result<()> {
        self.record("delete_agendamento")?;
        self.lock().agendamentos.retain(|a| a.id != id);
        Ok(())
    }

    async fn list_execucoes_recentes(
        &self,
        client_id: Option<&str>,
        limit: u32,
    ) -> Result<Vec<ExecucaoRealtime>> {
        self.record(&format!("list_execucoes_recentes:{limit}"))?;
        let mut rows = self.lock().execucoes.clone();
        if let Some(client_id) = client_id {
            rows.retain(|e| e.client_id == client_id);
        }
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn inserir_execucao(&self, payload: &ExecucaoInsert) -> Result<ExecucaoRealtime> {
        self.record("inserir_execucao")?;
        let mut state = self.lock();
        let execucao = ExecucaoRealtime {
            id: state.next_id(),
            client_id: payload.client_id.clone(),
            servidor_ip: payload.servidor_ip.clone(),
            nome_tarefa: payload.nome_tarefa.clone(),
            comando: payload.comando.clone(),
            created_at: state.next_timestamp(),
        };
        state.execucoes.push(execucao.clone());
        Ok(execucao)
    }

    async fn list_playbook_commands(&self) -> Result<Vec<PlaybookCommand>> {
        self.record("list_playbook_commands")?;
        let mut rows = self.lock().playbook.clone();
        rows.sort_by(|a, b| a.titulo.cmp(&b.titulo));
        Ok(rows)
    }

    async fn create_playbook_command(
        &self,
        payload: &PlaybookCommandInsert,
    ) -> Result<PlaybookCommand> {
        self.record("create_playbook_command")?;
        let mut state = self.lock();
        let now = state.next_timestamp();
        let command = PlaybookCommand {
            id: state.next_id(),
            titulo: payload.titulo.clone(),
            descricao: payload.descricao.clone(),
            comando: payload.comando.clone(),
            created_at: now,
            updated_at: now,
        };
        state.playbook.push(command.clone());
        Ok(command)
    }

    async fn update_playbook_command(
        &self,
        id: i64,
        payload: &PlaybookCommandUpdate,
    ) -> Result<PlaybookCommand> {
        self.record("update_playbook_command")?;
        let mut state = self.lock();
        let now = state.next_timestamp();
        let command = state
            .playbook
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(Error::NotFoundForUpdate("comando do playbook"))?;
        if let Some(titulo) = &payload.titulo {
            command.titulo = titulo.clone();
        }
        if let Some(descricao) = &payload.descricao {
            command.descricao = descricao.clone();
        }
        if let Some(comando) = &payload.comando {
            command.comando = comando.clone();
        }
        command.updated_at = now;
        Ok(command.clone())
    }

    async fn delete_playbook_command(&self, id: i64) -> Result<()> {
        self.record("delete_playbook_command")?;
        self.lock().playbook.retain(|c| c.id != id);
        Ok(())
    }

    async fn list_backup_logs(
        &self,
        client_id: &str,
        page: usize,
        page_size: usize,
    ) -> Result<Page<BackupLog>> {
        self.record("list_backup_logs")?;
        let mut rows = self.lock().backup_logs.clone();
        rows.retain(|l| l.client_id == client_id);
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(rows, page, page_size))
    }

    async fn list_backup_logs_global(
        &self,
        page: usize,
        page_size: usize,
        filter: &str,
    ) -> Result<Page<BackupLog>> {
        self.record("list_backup_logs_global")?;
        let mut rows = self.lock().backup_logs.clone();
        let term = filter.trim().to_lowercase();
        if !term.is_empty() {
            rows.retain(|l| {
                l.file_name.to_lowercase().contains(&term)
                    || l.error_message
                        .as_deref()
                        .is_some_and(|m| m.to_lowercase().contains(&term))
            });
        }
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(rows, page, page_size))
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<AuthSession> {
        self.record("sign_in_with_password")?;
        let mut state = self.lock();
        let Some((known_email, known_password, user)) = state.credentials.clone() else {
            return Err(Error::InvalidCredentials);
        };
        if known_email != email.trim() || known_password != password {
            return Err(Error::InvalidCredentials);
        }
        let token = format!("token-{}", state.tokens.len() + 1);
        state.tokens.push((token.clone(), user.clone()));
        Ok(AuthSession {
            access_token: token,
            refresh_token: "refresh".to_string(),
            user,
        })
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser> {
        self.record("get_user")?;
        self.lock()
            .tokens
            .iter()
            .find(|(token, _)| token == access_token)
            .map(|(_, user)| user.clone())
            .ok_or_else(|| Error::Backend("invalid or expired token".to_string()))
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        self.record("sign_out")?;
        self.lock().tokens.retain(|(token, _)| token != access_token);
        Ok(())
    }
}

/// Captures toast notifications for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("notifier poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .expect("notifier poisoned")
            .push(message.to_string());
    }
}

/// Confirmation prompt with a fixed answer, recording every prompt shown.
pub struct ScriptedConfirm {
    answer: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn accepting() -> Arc<Self> {
        Arc::new(Self {
            answer: true,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn refusing() -> Arc<Self> {
        Arc::new(Self {
            answer: false,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("confirm poisoned").clone()
    }
}

impl ConfirmPrompt for ScriptedConfirm {
    fn confirm(&self, message: &str) -> bool {
        self.prompts
            .lock()
            .expect("confirm poisoned")
            .push(message.to_string());
        self.answer
    }
}
