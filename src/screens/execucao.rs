//! Ad-hoc execution screen.
//!
//! Inserting the `execucoes_realtime` row is the entire contract: no status
//! is tracked here, whatever consumes the row reports completion elsewhere.

use crate::gateway::Gateway;
use crate::models::{Cliente, ExecucaoInsert, ExecucaoRealtime, PlaybookCommand, Servidor};
use crate::screens::{Revision, SharedNotifier};
use tokio::sync::watch;
use tracing::error;

/// Recent-history rows kept on screen.
pub const HISTORY_LIMIT: u32 = 20;

pub struct ExecucaoScreen<G> {
    gateway: G,
    notifier: SharedNotifier,
    clientes: Vec<Cliente>,
    servidores: Vec<Servidor>,
    historico: Vec<ExecucaoRealtime>,
    selected_client: Option<String>,
    selected_servidor_ip: Option<String>,
    pub nome_tarefa: String,
    pub comando: String,
    loading_clientes: bool,
    loading_historico: bool,
    submitting: bool,
    touched: bool,
    invalid_fields: Vec<&'static str>,
    revision: Revision,
}

impl<G: Gateway> ExecucaoScreen<G> {
    pub fn new(gateway: G, notifier: SharedNotifier) -> Self {
        Self {
            gateway,
            notifier,
            clientes: Vec::new(),
            servidores: Vec::new(),
            historico: Vec::new(),
            selected_client: None,
            selected_servidor_ip: None,
            nome_tarefa: String::new(),
            comando: String::new(),
            loading_clientes: false,
            loading_historico: false,
            submitting: false,
            touched: false,
            invalid_fields: Vec::new(),
            revision: Revision::new(),
        }
    }

    /// Loads the client list and, when nothing is selected yet, picks the
    /// first client in list order and loads its servers and history.
    pub async fn activate(&mut self) {
        self.load_clientes().await;
        if self.selected_client.is_none() {
            if let Some(first) = self.clientes.first().map(|c| c.client_id.clone()) {
                self.select_client(&first).await;
            }
        }
    }

    pub async fn load_clientes(&mut self) {
        self.loading_clientes = true;
        self.revision.bump();
        match self.gateway.list_clientes().await {
            Ok(data) => self.clientes = data,
            Err(e) => {
                error!("Failed to load clients: {e}");
                self.notifier.notify("Não foi possível carregar os clientes.");
            }
        }
        self.loading_clientes = false;
        self.revision.bump();
    }

    /// Changes the client selection and reloads that client's server list
    /// and recent history. The server selection survives only when its IP
    /// still belongs to the newly loaded server set.
    pub async fn select_client(&mut self, client_id: &str) {
        self.selected_client = Some(client_id.to_string());
        self.revision.bump();
        self.load_servidores().await;
        self.load_historico().await;
    }

    pub fn select_servidor(&mut self, endereco_ip: &str) {
        self.selected_servidor_ip = Some(endereco_ip.to_string());
        self.revision.bump();
    }

    async fn load_servidores(&mut self) {
        let cliente_pk = self.selected_client.as_ref().and_then(|client_id| {
            self.clientes
                .iter()
                .find(|c| &c.client_id == client_id)
                .map(|c| c.id)
        });
        let Some(cliente_pk) = cliente_pk else {
            self.servidores.clear();
            self.selected_servidor_ip = None;
            self.revision.bump();
            return;
        };

        match self.gateway.list_servidores(Some(cliente_pk)).await {
            Ok(data) => {
                self.servidores = data;
                let still_present = self.selected_servidor_ip.as_ref().is_some_and(|ip| {
                    self.servidores.iter().any(|s| &s.endereco_ip == ip)
                });
                if !still_present {
                    self.selected_servidor_ip = None;
                }
            }
            Err(e) => {
                error!("Failed to load servers: {e}");
                self.notifier
                    .notify("Não foi possível carregar os servidores.");
            }
        }
        self.revision.bump();
    }

    pub async fn load_historico(&mut self) {
        let Some(client_id) = self.selected_client.clone() else {
            self.historico.clear();
            self.revision.bump();
            return;
        };

        self.loading_historico = true;
        self.revision.bump();
        match self
            .gateway
            .list_execucoes_recentes(Some(&client_id), HISTORY_LIMIT)
            .await
        {
            Ok(data) => self.historico = data,
            Err(e) => {
                error!("Failed to load execution history: {e}");
                self.notifier.notify("Não foi possível carregar o histórico.");
            }
        }
        self.loading_historico = false;
        self.revision.bump();
    }

    /// Pre-fills the task name and command text from a playbook entry,
    /// keeping the current client/server selection.
    pub fn prefill_from_playbook(&mut self, command: &PlaybookCommand) {
        self.nome_tarefa = command.titulo.clone();
        self.comando = command.comando.clone();
        self.revision.bump();
    }

    /// Validates and submits the execution. On success only the task-name
    /// and command fields are cleared; the client/server selection stays.
    pub async fn submit(&mut self) {
        let mut invalid = Vec::new();
        if self.selected_client.as_deref().unwrap_or("").is_empty() {
            invalid.push("client_id");
        }
        if self.selected_servidor_ip.as_deref().unwrap_or("").is_empty() {
            invalid.push("servidor_ip");
        }
        if self.nome_tarefa.trim().is_empty() {
            invalid.push("nome_tarefa");
        }
        if self.comando.trim().is_empty() {
            invalid.push("comando");
        }
        if !invalid.is_empty() {
            self.touched = true;
            self.invalid_fields = invalid;
            self.revision.bump();
            return;
        }

        let payload = ExecucaoInsert {
            client_id: self.selected_client.clone().unwrap_or_default(),
            servidor_ip: self.selected_servidor_ip.clone(),
            nome_tarefa: self.nome_tarefa.trim().to_string(),
            comando: self.comando.trim().to_string(),
        };

        self.submitting = true;
        self.revision.bump();
        match self.gateway.inserir_execucao(&payload).await {
            Ok(_) => {
                self.notifier.notify("Comando enviado para execução.");
                self.nome_tarefa.clear();
                self.comando.clear();
                self.touched = false;
                self.invalid_fields.clear();
                self.submitting = false;
                self.load_historico().await;
            }
            Err(e) => {
                error!("Failed to submit execution: {e}");
                self.notifier.notify("Não foi possível enviar o comando.");
                self.submitting = false;
                self.revision.bump();
            }
        }
    }

    pub fn clientes(&self) -> &[Cliente] {
        &self.clientes
    }

    pub fn servidores(&self) -> &[Servidor] {
        &self.servidores
    }

    pub fn historico(&self) -> &[ExecucaoRealtime] {
        &self.historico
    }

    pub fn selected_client(&self) -> Option<&str> {
        self.selected_client.as_deref()
    }

    pub fn selected_servidor_ip(&self) -> Option<&str> {
        self.selected_servidor_ip.as_deref()
    }

    pub fn loading_clientes(&self) -> bool {
        self.loading_clientes
    }

    pub fn loading_historico(&self) -> bool {
        self.loading_historico
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn invalid_fields(&self) -> &[&'static str] {
        &self.invalid_fields
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}
