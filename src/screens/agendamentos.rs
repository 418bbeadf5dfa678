//! Scheduled sync-job screen: list, create, edit, delete.
//!
//! Cron expressions and rclone commands are free text here; the agents that
//! poll the table are the ones that interpret them.

use crate::errors::Result;
use crate::gateway::Gateway;
use crate::models::{Agendamento, AgendamentoInsert, AgendamentoUpdate, Cliente};
use crate::screens::{FormMode, Revision, SharedConfirm, SharedNotifier};
use tokio::sync::watch;
use tracing::error;

#[derive(Debug, Clone)]
pub struct AgendamentoForm {
    pub client_id: String,
    pub schedule_name: String,
    pub rclone_command: String,
    pub cron_expression: String,
    pub remote_path: String,
    pub is_active: bool,
}

impl Default for AgendamentoForm {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            schedule_name: String::new(),
            rclone_command: String::new(),
            cron_expression: String::new(),
            remote_path: String::new(),
            is_active: true,
        }
    }
}

impl AgendamentoForm {
    fn validate(&self) -> std::result::Result<AgendamentoInsert, Vec<&'static str>> {
        let mut invalid = Vec::new();
        if self.client_id.trim().is_empty() {
            invalid.push("client_id");
        }
        if self.schedule_name.trim().is_empty() {
            invalid.push("schedule_name");
        }
        if self.rclone_command.trim().is_empty() {
            invalid.push("rclone_command");
        }
        if self.cron_expression.trim().is_empty() {
            invalid.push("cron_expression");
        }
        if !invalid.is_empty() {
            return Err(invalid);
        }

        let remote_path = match self.remote_path.trim() {
            "" => None,
            path => Some(path.to_string()),
        };
        Ok(AgendamentoInsert {
            client_id: self.client_id.trim().to_string(),
            schedule_name: self.schedule_name.trim().to_string(),
            rclone_command: self.rclone_command.trim().to_string(),
            cron_expression: self.cron_expression.trim().to_string(),
            is_active: self.is_active,
            remote_path,
        })
    }
}

/// Case-insensitive substring filter across the schedule fields, including
/// the owning client's display name resolved through the loaded client list.
pub fn filter_agendamentos(
    agendamentos: &[Agendamento],
    clientes: &[Cliente],
    term: &str,
) -> Vec<Agendamento> {
    let normalized = term.trim().to_lowercase();
    if normalized.is_empty() {
        return agendamentos.to_vec();
    }

    agendamentos
        .iter()
        .filter(|item| {
            let cliente_nome = clientes
                .iter()
                .find(|c| c.client_id == item.client_id)
                .map(|c| c.nome_empresa.to_lowercase())
                .unwrap_or_default();
            let fields = [
                item.schedule_name.as_str(),
                item.rclone_command.as_str(),
                item.cron_expression.as_str(),
                item.client_id.as_str(),
                cliente_nome.as_str(),
            ]
            .join(" ")
            .to_lowercase();
            fields.contains(&normalized)
        })
        .cloned()
        .collect()
}

pub struct AgendamentosScreen<G> {
    gateway: G,
    notifier: SharedNotifier,
    confirm: SharedConfirm,
    agendamentos: Vec<Agendamento>,
    clientes: Vec<Cliente>,
    filtered: Vec<Agendamento>,
    filter_term: String,
    loading: bool,
    saving: bool,
    form_mode: FormMode,
    editing: Option<Agendamento>,
    form_visible: bool,
    pub form: AgendamentoForm,
    touched: bool,
    invalid_fields: Vec<&'static str>,
    revision: Revision,
}

impl<G: Gateway> AgendamentosScreen<G> {
    pub fn new(gateway: G, notifier: SharedNotifier, confirm: SharedConfirm) -> Self {
        Self {
            gateway,
            notifier,
            confirm,
            agendamentos: Vec::new(),
            clientes: Vec::new(),
            filtered: Vec::new(),
            filter_term: String::new(),
            loading: false,
            saving: false,
            form_mode: FormMode::Create,
            editing: None,
            form_visible: false,
            form: AgendamentoForm::default(),
            touched: false,
            invalid_fields: Vec::new(),
            revision: Revision::new(),
        }
    }

    pub async fn activate(&mut self) {
        self.load_clientes().await;
        self.load_agendamentos().await;
    }

    pub async fn load_clientes(&mut self) {
        match self.gateway.list_clientes().await {
            Ok(data) => {
                self.clientes = data;
                self.recompute();
                self.revision.bump();
            }
            Err(e) => {
                error!("Failed to load clients: {e}");
                self.notifier.notify("Não foi possível carregar os clientes.");
            }
        }
    }

    pub async fn load_agendamentos(&mut self) {
        self.loading = true;
        self.revision.bump();
        match self.gateway.list_agendamentos(None).await {
            Ok(data) => {
                self.agendamentos = data;
                self.recompute();
            }
            Err(e) => {
                error!("Failed to load schedules: {e}");
                self.notifier
                    .notify("Não foi possível carregar os agendamentos.");
            }
        }
        self.loading = false;
        self.revision.bump();
    }

    pub fn show_create_form(&mut self) {
        self.form_mode = FormMode::Create;
        self.editing = None;
        self.form = AgendamentoForm::default();
        self.touched = false;
        self.invalid_fields.clear();
        self.form_visible = true;
        self.revision.bump();
    }

    pub fn start_edit(&mut self, agendamento: Agendamento) {
        self.form = AgendamentoForm {
            client_id: agendamento.client_id.clone(),
            schedule_name: agendamento.schedule_name.clone(),
            rclone_command: agendamento.rclone_command.clone(),
            cron_expression: agendamento.cron_expression.clone(),
            remote_path: agendamento.remote_path.clone().unwrap_or_default(),
            is_active: agendamento.is_active,
        };
        self.form_mode = FormMode::Edit;
        self.editing = Some(agendamento);
        self.touched = false;
        self.invalid_fields.clear();
        self.form_visible = true;
        self.revision.bump();
    }

    pub fn close_form(&mut self) {
        self.form_visible = false;
        self.form_mode = FormMode::Create;
        self.editing = None;
        self.form = AgendamentoForm::default();
        self.revision.bump();
    }

    pub fn set_filter(&mut self, term: &str) {
        self.filter_term = term.to_string();
        self.recompute();
        self.revision.bump();
    }

    pub async fn submit(&mut self) {
        let payload = match self.form.validate() {
            Ok(payload) => payload,
            Err(fields) => {
                self.touched = true;
                self.invalid_fields = fields;
                self.revision.bump();
                return;
            }
        };

        self.saving = true;
        self.revision.bump();

        let result = match self.form_mode {
            FormMode::Create => self.submit_create(&payload).await,
            FormMode::Edit => self.submit_edit(&payload).await,
        };

        match result {
            Ok(message) => {
                self.recompute();
                self.notifier.notify(message);
                self.close_form();
            }
            Err(e) => {
                error!("Failed to save schedule: {e}");
                self.notifier
                    .notify("Não foi possível salvar o agendamento.");
            }
        }

        self.saving = false;
        self.load_agendamentos().await;
    }

    async fn submit_create(&mut self, payload: &AgendamentoInsert) -> Result<&'static str> {
        let created = self.gateway.create_agendamento(payload).await?;
        self.agendamentos.insert(0, created);
        Ok("Agendamento criado com sucesso.")
    }

    async fn submit_edit(&mut self, payload: &AgendamentoInsert) -> Result<&'static str> {
        let editing_id = self
            .editing
            .as_ref()
            .map(|agendamento| agendamento.id)
            .ok_or(crate::errors::Error::NotFoundForUpdate("agendamento"))?;
        let update = AgendamentoUpdate {
            client_id: Some(payload.client_id.clone()),
            schedule_name: Some(payload.schedule_name.clone()),
            rclone_command: Some(payload.rclone_command.clone()),
            cron_expression: Some(payload.cron_expression.clone()),
            is_active: Some(payload.is_active),
            remote_path: Some(payload.remote_path.clone()),
        };
        let updated = self.gateway.update_agendamento(editing_id, &update).await?;
        if let Some(slot) = self.agendamentos.iter_mut().find(|a| a.id == updated.id) {
            *slot = updated;
        }
        Ok("Agendamento atualizado com sucesso.")
    }

    pub async fn delete(&mut self, agendamento: Agendamento) {
        let confirmed = self.confirm.confirm(&format!(
            "Deseja excluir o agendamento \"{}\"?",
            agendamento.schedule_name
        ));
        if !confirmed {
            return;
        }

        match self.gateway.delete_agendamento(agendamento.id).await {
            Ok(()) => {
                self.agendamentos.retain(|a| a.id != agendamento.id);
                self.recompute();
                self.notifier.notify("Agendamento excluído.");
                self.revision.bump();
            }
            Err(e) => {
                error!("Failed to delete schedule: {e}");
                self.notifier
                    .notify("Não foi possível excluir o agendamento.");
            }
        }
    }

    fn recompute(&mut self) {
        self.filtered = filter_agendamentos(&self.agendamentos, &self.clientes, &self.filter_term);
    }

    pub fn agendamentos(&self) -> &[Agendamento] {
        &self.agendamentos
    }

    pub fn filtered(&self) -> &[Agendamento] {
        &self.filtered
    }

    pub fn clientes(&self) -> &[Cliente] {
        &self.clientes
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn saving(&self) -> bool {
        self.saving
    }

    pub fn form_mode(&self) -> FormMode {
        self.form_mode
    }

    pub fn form_visible(&self) -> bool {
        self.form_visible
    }

    pub fn editing(&self) -> Option<&Agendamento> {
        self.editing.as_ref()
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
