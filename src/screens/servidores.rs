//! Server registry screen: list, create, edit, delete.

use crate::errors::Result;
use crate::gateway::Gateway;
use crate::models::{Cliente, Servidor, ServidorInsert, ServidorUpdate};
use crate::screens::{FormMode, Revision, SharedConfirm, SharedNotifier};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::error;

pub const STATUS_OPTIONS: [(i32, &str); 4] = [
    (0, "Desconhecido"),
    (1, "Online"),
    (2, "Offline"),
    (3, "Erro"),
];

/// Label for a server status code; unknown codes read as unknown.
pub fn status_label(value: i32) -> &'static str {
    STATUS_OPTIONS
        .iter()
        .find(|(code, _)| *code == value)
        .map_or("Desconhecido", |(_, label)| label)
}

#[derive(Debug, Clone, Default)]
pub struct ServidorForm {
    pub cliente_id: Option<i64>,
    pub nome: String,
    pub endereco_ip: String,
    pub sistema_operacional: String,
    pub status: i32,
    pub uptime_inicio: Option<DateTime<Utc>>,
    pub mensagem_erro: String,
}

impl ServidorForm {
    fn validate(&self) -> std::result::Result<ServidorInsert, Vec<&'static str>> {
        let mut invalid = Vec::new();
        if self.cliente_id.is_none() {
            invalid.push("cliente_id");
        }
        if self.nome.trim().is_empty() {
            invalid.push("nome");
        }
        if self.endereco_ip.trim().is_empty() {
            invalid.push("endereco_ip");
        }
        if !invalid.is_empty() {
            return Err(invalid);
        }

        let sistema_operacional = match self.sistema_operacional.trim() {
            "" => None,
            os => Some(os.to_string()),
        };
        let mensagem_erro = match self.mensagem_erro.trim() {
            "" => None,
            msg => Some(msg.to_string()),
        };
        Ok(ServidorInsert {
            cliente_id: self.cliente_id.unwrap_or_default(),
            nome: self.nome.trim().to_string(),
            endereco_ip: self.endereco_ip.trim().to_string(),
            sistema_operacional,
            status: self.status,
            uptime_inicio: self.uptime_inicio,
            mensagem_erro,
        })
    }
}

pub struct ServidoresScreen<G> {
    gateway: G,
    notifier: SharedNotifier,
    confirm: SharedConfirm,
    servidores: Vec<Servidor>,
    clientes: Vec<Cliente>,
    loading: bool,
    saving: bool,
    form_mode: FormMode,
    editing: Option<Servidor>,
    form_visible: bool,
    pub form: ServidorForm,
    touched: bool,
    invalid_fields: Vec<&'static str>,
    revision: Revision,
}

impl<G: Gateway> ServidoresScreen<G> {
    pub fn new(gateway: G, notifier: SharedNotifier, confirm: SharedConfirm) -> Self {
        Self {
            gateway,
            notifier,
            confirm,
            servidores: Vec::new(),
            clientes: Vec::new(),
            loading: false,
            saving: false,
            form_mode: FormMode::Create,
            editing: None,
            form_visible: false,
            form: ServidorForm::default(),
            touched: false,
            invalid_fields: Vec::new(),
            revision: Revision::new(),
        }
    }

    pub async fn activate(&mut self) {
        self.load_clientes().await;
        self.load_servidores().await;
    }

    pub async fn load_clientes(&mut self) {
        match self.gateway.list_clientes().await {
            Ok(data) => {
                self.clientes = data;
                self.revision.bump();
            }
            Err(e) => {
                error!("Failed to load clients: {e}");
                self.notifier
                    .notify("Não foi possível carregar a lista de clientes.");
            }
        }
    }

    pub async fn load_servidores(&mut self) {
        self.loading = true;
        self.revision.bump();
        match self.gateway.list_servidores(None).await {
            Ok(data) => self.servidores = data,
            Err(e) => {
                error!("Failed to load servers: {e}");
                self.notifier
                    .notify("Não foi possível carregar os servidores.");
            }
        }
        self.loading = false;
        self.revision.bump();
    }

    pub fn show_create_form(&mut self) {
        self.form_mode = FormMode::Create;
        self.editing = None;
        self.form = ServidorForm::default();
        self.touched = false;
        self.invalid_fields.clear();
        self.form_visible = true;
        self.revision.bump();
    }

    pub fn start_edit(&mut self, servidor: Servidor) {
        self.form = ServidorForm {
            cliente_id: Some(servidor.cliente_id),
            nome: servidor.nome.clone(),
            endereco_ip: servidor.endereco_ip.clone(),
            sistema_operacional: servidor.sistema_operacional.clone().unwrap_or_default(),
            status: servidor.status,
            uptime_inicio: servidor.uptime_inicio,
            mensagem_erro: servidor.mensagem_erro.clone().unwrap_or_default(),
        };
        self.form_mode = FormMode::Edit;
        self.editing = Some(servidor);
        self.touched = false;
        self.invalid_fields.clear();
        self.form_visible = true;
        self.revision.bump();
    }

    pub fn close_form(&mut self) {
        self.form_visible = false;
        self.form_mode = FormMode::Create;
        self.editing = None;
        self.form = ServidorForm::default();
        self.revision.bump();
    }

    /// Display name of the owning client, falling back to the raw id.
    pub fn cliente_nome(&self, cliente_id: i64) -> String {
        self.clientes
            .iter()
            .find(|c| c.id == cliente_id)
            .map_or_else(|| format!("ID {cliente_id}"), |c| c.nome_empresa.clone())
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
                self.notifier.notify(message);
                self.close_form();
            }
            Err(e) => {
                error!("Failed to save server: {e}");
                self.notifier.notify("Não foi possível salvar o servidor.");
            }
        }

        self.saving = false;
        self.load_servidores().await;
    }

    async fn submit_create(&mut self, payload: &ServidorInsert) -> Result<&'static str> {
        let created = self.gateway.create_servidor(payload).await?;
        self.servidores.insert(0, created);
        Ok("Servidor cadastrado com sucesso.")
    }

    async fn submit_edit(&mut self, payload: &ServidorInsert) -> Result<&'static str> {
        let editing_id = self
            .editing
            .as_ref()
            .map(|servidor| servidor.id)
            .ok_or(crate::errors::Error::NotFoundForUpdate("servidor"))?;
        let update = ServidorUpdate {
            cliente_id: Some(payload.cliente_id),
            nome: Some(payload.nome.clone()),
            endereco_ip: Some(payload.endereco_ip.clone()),
            sistema_operacional: Some(payload.sistema_operacional.clone()),
            status: Some(payload.status),
            uptime_inicio: Some(payload.uptime_inicio),
            mensagem_erro: Some(payload.mensagem_erro.clone()),
        };
        let updated = self.gateway.update_servidor(editing_id, &update).await?;
        if let Some(slot) = self.servidores.iter_mut().find(|s| s.id == updated.id) {
            *slot = updated;
        }
        Ok("Servidor atualizado com sucesso.")
    }

    pub async fn delete(&mut self, servidor: Servidor) {
        let confirmed = self.confirm.confirm(&format!(
            "Tem certeza que deseja excluir o servidor {}? Esta ação não pode ser desfeita.",
            servidor.nome
        ));
        if !confirmed {
            return;
        }

        match self.gateway.delete_servidor(servidor.id).await {
            Ok(()) => {
                self.servidores.retain(|s| s.id != servidor.id);
                self.notifier.notify("Servidor removido.");
                self.revision.bump();
            }
            Err(e) => {
                error!("Failed to delete server: {e}");
                self.notifier.notify("Não foi possível excluir o servidor.");
            }
        }
    }

    pub fn servidores(&self) -> &[Servidor] {
        &self.servidores
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

    pub fn editing(&self) -> Option<&Servidor> {
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
