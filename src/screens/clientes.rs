//! Client registry screen: list, create, edit, delete.

use crate::errors::Result;
use crate::format::{is_valid_cnpj_format, mask_cnpj};
use crate::gateway::Gateway;
use crate::models::{Cliente, ClienteInsert, ClienteUpdate};
use crate::screens::{FormMode, Revision, SharedConfirm, SharedNotifier};
use tokio::sync::watch;
use tracing::error;

/// Form fields exactly as typed by the operator.
#[derive(Debug, Clone)]
pub struct ClienteForm {
    pub client_id: String,
    pub nome_empresa: String,
    pub cnpj_empresa: String,
    pub ativo: bool,
}

impl Default for ClienteForm {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            nome_empresa: String::new(),
            cnpj_empresa: String::new(),
            ativo: true,
        }
    }
}

impl ClienteForm {
    /// Local validation; the returned payload carries trimmed values.
    fn validate(&self) -> std::result::Result<ClienteInsert, Vec<&'static str>> {
        let mut invalid = Vec::new();
        if self.client_id.trim().is_empty() {
            invalid.push("client_id");
        }
        if self.nome_empresa.trim().is_empty() {
            invalid.push("nome_empresa");
        }
        if !is_valid_cnpj_format(&self.cnpj_empresa) {
            invalid.push("cnpj_empresa");
        }
        if !invalid.is_empty() {
            return Err(invalid);
        }
        Ok(ClienteInsert {
            client_id: self.client_id.trim().to_string(),
            nome_empresa: self.nome_empresa.trim().to_string(),
            cnpj_empresa: self.cnpj_empresa.clone(),
            ativo: self.ativo,
        })
    }
}

/// Case-insensitive substring filter over the client display fields. The
/// search term's digits are also matched against the raw CNPJ digits so a
/// partially typed CNPJ finds its client regardless of separators.
pub fn filter_clientes(clientes: &[Cliente], term: &str) -> Vec<Cliente> {
    let normalized = term.trim().to_lowercase();
    if normalized.is_empty() {
        return clientes.to_vec();
    }
    let search_digits: String = normalized.chars().filter(char::is_ascii_digit).collect();

    clientes
        .iter()
        .filter(|cliente| {
            let nome = cliente.nome_empresa.to_lowercase();
            let id = cliente.client_id.to_lowercase();
            let cnpj_digits: String = cliente
                .cnpj_empresa
                .chars()
                .filter(char::is_ascii_digit)
                .collect();
            nome.contains(&normalized)
                || id.contains(&normalized)
                || cliente.cnpj_empresa.to_lowercase().contains(&normalized)
                || (!search_digits.is_empty() && cnpj_digits.contains(&search_digits))
        })
        .cloned()
        .collect()
}

pub struct ClientesScreen<G> {
    gateway: G,
    notifier: SharedNotifier,
    confirm: SharedConfirm,
    clientes: Vec<Cliente>,
    filtered: Vec<Cliente>,
    filter_term: String,
    loading: bool,
    saving: bool,
    form_mode: FormMode,
    editing: Option<Cliente>,
    form_visible: bool,
    pub form: ClienteForm,
    touched: bool,
    invalid_fields: Vec<&'static str>,
    revision: Revision,
}

impl<G: Gateway> ClientesScreen<G> {
    pub fn new(gateway: G, notifier: SharedNotifier, confirm: SharedConfirm) -> Self {
        Self {
            gateway,
            notifier,
            confirm,
            clientes: Vec::new(),
            filtered: Vec::new(),
            filter_term: String::new(),
            loading: false,
            saving: false,
            form_mode: FormMode::Create,
            editing: None,
            form_visible: false,
            form: ClienteForm::default(),
            touched: false,
            invalid_fields: Vec::new(),
            revision: Revision::new(),
        }
    }

    pub async fn activate(&mut self) {
        self.load_clientes().await;
    }

    pub async fn load_clientes(&mut self) {
        self.loading = true;
        self.revision.bump();
        match self.gateway.list_clientes().await {
            Ok(data) => {
                self.clientes = data;
                self.recompute();
            }
            Err(e) => {
                error!("Failed to load clients: {e}");
                self.notifier.notify("Não foi possível carregar os clientes.");
            }
        }
        self.loading = false;
        self.revision.bump();
    }

    pub fn show_create_form(&mut self) {
        self.form_mode = FormMode::Create;
        self.editing = None;
        self.form = ClienteForm::default();
        self.touched = false;
        self.invalid_fields.clear();
        self.form_visible = true;
        self.revision.bump();
    }

    pub fn start_edit(&mut self, cliente: Cliente) {
        self.form = ClienteForm {
            client_id: cliente.client_id.clone(),
            nome_empresa: cliente.nome_empresa.clone(),
            cnpj_empresa: cliente.cnpj_empresa.clone(),
            ativo: cliente.ativo,
        };
        self.form_mode = FormMode::Edit;
        self.editing = Some(cliente);
        self.touched = false;
        self.invalid_fields.clear();
        self.form_visible = true;
        self.revision.bump();
    }

    pub fn close_form(&mut self) {
        self.form_visible = false;
        self.form_mode = FormMode::Create;
        self.editing = None;
        self.form = ClienteForm::default();
        self.revision.bump();
    }

    pub fn set_filter(&mut self, term: &str) {
        self.filter_term = term.to_string();
        self.recompute();
        self.revision.bump();
    }

    /// Re-applies the progressive CNPJ mask to whatever is in the field.
    pub fn apply_cnpj_mask(&mut self) {
        self.form.cnpj_empresa = mask_cnpj(&self.form.cnpj_empresa);
    }

    /// Validates and submits the form. A validation failure marks every
    /// field touched and never reaches the gateway.
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
                error!("Failed to save client: {e}");
                self.notifier.notify("Não foi possível salvar o cliente.");
            }
        }

        self.saving = false;
        // Reconcile backend-side defaults regardless of outcome
        self.load_clientes().await;
    }

    async fn submit_create(&mut self, payload: &ClienteInsert) -> Result<&'static str> {
        let created = self.gateway.create_cliente(payload).await?;
        self.clientes.insert(0, created);
        Ok("Cliente cadastrado com sucesso.")
    }

    async fn submit_edit(&mut self, payload: &ClienteInsert) -> Result<&'static str> {
        let editing_id = self
            .editing
            .as_ref()
            .map(|cliente| cliente.id)
            .ok_or(crate::errors::Error::NotFoundForUpdate("cliente"))?;
        let update = ClienteUpdate {
            client_id: Some(payload.client_id.clone()),
            nome_empresa: Some(payload.nome_empresa.clone()),
            cnpj_empresa: Some(payload.cnpj_empresa.clone()),
            ativo: Some(payload.ativo),
        };
        let updated = self.gateway.update_cliente(editing_id, &update).await?;
        if let Some(slot) = self.clientes.iter_mut().find(|c| c.id == updated.id) {
            *slot = updated;
        }
        Ok("Cliente atualizado com sucesso.")
    }

    /// Deletes after an explicit confirmation; refusing leaves everything
    /// untouched.
    pub async fn delete(&mut self, cliente: Cliente) {
        let confirmed = self.confirm.confirm(&format!(
            "Tem certeza que deseja excluir o cliente {}? Esta ação pode remover dados relacionados.",
            cliente.nome_empresa
        ));
        if !confirmed {
            return;
        }

        match self.gateway.delete_cliente(cliente.id).await {
            Ok(()) => {
                self.clientes.retain(|c| c.id != cliente.id);
                self.recompute();
                self.notifier.notify("Cliente removido.");
                self.revision.bump();
            }
            Err(e) => {
                error!("Failed to delete client: {e}");
                self.notifier.notify("Não foi possível excluir o cliente.");
            }
        }
    }

    fn recompute(&mut self) {
        self.filtered = filter_clientes(&self.clientes, &self.filter_term);
    }

    pub fn clientes(&self) -> &[Cliente] {
        &self.clientes
    }

    pub fn filtered(&self) -> &[Cliente] {
        &self.filtered
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

    pub fn editing(&self) -> Option<&Cliente> {
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
