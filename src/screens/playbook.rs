//! Reusable command playbook: list, create, edit, delete, execute.
//!
//! Playbook entries are not tied to any client; executing one just pre-fills
//! a realtime execution with the entry's title and command text.

use crate::errors::Result;
use crate::gateway::Gateway;
use crate::models::{
    Cliente, ExecucaoInsert, PlaybookCommand, PlaybookCommandInsert, PlaybookCommandUpdate,
};
use crate::screens::{FormMode, Revision, SharedConfirm, SharedNotifier};
use tokio::sync::watch;
use tracing::error;

#[derive(Debug, Clone, Default)]
pub struct PlaybookForm {
    pub titulo: String,
    pub descricao: String,
    pub comando: String,
}

impl PlaybookForm {
    fn validate(&self) -> std::result::Result<PlaybookCommandInsert, Vec<&'static str>> {
        let mut invalid = Vec::new();
        if self.titulo.trim().is_empty() {
            invalid.push("titulo");
        }
        if self.comando.trim().is_empty() {
            invalid.push("comando");
        }
        if !invalid.is_empty() {
            return Err(invalid);
        }

        let descricao = match self.descricao.trim() {
            "" => None,
            text => Some(text.to_string()),
        };
        Ok(PlaybookCommandInsert {
            titulo: self.titulo.trim().to_string(),
            descricao,
            comando: self.comando.trim().to_string(),
        })
    }
}

/// Case-insensitive substring filter over title, description and command.
pub fn filter_playbook(commands: &[PlaybookCommand], term: &str) -> Vec<PlaybookCommand> {
    let normalized = term.trim().to_lowercase();
    if normalized.is_empty() {
        return commands.to_vec();
    }

    commands
        .iter()
        .filter(|command| {
            let fields = [
                command.titulo.as_str(),
                command.descricao.as_deref().unwrap_or(""),
                command.comando.as_str(),
            ]
            .join(" ")
            .to_lowercase();
            fields.contains(&normalized)
        })
        .cloned()
        .collect()
}

pub struct PlaybookScreen<G> {
    gateway: G,
    notifier: SharedNotifier,
    confirm: SharedConfirm,
    comandos: Vec<PlaybookCommand>,
    filtered: Vec<PlaybookCommand>,
    filter_term: String,
    loading: bool,
    saving: bool,
    form_mode: FormMode,
    editing: Option<PlaybookCommand>,
    form_visible: bool,
    pub form: PlaybookForm,
    touched: bool,
    invalid_fields: Vec<&'static str>,
    revision: Revision,
}

impl<G: Gateway> PlaybookScreen<G> {
    pub fn new(gateway: G, notifier: SharedNotifier, confirm: SharedConfirm) -> Self {
        Self {
            gateway,
            notifier,
            confirm,
            comandos: Vec::new(),
            filtered: Vec::new(),
            filter_term: String::new(),
            loading: false,
            saving: false,
            form_mode: FormMode::Create,
            editing: None,
            form_visible: false,
            form: PlaybookForm::default(),
            touched: false,
            invalid_fields: Vec::new(),
            revision: Revision::new(),
        }
    }

    pub async fn activate(&mut self) {
        self.load_commands().await;
    }

    /// Reloads the playbook; also resets the filter, as the original list
    /// did on every reload.
    pub async fn load_commands(&mut self) {
        self.loading = true;
        self.filter_term.clear();
        self.revision.bump();
        match self.gateway.list_playbook_commands().await {
            Ok(data) => {
                self.comandos = data;
                self.recompute();
            }
            Err(e) => {
                error!("Failed to load playbook commands: {e}");
                self.notifier
                    .notify("Não foi possível carregar a lista de comandos.");
            }
        }
        self.loading = false;
        self.revision.bump();
    }

    pub fn show_create_form(&mut self) {
        self.form_mode = FormMode::Create;
        self.editing = None;
        self.form = PlaybookForm::default();
        self.touched = false;
        self.invalid_fields.clear();
        self.form_visible = true;
        self.revision.bump();
    }

    pub fn start_edit(&mut self, command: PlaybookCommand) {
        self.form = PlaybookForm {
            titulo: command.titulo.clone(),
            descricao: command.descricao.clone().unwrap_or_default(),
            comando: command.comando.clone(),
        };
        self.form_mode = FormMode::Edit;
        self.editing = Some(command);
        self.touched = false;
        self.invalid_fields.clear();
        self.form_visible = true;
        self.revision.bump();
    }

    pub fn close_form(&mut self) {
        self.form_visible = false;
        self.form_mode = FormMode::Create;
        self.editing = None;
        self.form = PlaybookForm::default();
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
                error!("Failed to save playbook command: {e}");
                self.notifier.notify("Não foi possível salvar o comando.");
            }
        }

        self.saving = false;
        self.load_commands().await;
    }

    async fn submit_create(&mut self, payload: &PlaybookCommandInsert) -> Result<&'static str> {
        let created = self.gateway.create_playbook_command(payload).await?;
        self.comandos.insert(0, created);
        Ok("Comando adicionado ao playbook.")
    }

    async fn submit_edit(&mut self, payload: &PlaybookCommandInsert) -> Result<&'static str> {
        let editing_id = self
            .editing
            .as_ref()
            .map(|command| command.id)
            .ok_or(crate::errors::Error::NotFoundForUpdate("comando do playbook"))?;
        let update = PlaybookCommandUpdate {
            titulo: Some(payload.titulo.clone()),
            descricao: Some(payload.descricao.clone()),
            comando: Some(payload.comando.clone()),
        };
        let updated = self
            .gateway
            .update_playbook_command(editing_id, &update)
            .await?;
        if let Some(slot) = self.comandos.iter_mut().find(|c| c.id == updated.id) {
            *slot = updated;
        }
        Ok("Comando atualizado.")
    }

    pub async fn delete(&mut self, command: PlaybookCommand) {
        let confirmed = self.confirm.confirm(&format!(
            "Remover \"{}\" da lista? Essa ação não pode ser desfeita.",
            command.titulo
        ));
        if !confirmed {
            return;
        }

        match self.gateway.delete_playbook_command(command.id).await {
            Ok(()) => {
                self.comandos.retain(|c| c.id != command.id);
                self.recompute();
                self.notifier.notify("Comando removido do playbook.");
                self.revision.bump();
            }
            Err(e) => {
                error!("Failed to delete playbook command: {e}");
                self.notifier.notify("Não foi possível excluir o comando.");
            }
        }
    }

    fn recompute(&mut self) {
        self.filtered = filter_playbook(&self.comandos, &self.filter_term);
    }

    pub fn comandos(&self) -> &[PlaybookCommand] {
        &self.comandos
    }

    pub fn filtered(&self) -> &[PlaybookCommand] {
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

    pub fn editing(&self) -> Option<&PlaybookCommand> {
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

/// Dialog that dispatches a playbook entry as a realtime execution.
///
/// The task name is pre-filled from the entry's title and may be edited; the
/// command text is taken verbatim from the entry. When no client is selected
/// yet, the first client in list order is picked on load.
pub struct ExecutePlaybookDialog<G> {
    gateway: G,
    notifier: SharedNotifier,
    command: PlaybookCommand,
    clientes: Vec<Cliente>,
    selected_client: Option<String>,
    pub nome_tarefa: String,
    loading_clientes: bool,
    submitting: bool,
    completed: bool,
    touched: bool,
    invalid_fields: Vec<&'static str>,
}

impl<G: Gateway> ExecutePlaybookDialog<G> {
    pub fn new(gateway: G, notifier: SharedNotifier, command: PlaybookCommand) -> Self {
        let nome_tarefa = command.titulo.clone();
        Self {
            gateway,
            notifier,
            command,
            clientes: Vec::new(),
            selected_client: None,
            nome_tarefa,
            loading_clientes: false,
            submitting: false,
            completed: false,
            touched: false,
            invalid_fields: Vec::new(),
        }
    }

    pub async fn activate(&mut self) {
        self.loading_clientes = true;
        match self.gateway.list_clientes().await {
            Ok(data) => {
                self.clientes = data;
                if self.selected_client.is_none() {
                    self.selected_client = self.clientes.first().map(|c| c.client_id.clone());
                }
            }
            Err(e) => {
                error!("Failed to load clients for execution: {e}");
                self.notifier
                    .notify("Não foi possível carregar a lista de clientes.");
            }
        }
        self.loading_clientes = false;
    }

    pub fn select_client(&mut self, client_id: &str) {
        self.selected_client = Some(client_id.to_string());
    }

    pub async fn submit(&mut self) {
        let mut invalid = Vec::new();
        if self.selected_client.as_deref().unwrap_or("").is_empty() {
            invalid.push("client_id");
        }
        if self.nome_tarefa.trim().is_empty() {
            invalid.push("nome_tarefa");
        }
        if !invalid.is_empty() {
            self.touched = true;
            self.invalid_fields = invalid;
            return;
        }

        let payload = ExecucaoInsert {
            client_id: self.selected_client.clone().unwrap_or_default(),
            servidor_ip: None,
            nome_tarefa: self.nome_tarefa.trim().to_string(),
            comando: self.command.comando.clone(),
        };

        self.submitting = true;
        match self.gateway.inserir_execucao(&payload).await {
            Ok(_) => {
                self.completed = true;
                self.notifier.notify("Comando enviado para execução.");
            }
            Err(e) => {
                error!("Failed to dispatch playbook command: {e}");
                self.notifier.notify("Não foi possível enviar o comando.");
            }
        }
        self.submitting = false;
    }

    pub fn command(&self) -> &PlaybookCommand {
        &self.command
    }

    pub fn clientes(&self) -> &[Cliente] {
        &self.clientes
    }

    pub fn selected_client(&self) -> Option<&str> {
        self.selected_client.as_deref()
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn invalid_fields(&self) -> &[&'static str] {
        &self.invalid_fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{FakeGateway, RecordingNotifier, ScriptedConfirm};

    #[tokio::test]
    async fn test_create_and_edit_playbook_command() {
        let fake = FakeGateway::new();
        let mut screen = PlaybookScreen::new(
            fake.clone(),
            RecordingNotifier::new(),
            ScriptedConfirm::accepting(),
        );
        screen.activate().await;

        screen.show_create_form();
        screen.form.titulo = "Limpar temporários".to_string();
        screen.form.descricao = "  ".to_string();
        screen.form.comando = "rm -rf /tmp/backup-*".to_string();
        screen.submit().await;

        assert_eq!(screen.comandos().len(), 1);
        let created = screen.comandos()[0].clone();
        assert!(created.descricao.is_none());

        screen.start_edit(created.clone());
        screen.form.descricao = "remove staging antigo".to_string();
        screen.submit().await;

        let updated = screen
            .comandos()
            .iter()
            .find(|c| c.id == created.id)
            .unwrap();
        assert_eq!(updated.descricao.as_deref(), Some("remove staging antigo"));
    }

    #[tokio::test]
    async fn test_validation_requires_title_and_command() {
        let fake = FakeGateway::new();
        let mut screen = PlaybookScreen::new(
            fake.clone(),
            RecordingNotifier::new(),
            ScriptedConfirm::accepting(),
        );
        screen.activate().await;

        screen.show_create_form();
        let calls_before = fake.calls();
        screen.submit().await;

        assert_eq!(fake.calls(), calls_before);
        assert_eq!(screen.invalid_fields(), ["titulo", "comando"]);
    }

    #[tokio::test]
    async fn test_filter_covers_description_and_command_text() {
        let fake = FakeGateway::new();
        fake.seed_playbook("Espaço em disco", "df -h");
        fake.seed_playbook("Memória", "free -m");
        let mut screen = PlaybookScreen::new(
            fake.clone(),
            RecordingNotifier::new(),
            ScriptedConfirm::accepting(),
        );
        screen.activate().await;

        screen.set_filter("df -h");
        assert_eq!(screen.filtered().len(), 1);
        assert_eq!(screen.filtered()[0].titulo, "Espaço em disco");

        let once = screen.filtered().to_vec();
        assert_eq!(filter_playbook(&once, "df -h"), once);

        screen.set_filter("");
        assert_eq!(screen.filtered(), screen.comandos());
    }

    #[tokio::test]
    async fn test_reload_resets_filter() {
        let fake = FakeGateway::new();
        fake.seed_playbook("Espaço em disco", "df -h");
        fake.seed_playbook("Memória", "free -m");
        let mut screen = PlaybookScreen::new(
            fake.clone(),
            RecordingNotifier::new(),
            ScriptedConfirm::accepting(),
        );
        screen.activate().await;

        screen.set_filter("df");
        assert_eq!(screen.filtered().len(), 1);
        screen.load_commands().await;
        assert_eq!(screen.filtered().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_confirmed_removes_command() {
        let fake = FakeGateway::new();
        let command = fake.seed_playbook("Espaço em disco", "df -h");
        let mut screen = PlaybookScreen::new(
            fake.clone(),
            RecordingNotifier::new(),
            ScriptedConfirm::accepting(),
        );
        screen.activate().await;

        screen.delete(command).await;
        assert!(screen.comandos().is_empty());
    }

    #[tokio::test]
    async fn test_execute_dialog_prefills_task_and_first_client() {
        let fake = FakeGateway::new();
        fake.seed_cliente("acme", "Acme Corp", "11.222.333/0001-44");
        let command = fake.seed_playbook("Espaço em disco", "df -h");
        let notifier = RecordingNotifier::new();
        let mut dialog = ExecutePlaybookDialog::new(fake.clone(), notifier.clone(), command);
        dialog.activate().await;

        assert_eq!(dialog.nome_tarefa, "Espaço em disco");
        assert_eq!(dialog.selected_client(), Some("acme"));

        dialog.submit().await;
        assert!(dialog.completed());
        assert!(
            notifier
                .messages()
                .contains(&"Comando enviado para execução.".to_string())
        );

        // The inserted row carries the playbook's command text verbatim
        let history = crate::gateway::Gateway::list_execucoes_recentes(&fake, Some("acme"), 20)
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].comando, "df -h");
        assert_eq!(history[0].nome_tarefa, "Espaço em disco");
    }

    #[tokio::test]
    async fn test_execute_dialog_requires_client() {
        let fake = FakeGateway::new();
        let command = fake.seed_playbook("Espaço em disco", "df -h");
        let mut dialog =
            ExecutePlaybookDialog::new(fake.clone(), RecordingNotifier::new(), command);
        dialog.activate().await; // no clients exist

        let calls_before = fake.calls();
        dialog.submit().await;
        assert!(!dialog.completed());
        assert_eq!(dialog.invalid_fields(), ["client_id"]);
        assert_eq!(fake.calls(), calls_before);
    }
}
