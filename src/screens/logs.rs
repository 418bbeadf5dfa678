//! Read-only, paginated view over the backup logs.

use crate::format::truncate_error_message;
use crate::gateway::Gateway;
use crate::models::{BackupLog, Cliente};
use crate::screens::{Revision, SharedNotifier};
use tokio::sync::watch;
use tracing::error;

pub const PAGE_SIZE_OPTIONS: [usize; 3] = [10, 20, 50];

pub struct LogsScreen<G> {
    gateway: G,
    notifier: SharedNotifier,
    logs: Vec<BackupLog>,
    clientes: Vec<Cliente>,
    loading: bool,
    filter_term: String,
    page_index: usize,
    page_size: usize,
    total: u64,
    expanded_log_id: Option<i64>,
    revision: Revision,
}

impl<G: Gateway> LogsScreen<G> {
    pub fn new(gateway: G, notifier: SharedNotifier) -> Self {
        Self {
            gateway,
            notifier,
            logs: Vec::new(),
            clientes: Vec::new(),
            loading: false,
            filter_term: String::new(),
            page_index: 0,
            page_size: PAGE_SIZE_OPTIONS[0],
            total: 0,
            expanded_log_id: None,
            revision: Revision::new(),
        }
    }

    pub async fn activate(&mut self) {
        self.load_clientes().await;
        self.load_logs().await;
    }

    async fn load_clientes(&mut self) {
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

    pub async fn load_logs(&mut self) {
        self.loading = true;
        self.revision.bump();
        match self
            .gateway
            .list_backup_logs_global(self.page_index, self.page_size, &self.filter_term)
            .await
        {
            Ok(page) => {
                self.logs = page.rows;
                self.total = page.total;
            }
            Err(e) => {
                error!("Failed to load backup logs: {e}");
                self.notifier.notify("Não foi possível carregar os logs.");
            }
        }
        self.loading = false;
        self.revision.bump();
    }

    /// Changing the filter always starts over from the first page.
    pub async fn set_filter(&mut self, term: &str) {
        self.filter_term = term.to_string();
        self.page_index = 0;
        self.revision.bump();
        self.load_logs().await;
    }

    /// Applies a pagination event (new page index and size) and reloads.
    pub async fn handle_page(&mut self, page_index: usize, page_size: usize) {
        self.page_index = page_index;
        self.page_size = page_size;
        self.revision.bump();
        self.load_logs().await;
    }

    /// Expands one row's full error message, or collapses it when it is the
    /// one already expanded. Only a single row is expanded at a time.
    pub fn toggle_expansion(&mut self, log_id: i64) {
        self.expanded_log_id = if self.expanded_log_id == Some(log_id) {
            None
        } else {
            Some(log_id)
        };
        self.revision.bump();
    }

    pub fn is_expanded(&self, log_id: i64) -> bool {
        self.expanded_log_id == Some(log_id)
    }

    /// Error message as shown in the table row.
    pub fn error_preview(&self, log: &BackupLog) -> String {
        if self.is_expanded(log.id) {
            log.error_message.clone().unwrap_or_else(|| "—".to_string())
        } else {
            truncate_error_message(log.error_message.as_deref())
        }
    }

    /// Display name of the owning client, falling back to the raw key.
    pub fn client_name(&self, client_id: &str) -> String {
        self.clientes
            .iter()
            .find(|c| c.client_id == client_id)
            .map_or_else(|| client_id.to_string(), |c| c.nome_empresa.clone())
    }

    pub fn logs(&self) -> &[BackupLog] {
        &self.logs
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn filter_term(&self) -> &str {
        &self.filter_term
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}
