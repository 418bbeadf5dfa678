use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

// "clientes" table
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Cliente {
    pub id: i64, // Primary key, surrogate
    pub client_id: String, // Stable external key, unique
    pub nome_empresa: String,
    pub cnpj_empresa: String, // Formatted NN.NNN.NNN/NNNN-NN or empty
    // Rows created before the column existed deserialize as active
    #[serde(default = "default_true")]
    pub ativo: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ClienteInsert {
    pub client_id: String,
    pub nome_empresa: String,
    pub cnpj_empresa: String,
    pub ativo: bool,
}

// The backend update contract accepts partial payloads; screens always send
// every field.
#[derive(Debug, Serialize, Clone, Default)]
pub struct ClienteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome_empresa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnpj_empresa: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ativo: Option<bool>,
}

// "servidores" table
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Servidor {
    pub id: i64,
    pub cliente_id: i64, // FK to clientes.id
    pub nome: String,
    pub endereco_ip: String,
    pub sistema_operacional: Option<String>,
    pub status: i32, // 0=unknown, 1=online, 2=offline, 3=error
    pub uptime_inicio: Option<DateTime<Utc>>,
    pub mensagem_erro: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ServidorInsert {
    pub cliente_id: i64,
    pub nome: String,
    pub endereco_ip: String,
    pub sistema_operacional: Option<String>,
    pub status: i32,
    pub uptime_inicio: Option<DateTime<Utc>>,
    pub mensagem_erro: Option<String>,
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct ServidorUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endereco_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sistema_operacional: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime_inicio: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mensagem_erro: Option<Option<String>>,
}

// "agendamentos" table - recurring rclone jobs dispatched by external agents
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Agendamento {
    pub id: i64,
    pub client_id: String, // FK to clientes.client_id
    pub schedule_name: String,
    pub rclone_command: String, // Free text, never validated here
    pub cron_expression: String, // Free text, never validated here
    pub is_active: bool,
    pub remote_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
pub struct AgendamentoInsert {
    pub client_id: String,
    pub schedule_name: String,
    pub rclone_command: String,
    pub cron_expression: String,
    pub is_active: bool,
    pub remote_path: Option<String>,
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct AgendamentoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rclone_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_path: Option<Option<String>>,
}

// "execucoes_realtime" table - insert-only from this application; external
// agents poll it and carry out the dispatch
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ExecucaoRealtime {
    pub id: i64,
    pub client_id: String,
    pub servidor_ip: Option<String>,
    pub nome_tarefa: String,
    pub comando: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
pub struct ExecucaoInsert {
    pub client_id: String,
    pub servidor_ip: Option<String>,
    pub nome_tarefa: String,
    pub comando: String,
}

// "playbook_comandos" table - reusable command templates, not tied to a client
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlaybookCommand {
    pub id: i64,
    pub titulo: String,
    pub descricao: Option<String>,
    pub comando: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
pub struct PlaybookCommandInsert {
    pub titulo: String,
    pub descricao: Option<String>,
    pub comando: String,
}

#[derive(Debug, Serialize, Clone, Default)]
pub struct PlaybookCommandUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comando: Option<String>,
}

// "backup_logs" table - read-only here, written by the agents
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BackupLog {
    pub id: i64,
    pub client_id: String,
    pub file_name: String,
    pub file_size_bytes: i64,
    pub file_creation_date: DateTime<Utc>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One slice of a range-paginated listing plus the backend's exact count.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total: u64,
}

/// Authenticated user as reported by the identity provider.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

/// Tokens plus user returned by a successful password-grant sign-in.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user: AuthUser,
}
