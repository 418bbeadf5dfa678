use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "backup-console", about = "Console administrativo de backups")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Autentica no backend e persiste a sessão
    Login { email: String },
    /// Encerra a sessão atual
    Logout,
    /// Cadastro de clientes
    Clientes {
        #[command(subcommand)]
        action: ClienteAction,
    },
    /// Cadastro de servidores
    Servidores {
        #[command(subcommand)]
        action: ServidorAction,
    },
    /// Agendamentos de sincronização
    Agendamentos {
        #[command(subcommand)]
        action: AgendamentoAction,
    },
    /// Playbook de comandos reutilizáveis
    Playbook {
        #[command(subcommand)]
        action: PlaybookAction,
    },
    /// Execução imediata de comandos
    Exec {
        #[command(subcommand)]
        action: ExecAction,
    },
    /// Logs de backup
    Logs(LogsArgs),
}

#[derive(Debug, Subcommand)]
pub enum ClienteAction {
    /// Lista os clientes cadastrados
    List {
        #[arg(long)]
        filtro: Option<String>,
    },
    /// Cadastra um novo cliente
    Create {
        client_id: String,
        nome: String,
        cnpj: String,
        #[arg(long)]
        inativo: bool,
    },
    /// Edita um cliente existente
    Edit {
        id: i64,
        #[arg(long)]
        client_id: Option<String>,
        #[arg(long)]
        nome: Option<String>,
        #[arg(long)]
        cnpj: Option<String>,
        #[arg(long)]
        ativo: Option<bool>,
    },
    /// Exclui um cliente (pede confirmação)
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum ServidorAction {
    /// Lista os servidores cadastrados
    List,
    /// Cadastra um novo servidor
    Create {
        #[arg(long)]
        cliente_id: i64,
        nome: String,
        ip: String,
        #[arg(long)]
        so: Option<String>,
        #[arg(long, default_value_t = 0)]
        status: i32,
    },
    /// Edita um servidor existente
    Edit {
        id: i64,
        #[arg(long)]
        cliente_id: Option<i64>,
        #[arg(long)]
        nome: Option<String>,
        #[arg(long)]
        ip: Option<String>,
        #[arg(long)]
        so: Option<String>,
        #[arg(long)]
        status: Option<i32>,
        #[arg(long)]
        mensagem_erro: Option<String>,
    },
    /// Exclui um servidor (pede confirmação)
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum AgendamentoAction {
    /// Lista os agendamentos
    List {
        #[arg(long)]
        filtro: Option<String>,
    },
    /// Cria um novo agendamento
    Create {
        #[arg(long)]
        cliente: String,
        nome: String,
        comando: String,
        cron: String,
        #[arg(long)]
        remote_path: Option<String>,
        #[arg(long)]
        inativo: bool,
    },
    /// Edita um agendamento existente
    Edit {
        id: i64,
        #[arg(long)]
        cliente: Option<String>,
        #[arg(long)]
        nome: Option<String>,
        #[arg(long)]
        comando: Option<String>,
        #[arg(long)]
        cron: Option<String>,
        #[arg(long)]
        remote_path: Option<String>,
        #[arg(long)]
        ativo: Option<bool>,
    },
    /// Exclui um agendamento (pede confirmação)
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum PlaybookAction {
    /// Lista os comandos do playbook
    List {
        #[arg(long)]
        filtro: Option<String>,
    },
    /// Adiciona um comando ao playbook
    Create {
        titulo: String,
        comando: String,
        #[arg(long)]
        descricao: Option<String>,
    },
    /// Edita um comando do playbook
    Edit {
        id: i64,
        #[arg(long)]
        titulo: Option<String>,
        #[arg(long)]
        comando: Option<String>,
        #[arg(long)]
        descricao: Option<String>,
    },
    /// Exclui um comando do playbook (pede confirmação)
    Delete { id: i64 },
    /// Envia um comando do playbook para execução
    Exec {
        id: i64,
        #[arg(long)]
        cliente: Option<String>,
        #[arg(long)]
        tarefa: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ExecAction {
    /// Envia um comando para execução imediata
    Run {
        tarefa: String,
        comando: String,
        #[arg(long)]
        cliente: Option<String>,
        #[arg(long)]
        servidor: Option<String>,
    },
    /// Mostra o histórico recente de execuções
    Historico {
        #[arg(long)]
        cliente: Option<String>,
    },
}

#[derive(Debug, clap::Args)]
pub struct LogsArgs {
    #[arg(long, default_value_t = 0)]
    pub pagina: usize,
    #[arg(long, default_value_t = 10)]
    pub tamanho: usize,
    #[arg(long)]
    pub filtro: Option<String>,
    /// Restringe a um cliente específico (client_id)
    #[arg(long)]
    pub cliente: Option<String>,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
