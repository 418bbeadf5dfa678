//! CLI command handlers.
//!
//! Thin glue between the parsed command line and the screen containers in
//! the library: no business logic lives here.

pub mod agendamentos;
pub mod auth;
pub mod clientes;
pub mod execucao;
pub mod logs;
pub mod playbook;
pub mod servidores;

use backup_console::screens::{ConfirmPrompt, Notifier, SharedConfirm, SharedNotifier};
use std::io::{self, Write};
use std::sync::Arc;

/// Prints toasts to stdout, playing the snackbar's role.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("{message}");
    }
}

/// Blocking yes/no prompt on stdin for destructive actions.
pub struct StdinConfirm;

impl ConfirmPrompt for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        print!("{message} [s/N] ");
        let _ = io::stdout().flush();
        let mut answer = String::new();
        if io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(
            answer.trim().to_lowercase().as_str(),
            "s" | "sim" | "y" | "yes"
        )
    }
}

pub fn console_notifier() -> SharedNotifier {
    Arc::new(ConsoleNotifier)
}

pub fn stdin_confirm() -> SharedConfirm {
    Arc::new(StdinConfirm)
}

/// Echoes local validation failures back to the operator.
pub fn report_validation(touched: bool, fields: &[&str]) {
    if touched && !fields.is_empty() {
        eprintln!("Campos inválidos: {}", fields.join(", "));
    }
}
