//! Per-screen state containers.
//!
//! Each screen is an explicit state machine over
//! `{loading, list, form mode, editing target, form visibility}` plus its
//! own fields. Derived collections (filtered lists) are recomputed through a
//! pure function after every relevant mutation, and every state change bumps
//! a revision counter that dependent views can subscribe to - no implicit
//! dependency tracking anywhere.
//!
//! Failure handling is uniform: errors are caught at the screen boundary,
//! logged, and turned into a toast; local state stays untouched except the
//! loading/saving flags, which always reset.

pub mod agendamentos;
pub mod clientes;
pub mod execucao;
pub mod logs;
pub mod playbook;
pub mod servidores;

pub use agendamentos::AgendamentosScreen;
pub use clientes::ClientesScreen;
pub use execucao::ExecucaoScreen;
pub use logs::LogsScreen;
pub use playbook::{ExecutePlaybookDialog, PlaybookScreen};
pub use servidores::ServidoresScreen;

use std::sync::Arc;
use tokio::sync::watch;

/// Whether the entity form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

/// Short-lived user-facing notification (the toast of the original console).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Blocking yes/no confirmation gating destructive actions.
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

pub type SharedNotifier = Arc<dyn Notifier>;
pub type SharedConfirm = Arc<dyn ConfirmPrompt>;

/// Monotonic revision counter dependent views subscribe to.
pub struct Revision {
    tx: watch::Sender<u64>,
}

impl Default for Revision {
    fn default() -> Self {
        Self::new()
    }
}

impl Revision {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(0);
        Self { tx }
    }

    pub fn bump(&self) {
        self.tx.send_modify(|v| *v += 1);
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_revision_notifies_subscribers_on_bump() {
        let revision = Revision::new();
        let mut rx = revision.subscribe();
        assert_eq!(*rx.borrow(), 0);

        revision.bump();
        revision.bump();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 2);
    }
}
