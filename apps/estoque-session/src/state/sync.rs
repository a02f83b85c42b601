//! # Sync State
//!
//! Bridges sync engine events to the toast surface.
//!
//! ## Event Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SyncEventEmitter            Notice                                     │
//! │  ────────────────            ──────                                     │
//! │  status (syncing)      ──►   "Sincronizando dados..."                   │
//! │  progress (n synced)   ──►   "Dados sincronizados com sucesso"          │
//! │  error                 ──►   "Erro ao sincronizar dados"                │
//! │  connectivity online   ──►   "Conexão restaurada"                       │
//! │  connectivity offline  ──►   "Modo offline ativado"                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use estoque_sync::{Connectivity, SyncEngine, SyncEventEmitter, SyncSettings, SyncStatus, SyncTransport};
use tracing::debug;

use crate::notify::{Notice, Notifier};

/// Turns sync events into notices.
pub struct NotifierEmitter {
    notifier: Arc<dyn Notifier>,
}

impl NotifierEmitter {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        NotifierEmitter { notifier }
    }
}

impl SyncEventEmitter for NotifierEmitter {
    fn emit_status(&self, status: &SyncStatus) {
        debug!(syncing = status.is_syncing, pending = status.pending_count, "sync status");
        if status.is_syncing {
            self.notifier.notify(Notice::info("Sincronizando dados..."));
        }
    }

    fn emit_progress(&self, _pending: usize, synced: usize) {
        self.notifier.notify(
            Notice::success("Dados sincronizados com sucesso")
                .with_description(format!("{} operações sincronizadas", synced)),
        );
    }

    fn emit_error(&self, message: &str, retryable: bool) {
        debug!(%message, retryable, "sync error");
        self.notifier.notify(
            Notice::destructive("Erro ao sincronizar dados")
                .with_description("Tente novamente mais tarde"),
        );
    }

    fn emit_connectivity(&self, connectivity: Connectivity) {
        let notice = match connectivity {
            Connectivity::Online => Notice::info("Conexão restaurada"),
            Connectivity::Offline => Notice::info("Modo offline ativado"),
        };
        self.notifier.notify(notice);
    }
}

/// Builds a sync engine whose events reach `notifier`.
pub(crate) fn engine_with_notifier<T: SyncTransport>(
    settings: &SyncSettings,
    transport: T,
    notifier: Arc<dyn Notifier>,
) -> SyncEngine<T> {
    SyncEngine::with_transport(settings, transport)
        .with_emitter(Arc::new(NotifierEmitter::new(notifier)))
}
