//! # Sync Commands
//!
//! Connectivity toggle and the offline action queue.
//!
//! ## Reconnect Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  set_offline(false)                                                     │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  go_online()  ── "Conexão restaurada"                                   │
//! │        │                                                                │
//! │        ├── queue empty or auto sync disabled ──► done                   │
//! │        │                                                                │
//! │        └── pending actions ──► sync_now()                               │
//! │                                   │                                     │
//! │                                   ├── Ok  ──► queue cleared             │
//! │                                   └── Err ──► queue kept, notice shown  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use estoque_core::PendingAction;
use estoque_sync::{SyncReport, SyncStatus, SyncTransport};
use tracing::{debug, warn};

use crate::error::ApiResult;
use crate::state::Session;

pub fn get_sync_status<T: SyncTransport>(session: &Session<T>) -> SyncStatus {
    debug!("get_sync_status command");
    session.sync.status()
}

/// Actions waiting for a connection, oldest first.
pub fn pending_actions<T: SyncTransport>(session: &Session<T>) -> Vec<PendingAction> {
    debug!("pending_actions command");
    session.sync.queue().actions().to_vec()
}

/// Switches offline mode on or off.
///
/// Going back online with pending actions syncs right away when
/// `sync.auto_sync_on_reconnect` is set. A failed automatic sync is reported
/// through the notifier and leaves the queue in place; the command itself
/// still succeeds since the connectivity change went through.
pub async fn set_offline<T: SyncTransport>(session: &mut Session<T>, offline: bool) -> ApiResult<SyncStatus> {
    debug!(offline, "set_offline command");

    if offline {
        session.sync.go_offline();
        return Ok(session.sync.status());
    }

    if session.sync.go_online() && session.sync.should_auto_sync() {
        if let Err(err) = session.sync.sync().await {
            warn!(error = %err, "Automatic sync after reconnect failed");
        }
    }
    Ok(session.sync.status())
}

/// Pushes every pending action now.
///
/// ## Errors
/// - `SyncError` when offline or when the backend fails; the queue is kept
pub async fn sync_now<T: SyncTransport>(session: &mut Session<T>) -> ApiResult<SyncReport> {
    debug!(pending = session.sync.pending_count(), "sync_now command");
    Ok(session.sync.sync().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::restock::{create_list, select_product};
    use crate::config::AppConfig;
    use crate::error::ErrorCode;
    use crate::notify::RecordingNotifier;
    use crate::seed::seeded_session;
    use estoque_sync::Connectivity;
    use std::sync::Arc;

    fn offline_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.sync.start_offline = true;
        config
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_while_offline_keeps_queue() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut session = seeded_session(offline_config(), notifier.clone());

        select_product(&mut session, "2", true, 2).unwrap();
        create_list(&mut session, "").unwrap();
        assert_eq!(pending_actions(&session).len(), 1);

        let err = sync_now(&mut session).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SyncError);
        assert_eq!(get_sync_status(&session).pending_count, 1);
        assert_eq!(notifier.last().unwrap().title, "Erro ao sincronizar dados");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconnect_auto_syncs() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut session = seeded_session(offline_config(), notifier.clone());

        select_product(&mut session, "2", true, 2).unwrap();
        create_list(&mut session, "").unwrap();

        let status = set_offline(&mut session, false).await.unwrap();
        assert_eq!(status.connectivity, Connectivity::Online);
        assert_eq!(status.pending_count, 0);
        assert!(status.last_synced_at.is_some());
        assert!(notifier
            .titles()
            .contains(&"Dados sincronizados com sucesso".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconnect_without_auto_sync() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut config = offline_config();
        config.sync.auto_sync_on_reconnect = false;
        let mut session = seeded_session(config, notifier);

        select_product(&mut session, "2", true, 2).unwrap();
        create_list(&mut session, "").unwrap();

        let status = set_offline(&mut session, false).await.unwrap();
        assert_eq!(status.pending_count, 1);

        let report = sync_now(&mut session).await.unwrap();
        assert_eq!(report.synced, 1);
        assert!(pending_actions(&session).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_sync_is_silent() {
        let notifier = Arc::new(RecordingNotifier::new());
        let mut session = seeded_session(AppConfig::default(), notifier.clone());

        let report = sync_now(&mut session).await.unwrap();
        assert_eq!(report.synced, 0);
        assert!(notifier.notices().is_empty());
    }
}
