// SPDX-FileCopyrightText: 2026 Chatdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup sequence: health probe, then background sync.

use std::sync::Arc;

use chatdesk_config::model::SyncConfig;
use chatdesk_core::{BackendAdapter, SyncResult};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::health::check_health;
use crate::store::MessageStore;
use crate::sync::spawn_background_sync;

/// What one boot run found.
#[derive(Debug)]
pub struct BootReport {
    pub healthy: bool,
    /// The detached sync task, when one was started.
    pub sync: Option<JoinHandle<SyncResult>>,
}

/// Runs the health probe and, when healthy, starts a background sync.
pub struct BootSequence {
    backend: Arc<dyn BackendAdapter>,
    sync_enabled: bool,
}

impl BootSequence {
    pub fn new(backend: Arc<dyn BackendAdapter>, config: &SyncConfig) -> Self {
        Self {
            backend,
            sync_enabled: config.enabled,
        }
    }

    /// Probes the backend. The sync is never awaited here.
    pub async fn run(&self) -> BootReport {
        let healthy = check_health(self.backend.as_ref()).await;

        let sync = if !healthy {
            info!("backend unavailable, skipping conversation sync");
            None
        } else if !self.sync_enabled {
            debug!("conversation sync disabled by configuration");
            None
        } else {
            Some(spawn_background_sync(Arc::clone(&self.backend)))
        };

        BootReport { healthy, sync }
    }

    /// Restarts the session: clears the store, then boots again.
    pub async fn reload(&self, store: &MessageStore) -> BootReport {
        info!("reloading session");
        store.reset_messages();
        self.run().await
    }
}
