//! Local notification log and the server notification inbox

use crate::error::{AppError, Result};
use api::ApiClient;
use chrono::{SecondsFormat, Utc};
use shared::{LocalNotification, ServerNotification};
use std::sync::Arc;
use store::{keys, LocalStore, StoreResult};
use uuid::Uuid;

/// Most local notifications kept; older ones are dropped
pub const MAX_LOCAL_NOTIFICATIONS: usize = 50;

const SYNC_FAILED: &str = "No se pudieron cargar las notificaciones";
const MARK_FAILED: &str = "No se pudo marcar la notificación";

/// Notifications generated on this client, kept under `app-notifications`
pub struct LocalNotificationStore {
    store: Arc<dyn LocalStore>,
}

impl LocalNotificationStore {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    /// Every stored notification, newest first; unreadable storage is empty
    pub fn all(&self) -> Vec<LocalNotification> {
        keys::read_json(self.store.as_ref(), keys::APP_NOTIFICATIONS).unwrap_or_default()
    }

    pub fn for_user(&self, user_id: i64) -> Vec<LocalNotification> {
        self.all()
            .into_iter()
            .filter(|item| item.user_id == user_id)
            .collect()
    }

    /// Prepend an unread notification for `user_id`
    pub fn add(&self, user_id: i64, message: impl Into<String>) -> StoreResult<LocalNotification> {
        let item = LocalNotification {
            id: Uuid::new_v4().to_string(),
            user_id,
            message: message.into(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            read: false,
        };

        let mut items = self.all();
        items.insert(0, item.clone());
        items.truncate(MAX_LOCAL_NOTIFICATIONS);
        self.save(&items)?;
        Ok(item)
    }

    /// Mark every notification of `user_id` as read; others stay untouched
    pub fn mark_all_read(&self, user_id: i64) -> StoreResult<()> {
        let items: Vec<LocalNotification> = self
            .all()
            .into_iter()
            .map(|mut item| {
                if item.user_id == user_id {
                    item.read = true;
                }
                item
            })
            .collect();
        self.save(&items)
    }

    pub fn unread_count(&self, user_id: i64) -> usize {
        self.for_user(user_id).iter().filter(|item| !item.read).count()
    }

    fn save(&self, items: &[LocalNotification]) -> StoreResult<()> {
        keys::write_json(self.store.as_ref(), keys::APP_NOTIFICATIONS, items)
    }
}

/// In-memory view of the user's server notifications
#[derive(Debug, Clone, Default)]
pub struct NotificationInbox {
    items: Vec<ServerNotification>,
}

impl NotificationInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list
    pub fn refresh(&mut self, items: Vec<ServerNotification>) {
        self.items = items;
    }

    /// Mark one notification read locally; unknown IDs are ignored
    pub fn mark_as_read(&mut self, id: i64) {
        for item in self.items.iter_mut().filter(|n| n.id_notificacion == id) {
            item.leida = true;
        }
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.leida).count()
    }

    pub fn items(&self) -> &[ServerNotification] {
        &self.items
    }

    /// Reload from `GET /api/notificaciones`; returns the unread count
    pub async fn sync(&mut self, api: &ApiClient, user_id: i64) -> Result<usize> {
        let response = api.fetch_notifications(user_id).await;
        if !response.is_success() {
            return Err(AppError::rejected(&response, SYNC_FAILED));
        }

        let items = response
            .json::<Vec<ServerNotification>>()
            .ok_or_else(|| AppError::InvalidResponse("notifications are not a list".into()))?;
        self.refresh(items);
        Ok(self.unread_count())
    }

    /// Mark read on the server, then locally
    pub async fn mark_read_remote(&mut self, api: &ApiClient, id: i64) -> Result<()> {
        let response = api.mark_notification_as_read(id).await;
        if !response.is_success() {
            return Err(AppError::rejected(&response, MARK_FAILED));
        }
        self.mark_as_read(id);
        Ok(())
    }
}
