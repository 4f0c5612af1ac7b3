//! # Congress App
//!
//! Client workflows wired over the API, the local store and RBAC.
//!
//! ## Components
//!
//! - `AppCore` - Entry point owning the client, store and resolver
//! - `AuthSession` - Login, logout and inactivity expiry
//! - `LocalNotificationStore` / `NotificationInbox` - Notifications
//! - `EventFilter` - Event catalog filtering

pub mod catalog;
mod error;
pub mod notifications;
pub mod session;

pub use catalog::EventFilter;
pub use error::{AppError, Result};
pub use notifications::{LocalNotificationStore, NotificationInbox};
pub use session::AuthSession;

use api::ApiClient;
use chrono::NaiveDate;
use rbac::{normalize_permissions, normalize_roles, AccessResolver, ResourcePermissionMap, RouteGuard};
use shared::{
    find_resource, resource_definitions, ClientConfig, CreateEventRequest, Event, EventDraft,
    Inscription, InscriptionQuery, Logger, OccupiedRange, Permission, RegistrationAction, Role,
    UnknownResourceError, UpdateEventRequest, ValidationError,
};
use std::sync::Arc;
use store::{FileStore, LocalStore};

/// Client core: one API client, one store, and the services built on them
pub struct AppCore {
    api: ApiClient,
    store: Arc<dyn LocalStore>,
    logger: Arc<dyn Logger>,
    session: AuthSession,
    resolver: AccessResolver,
    notifications: LocalNotificationStore,
}

impl AppCore {
    /// Wire the core over an existing store
    pub fn new(
        config: ClientConfig,
        store: Arc<dyn LocalStore>,
        logger: Arc<dyn Logger>,
    ) -> Result<Self> {
        let inactivity_limit = config.inactivity_limit();
        let api = ApiClient::new(config)?;
        let session = AuthSession::new(api.clone(), store.clone(), logger.clone(), inactivity_limit);
        let resolver = AccessResolver::new(store.clone(), Arc::new(api.clone()), logger.clone());
        let notifications = LocalNotificationStore::new(store.clone());

        Ok(Self {
            api,
            store,
            logger,
            session,
            resolver,
            notifications,
        })
    }

    /// Wire the core over the file store named by the configuration
    pub fn open(config: ClientConfig, logger: Arc<dyn Logger>) -> Result<Self> {
        let path = config.resolved_storage_path();
        let store = FileStore::open(&path)?;
        logger.debug(&format!("Using storage at {}", path.display()), None);
        Self::new(config, Arc::new(store), logger)
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn access(&self) -> &AccessResolver {
        &self.resolver
    }

    pub fn notifications(&self) -> &LocalNotificationStore {
        &self.notifications
    }

    pub fn store(&self) -> &dyn LocalStore {
        self.store.as_ref()
    }

    pub fn route_guard(&self) -> RouteGuard<'_> {
        RouteGuard::new(&self.resolver)
    }

    // ============== Access ==============

    pub async fn has_resource_access(&self, resource_key: &str) -> bool {
        self.resolver.has_resource_access(resource_key).await
    }

    pub fn resource_map(&self) -> ResourcePermissionMap {
        ResourcePermissionMap::load(self.store.as_ref())
    }

    /// Require `permission_id` for a known resource
    pub fn assign_resource(&self, resource_key: &str, permission_id: i64) -> Result<()> {
        if find_resource(resource_key).is_none() {
            return Err(UnknownResourceError {
                resource_key: resource_key.to_string(),
                known: resource_definitions().into_iter().map(|r| r.key).collect(),
            }
            .into());
        }
        if permission_id <= 0 {
            return Err(ValidationError::new("permission_id", "must be a positive ID").into());
        }

        let mut map = self.resource_map();
        map.assign(resource_key, permission_id);
        map.save(self.store.as_ref())?;
        self.logger.info(
            &format!("Resource '{}' now requires permission {}", resource_key, permission_id),
            None,
        );
        Ok(())
    }

    /// Remove a resource mapping; returns whether one existed
    pub fn unassign_resource(&self, resource_key: &str) -> Result<bool> {
        let mut map = self.resource_map();
        let removed = map.unassign(resource_key).is_some();
        if removed {
            map.save(self.store.as_ref())?;
        }
        Ok(removed)
    }

    // ============== Roles & Permissions ==============

    pub async fn list_roles(&self) -> Result<Vec<Role>> {
        let response = self.api.get_roles().await;
        if !response.is_success() {
            return Err(AppError::rejected(&response, "No se pudieron cargar los roles"));
        }
        Ok(normalize_roles(&response.data))
    }

    pub async fn list_permissions(&self) -> Result<Vec<Permission>> {
        let response = self.api.get_permissions().await;
        if !response.is_success() {
            return Err(AppError::rejected(&response, "No se pudieron cargar los permisos"));
        }
        Ok(normalize_permissions(&response.data))
    }

    /// Delete a permission and drop resource mappings that pointed at it
    pub async fn delete_permission(&self, permission_id: i64) -> Result<()> {
        let response = self.api.delete_permission(permission_id).await;
        if !response.is_success() {
            return Err(AppError::rejected(&response, "No se pudo eliminar el permiso"));
        }

        let mut map = self.resource_map();
        if map.forget_permission(permission_id) {
            map.save(self.store.as_ref())?;
        }
        Ok(())
    }

    // ============== Events ==============

    pub async fn load_events(&self) -> Result<Vec<Event>> {
        let response = self.api.get_events().await;
        if !response.is_success() {
            return Err(AppError::rejected(&response, "No se pudieron cargar los eventos"));
        }
        response
            .json()
            .ok_or_else(|| AppError::InvalidResponse("events are not a list".into()))
    }

    /// Current and future events passing `filter`
    pub async fn catalog(&self, filter: &EventFilter, today: NaiveDate) -> Result<Vec<Event>> {
        let events = self.load_events().await?;
        Ok(filter.apply(&events, today).into_iter().cloned().collect())
    }

    /// Date ranges already taken; an unusable answer means none
    pub async fn occupied_ranges(&self) -> Vec<OccupiedRange> {
        let response = self.api.get_occupied_dates().await;
        if !response.is_success() {
            return Vec::new();
        }
        response.json().unwrap_or_default()
    }

    /// Validate a draft against taken dates and create the event
    pub async fn create_event(&self, draft: EventDraft) -> Result<serde_json::Value> {
        let (start, end) = (draft.start, draft.end);
        let request = draft.into_request()?;

        let taken = self.occupied_ranges().await;
        let mut day = start;
        while day <= end {
            if taken.iter().any(|range| range.contains(day)) {
                return Err(ValidationError::new(
                    "fecha_inicio",
                    format!("{} is already taken by another event", day),
                )
                .into());
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }

        self.submit_event(request).await
    }

    async fn submit_event(&self, request: CreateEventRequest) -> Result<serde_json::Value> {
        let response = self.api.create_event(&request).await;
        if !response.is_success() {
            return Err(AppError::rejected(&response, "No se pudo crear el evento"));
        }
        Ok(response.data)
    }

    pub async fn update_event(&self, event_id: i64, draft: EventDraft) -> Result<()> {
        let request = UpdateEventRequest {
            id_evento: event_id,
            fields: draft.into_request()?,
        };
        let response = self.api.update_event(&request).await;
        if !response.is_success() {
            return Err(AppError::rejected(&response, "No se pudo actualizar el evento"));
        }
        Ok(())
    }

    pub async fn set_registrations(&self, event_id: i64, action: RegistrationAction) -> Result<()> {
        let response = self.api.patch_inscription_date(event_id, action).await;
        if !response.is_success() {
            return Err(AppError::rejected(&response, "No se pudo actualizar la inscripción"));
        }
        Ok(())
    }

    pub async fn delete_event(&self, event_id: i64) -> Result<()> {
        let response = self.api.delete_event(event_id).await;
        if !response.is_success() {
            return Err(AppError::rejected(&response, "No se pudo eliminar el evento"));
        }
        Ok(())
    }

    // ============== Inscriptions ==============

    /// Inscriptions of the logged-in user
    pub async fn my_inscriptions(&self) -> Result<Vec<Inscription>> {
        let user = self.session.require_user()?;
        let query = InscriptionQuery {
            usuario_id: Some(user.id),
            ..Default::default()
        };

        let response = self.api.get_inscriptions(&query).await;
        if !response.is_success() {
            return Err(AppError::rejected(&response, "No se pudieron cargar las inscripciones"));
        }
        response
            .json()
            .ok_or_else(|| AppError::InvalidResponse("inscriptions are not a list".into()))
    }
}
