use crate::api::UsersApi;
use crate::notify::NotificationBus;
use crate::state::{Action, DashboardState, OpKind, OpStatus, PendingKey};
use crate::{DraftForm, Field, UserRecord};
use tokio::sync::Mutex;

pub use crate::state::ControllerError;

/// Owns the user list and the form draft, and keeps them in step with the
/// remote collection. Local state only changes once the service has answered.
///
/// The state lock is held for single transitions, never across a request, so
/// operations on different records run concurrently.
pub struct UserListController<A> {
    api: A,
    state: Mutex<DashboardState>,
    notifications: NotificationBus,
}

impl<A: UsersApi> UserListController<A> {
    pub fn new(api: A, notifications: NotificationBus) -> Self {
        Self {
            api,
            state: Mutex::new(DashboardState::new()),
            notifications,
        }
    }

    pub fn notifications(&self) -> &NotificationBus {
        &self.notifications
    }

    pub async fn users(&self) -> Vec<UserRecord> {
        self.state.lock().await.users().to_vec()
    }

    pub async fn draft(&self) -> DraftForm {
        self.state.lock().await.draft().clone()
    }

    pub async fn find(&self, id: u64) -> Option<UserRecord> {
        self.state.lock().await.find(id).cloned()
    }

    pub async fn pending(&self) -> Vec<(PendingKey, OpKind)> {
        self.state.lock().await.pending()
    }

    pub async fn set_field(&self, field: Field, value: impl Into<String>) {
        self.dispatch(Action::FieldChanged(field, value.into())).await;
    }

    /// Loads the record into the draft and switches to edit mode. Unsaved
    /// draft content is discarded.
    pub async fn edit(&self, record: &UserRecord) {
        log::debug!("editing user {}", record.id);
        self.dispatch(Action::EditRequested(record.clone())).await;
    }

    /// Fetches the collection once.
    pub async fn mount(&self) -> Result<OpStatus, ControllerError> {
        self.state
            .lock()
            .await
            .begin(PendingKey::Collection, OpKind::Fetch)?;
        log::debug!("fetching users");

        match self.api.list_users().await {
            Ok(remote) => {
                log::info!("loaded {} users", remote.len());
                self.dispatch(Action::FetchSucceeded(remote)).await;
                Ok(OpStatus::Committed)
            }
            Err(e) => {
                log::warn!("fetching users failed: {}", e);
                self.dispatch(Action::FetchFailed).await;
                Ok(OpStatus::Failed {
                    error: e.to_string(),
                })
            }
        }
    }

    /// Sends the draft: an update when editing an existing record, a create
    /// otherwise. Required fields are the input layer's concern.
    pub async fn submit(&self) -> Result<OpStatus, ControllerError> {
        let draft = {
            let mut state = self.state.lock().await;
            let draft = state.draft().clone();
            let (key, kind) = match (draft.is_editing, draft.id) {
                (true, Some(id)) => (PendingKey::Record(id), OpKind::Update),
                _ => (PendingKey::NewRecord, OpKind::Create),
            };
            state.begin(key, kind)?;
            draft
        };

        match draft.to_record().filter(|_| draft.is_editing) {
            Some(record) => self.update(record).await,
            None => self.create(&draft).await,
        }
    }

    async fn create(&self, draft: &DraftForm) -> Result<OpStatus, ControllerError> {
        let user = draft.to_new_user();
        log::debug!("creating user {} {}", user.first_name, user.last_name);

        match self.api.create_user(&user).await {
            Ok(created) => {
                log::info!("created user {}", created.id);
                self.dispatch(Action::CreateSucceeded {
                    user,
                    id: created.id,
                })
                .await;
                Ok(OpStatus::Committed)
            }
            Err(e) => {
                log::warn!("creating user failed: {}", e);
                self.dispatch(Action::CreateFailed).await;
                Ok(OpStatus::Failed {
                    error: e.to_string(),
                })
            }
        }
    }

    async fn update(&self, record: UserRecord) -> Result<OpStatus, ControllerError> {
        let id = record.id;
        log::debug!("updating user {}", id);

        match self.api.update_user(&record).await {
            Ok(()) => {
                log::info!("updated user {}", id);
                self.dispatch(Action::UpdateSucceeded(record)).await;
                Ok(OpStatus::Committed)
            }
            Err(e) => {
                log::warn!("updating user {} failed: {}", id, e);
                self.dispatch(Action::UpdateFailed { id }).await;
                Ok(OpStatus::Failed {
                    error: e.to_string(),
                })
            }
        }
    }

    pub async fn delete(&self, id: u64) -> Result<OpStatus, ControllerError> {
        self.state
            .lock()
            .await
            .begin(PendingKey::Record(id), OpKind::Delete)?;
        log::debug!("deleting user {}", id);

        match self.api.delete_user(id).await {
            Ok(()) => {
                log::info!("deleted user {}", id);
                self.dispatch(Action::DeleteSucceeded { id }).await;
                Ok(OpStatus::Committed)
            }
            Err(e) => {
                log::warn!("deleting user {} failed: {}", id, e);
                self.dispatch(Action::DeleteFailed { id }).await;
                Ok(OpStatus::Failed {
                    error: e.to_string(),
                })
            }
        }
    }

    async fn dispatch(&self, action: Action) {
        let notification = self.state.lock().await.apply(action);
        if let Some(notification) = notification {
            self.notifications.publish(notification);
        }
    }
}
