use crate::notify::Notification;
use crate::{DraftForm, Field, NewUser, RemoteUser, UserRecord};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// What a pending request is about. Two requests with the same key never run
/// at the same time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PendingKey {
    Collection,
    NewRecord,
    Record(u64),
}

impl fmt::Display for PendingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingKey::Collection => f.write_str("user list"),
            PendingKey::NewRecord => f.write_str("new user"),
            PendingKey::Record(id) => write!(f, "user {}", id),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpKind {
    Fetch,
    Create,
    Update,
    Delete,
}

// Lifecycle of one remote operation: Pending, then Committed or Failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpStatus {
    Pending,
    Committed,
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("a {kind:?} request for {key} is still in flight")]
    InFlight { key: PendingKey, kind: OpKind },
    #[error("user list was already loaded")]
    AlreadyMounted,
}

/// Transitions accepted by [`DashboardState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    FieldChanged(Field, String),
    EditRequested(UserRecord),
    FetchSucceeded(Vec<RemoteUser>),
    FetchFailed,
    CreateSucceeded { user: NewUser, id: u64 },
    CreateFailed,
    UpdateSucceeded(UserRecord),
    UpdateFailed { id: u64 },
    DeleteSucceeded { id: u64 },
    DeleteFailed { id: u64 },
}

/// List, draft and in-flight markers owned by one controller.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    users: Vec<UserRecord>,
    draft: DraftForm,
    in_flight: HashMap<PendingKey, OpKind>,
    mounted: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn draft(&self) -> &DraftForm {
        &self.draft
    }

    pub fn find(&self, id: u64) -> Option<&UserRecord> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn is_pending(&self, key: PendingKey) -> bool {
        self.in_flight.contains_key(&key)
    }

    pub fn pending(&self) -> Vec<(PendingKey, OpKind)> {
        let mut pending: Vec<_> = self.in_flight.iter().map(|(k, v)| (*k, *v)).collect();
        pending.sort_by_key(|(key, _)| match key {
            PendingKey::Collection => (0, 0),
            PendingKey::NewRecord => (1, 0),
            PendingKey::Record(id) => (2, *id),
        });
        pending
    }

    /// Marks `key` as having a request in flight. Nothing else may start while
    /// the list fetch is pending, since its result replaces the whole list.
    pub fn begin(&mut self, key: PendingKey, kind: OpKind) -> Result<(), ControllerError> {
        if key == PendingKey::Collection && self.mounted {
            return Err(ControllerError::AlreadyMounted);
        }
        if let Some(fetching) = self.in_flight.get(&PendingKey::Collection) {
            return Err(ControllerError::InFlight {
                key: PendingKey::Collection,
                kind: *fetching,
            });
        }
        if let Some(running) = self.in_flight.get(&key) {
            return Err(ControllerError::InFlight {
                key,
                kind: *running,
            });
        }
        if key == PendingKey::Collection {
            self.mounted = true;
        }
        self.in_flight.insert(key, kind);
        Ok(())
    }

    fn release(&mut self, key: PendingKey) {
        self.in_flight.remove(&key);
    }

    /// Applies one transition and returns the notification it raises, if any.
    pub fn apply(&mut self, action: Action) -> Option<Notification> {
        match action {
            Action::FieldChanged(field, value) => {
                self.draft.set(field, value);
                None
            }
            Action::EditRequested(record) => {
                self.draft = DraftForm::from_record(&record);
                None
            }
            Action::FetchSucceeded(remote) => {
                self.release(PendingKey::Collection);
                self.users = remote.into_iter().map(UserRecord::from_remote).collect();
                None
            }
            Action::FetchFailed => {
                self.release(PendingKey::Collection);
                Some(Notification::FetchFailed)
            }
            Action::CreateSucceeded { user, id } => {
                self.release(PendingKey::NewRecord);
                let record = UserRecord::from_new(id, user);
                match self.users.iter_mut().find(|existing| existing.id == id) {
                    Some(existing) => {
                        log::warn!(
                            "service returned id {} which is already listed; replacing it",
                            id
                        );
                        *existing = record;
                    }
                    None => self.users.push(record),
                }
                self.draft = DraftForm::default();
                Some(Notification::Created)
            }
            Action::CreateFailed => {
                self.release(PendingKey::NewRecord);
                Some(Notification::CreateFailed)
            }
            Action::UpdateSucceeded(record) => {
                self.release(PendingKey::Record(record.id));
                if let Some(existing) = self.users.iter_mut().find(|user| user.id == record.id) {
                    *existing = record;
                }
                self.draft = DraftForm::default();
                Some(Notification::Updated)
            }
            Action::UpdateFailed { id } => {
                self.release(PendingKey::Record(id));
                Some(Notification::UpdateFailed)
            }
            Action::DeleteSucceeded { id } => {
                self.release(PendingKey::Record(id));
                self.users.retain(|user| user.id != id);
                Some(Notification::Deleted)
            }
            Action::DeleteFailed { id } => {
                self.release(PendingKey::Record(id));
                Some(Notification::DeleteFailed)
            }
        }
    }
}
