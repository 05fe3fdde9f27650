use crate::models::user::StoredUser;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

const SEED: [(&str, &str); 10] = [
    ("Leanne Graham", "Sincere@april.biz"),
    ("Ervin Howell", "Shanna@melissa.tv"),
    ("Clementine Bauch", "Nathan@yesenia.net"),
    ("Patricia Lebsack", "Julianne.OConner@kory.org"),
    ("Chelsey Dietrich", "Lucio_Hettinger@annie.ca"),
    ("Mrs. Dennis Schulist", "Karley_Dach@jasper.info"),
    ("Kurtis Weissnat", "Telly.Hoeger@billy.biz"),
    ("Nicholas Runolfsdottir V", "Sherwood@rosamond.me"),
    ("Glenna Reichert", "Chaim_McDermott@dana.io"),
    ("Clementina DuBuque", "Rey.Padberg@karina.biz"),
];

// In-memory user collection: id → user. Nothing survives a restart.
#[derive(Clone, Debug)]
pub struct MockState {
    pub users: Arc<DashMap<u64, StoredUser>>,
    next_id: Arc<AtomicU64>,
    failing: Arc<AtomicBool>,
}

impl MockState {
    pub fn new() -> Self {
        MockState {
            users: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicU64::new(1)),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The ten users the public placeholder service starts with.
    pub fn seeded() -> Self {
        let state = Self::new();
        for (name, email) in SEED {
            let id = state.allocate_id();
            state.users.insert(
                id,
                StoredUser {
                    id,
                    name: name.to_string(),
                    email: email.to_string(),
                    extra: Default::default(),
                },
            );
        }
        state
    }

    pub fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    pub fn list(&self) -> Vec<StoredUser> {
        let mut users: Vec<StoredUser> =
            self.users.iter().map(|entry| entry.value().clone()).collect();
        users.sort_by_key(|user| user.id);
        users
    }

    /// While set, every route answers 503.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn is_failing(&self) -> bool {
        self.failing.load(Ordering::SeqCst)
    }
}

impl Default for MockState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_state_lists_ten_users_in_id_order() {
        let state = MockState::seeded();
        let users = state.list();
        assert_eq!(users.len(), 10);
        assert_eq!(users[0].id, 1);
        assert_eq!(users[0].name, "Leanne Graham");
        assert_eq!(users[9].id, 10);
        assert_eq!(state.allocate_id(), 11);
    }

    #[test]
    fn failure_switch_is_shared_between_clones() {
        let state = MockState::new();
        let clone = state.clone();
        clone.set_failing(true);
        assert!(state.is_failing());
    }
}
