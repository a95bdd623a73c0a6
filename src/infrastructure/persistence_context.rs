use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::member::{Member, MemberId};

/// Identity map of the members loaded through one repository instance
///
/// Lookups by id are answered from here before touching storage. Handlers
/// build a fresh repository per request, so the map never outlives the
/// request. Set-based updates bypass it and must call [`clear`](Self::clear).
#[derive(Debug, Clone, Default)]
pub struct PersistenceContext {
    members: Arc<RwLock<HashMap<MemberId, Member>>>,
}

impl PersistenceContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: MemberId) -> Option<Member> {
        self.members.read().await.get(&id).cloned()
    }

    /// Registers a persisted member, replacing any earlier copy
    ///
    /// Members without an id are ignored.
    pub async fn register(&self, member: &Member) {
        if let Some(id) = member.id() {
            self.members.write().await.insert(id, member.clone());
        }
    }

    pub async fn register_all(&self, members: &[Member]) {
        let mut map = self.members.write().await;
        for member in members {
            if let Some(id) = member.id() {
                map.insert(id, member.clone());
            }
        }
    }

    pub async fn evict(&self, id: MemberId) {
        self.members.write().await.remove(&id);
    }

    pub async fn contains(&self, id: MemberId) -> bool {
        self.members.read().await.contains_key(&id)
    }

    /// Detaches every member
    pub async fn clear(&self) {
        let mut map = self.members.write().await;
        let detached = map.len();
        map.clear();
        tracing::debug!(detached, "Persistence context cleared");
    }

    pub async fn len(&self) -> usize {
        self.members.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.members.read().await.is_empty()
    }
}
