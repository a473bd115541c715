//! Presence (online members) of the group.

/// A member currently online
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OnlineMember {
    pub id: Option<i64>,
    pub username: Option<String>,
}

/// Online members snapshot; replaced wholesale on every presence update
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OnlineMembers {
    pub members: Vec<OnlineMember>,
}

impl OnlineMembers {
    pub fn new(members: Vec<OnlineMember>) -> Self {
        Self { members }
    }

    pub fn count(&self) -> usize {
        self.members.len()
    }
}
