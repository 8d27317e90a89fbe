// Support desk metrics domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_users: u64,
    pub active_conversations: u64,
    /// Already formatted by the helpdesk, e.g. "93%"
    pub satisfaction_rate: String,
}

impl DashboardMetrics {
    pub fn new(total_users: u64, active_conversations: u64, satisfaction_rate: String) -> Self {
        Self {
            total_users,
            active_conversations,
            satisfaction_rate,
        }
    }

    /// Title/value pairs in display order, one per card
    pub fn cards(&self) -> [(&'static str, String); 3] {
        [
            ("Total Users", self.total_users.to_string()),
            ("Active Conversations", self.active_conversations.to_string()),
            ("Satisfaction Rate", self.satisfaction_rate.clone()),
        ]
    }
}
