use serde::{Deserialize, Serialize};

/// Aggregate counters for the overview screen. Missing counters read as zero.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default, alias = "total_posts", alias = "totalNews")]
    pub total_posts: u64,
    #[serde(default, alias = "pending_posts", alias = "pendingNews", alias = "pending")]
    pub pending_posts: u64,
    #[serde(default, alias = "approved_posts", alias = "approvedNews", alias = "approved")]
    pub approved_posts: u64,
    #[serde(default, alias = "rejected_posts", alias = "rejectedNews", alias = "rejected")]
    pub rejected_posts: u64,
    #[serde(default, alias = "total_users", alias = "users")]
    pub total_users: u64,
}
