use certvault_api::UserProfile;

use crate::message::DashboardStats;
use crate::model::widgets::Spinner;

#[derive(Debug, Default)]
pub struct DashboardState {
    pub user: UserProfile,
    pub stats: Option<DashboardStats>,
    pub error: Option<String>,
    pub spinner: Spinner<()>,
}

impl DashboardState {
    pub fn new(user: UserProfile) -> Self {
        Self {
            user,
            ..Self::default()
        }
    }
}
