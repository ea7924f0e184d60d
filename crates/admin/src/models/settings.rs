use serde::{Deserialize, Serialize};

/// Which events the operator wants to hear about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub low_stock_alerts: bool,
    pub order_updates: bool,
    pub new_customers: bool,
    pub marketing_emails: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            low_stock_alerts: true,
            order_updates: true,
            new_customers: false,
            marketing_emails: false,
        }
    }
}
