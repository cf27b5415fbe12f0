use serde::{Deserialize, Serialize};

/// Payment-collection account configured under a merchant profile.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(default)]
pub struct ChannelAccount {
    pub id: i64,
    pub name: String,
    pub pay_type: String,
    pub pay_type_name: String,
    /// `1` when enabled.
    pub status: i32,
    /// `1` when online.
    pub online: i32,
    /// Amount collected today, in cents.
    pub day_amount: i64,
    /// Daily limit, in cents.
    pub day_amount_limit: i64,
}

impl ChannelAccount {
    pub fn is_enabled(&self) -> bool {
        self.status == 1
    }

    pub fn is_online(&self) -> bool {
        self.online == 1
    }
}
