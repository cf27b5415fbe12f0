use serde::{Deserialize, Serialize};

/// Value used by the merchant system for "no limit" and "never expires".
pub const UNLIMITED: i64 = -1;

#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(default)]
pub struct UserInfo {
    #[serde(rename = "id")]
    pub uid: i64,
    pub username: String,
    /// Balance in cents.
    pub balance: i64,
    /// `1` when the account is active.
    pub status: i32,
}

impl UserInfo {
    pub fn is_active(&self) -> bool {
        self.status == 1
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(default)]
pub struct UserBalance {
    /// Balance in cents.
    pub balance: i64,
}

/// Subscription plan ("meal") of a merchant user.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(default)]
pub struct UserMealInfo {
    pub meal_name: String,
    /// Unix timestamp in seconds, or [`UNLIMITED`](crate::apis::users::UNLIMITED).
    pub expire_time: i64,
    pub channel_account_count: i32,
    /// Daily collection limit in cents.
    pub day_limit: i64,
    /// Monthly collection limit in cents.
    pub month_limit: i64,
    /// Fee rate in hundredths of a percent.
    pub rate: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Eq, PartialEq)]
#[serde(default)]
pub struct UserPayStat {
    pub today_amount: i64,
    pub today_order_count: i64,
    pub week_amount: i64,
    pub week_order_count: i64,
    pub month_amount: i64,
    pub month_order_count: i64,
    pub total_amount: i64,
    pub total_order_count: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct BindUserRequest {
    pub ticket: String,
    pub open_id: String,
}
