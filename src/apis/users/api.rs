use crate::{
    apis::{
        open_id_params,
        users::{BindUserRequest, UserBalance, UserInfo, UserMealInfo, UserPayStat},
        MerchantClientInner,
    },
    Error,
};
use std::sync::Arc;

const USER_INFO_ROUTE: &str = "/api/system-api/user/info";
const USER_BALANCE_ROUTE: &str = "/api/system-api/user/balance";
const USER_MEAL_INFO_ROUTE: &str = "/api/system-api/user/meal-info";
const USER_PAY_STAT_ROUTE: &str = "/api/system-api/user/pay-stat";
const USER_BIND_ROUTE: &str = "/api/system-api/user/bind";
const USER_UNBIND_ROUTE: &str = "/api/system-api/user/unbind";

/// Merchant user APIs client.
#[derive(Clone, Debug)]
pub struct UsersApi {
    inner: Arc<MerchantClientInner>,
}

impl UsersApi {
    pub(crate) fn new(inner: Arc<MerchantClientInner>) -> Self {
        Self { inner }
    }

    /// Gets the merchant profile bound to `open_id`.
    ///
    /// A user that has not bound an account yields [`Error::NotFound`](crate::Error::NotFound).
    #[tracing::instrument(name = "Get User Info", skip(self))]
    pub async fn info(&self, open_id: &str) -> Result<UserInfo, Error> {
        self.inner
            .post_signed(USER_INFO_ROUTE, open_id_params(open_id))
            .await?
            .ok_or(Error::NotFound("no user information found"))
    }

    /// Gets the balance, in cents, of the merchant user bound to `open_id`.
    #[tracing::instrument(name = "Get User Balance", skip(self))]
    pub async fn balance(&self, open_id: &str) -> Result<i64, Error> {
        let res: UserBalance = self
            .inner
            .post_signed(USER_BALANCE_ROUTE, open_id_params(open_id))
            .await?
            .ok_or(Error::NotFound("no balance information found"))?;

        Ok(res.balance)
    }

    /// Gets the subscription plan of the merchant user bound to `open_id`.
    #[tracing::instrument(name = "Get User Meal Info", skip(self))]
    pub async fn meal_info(&self, open_id: &str) -> Result<UserMealInfo, Error> {
        self.inner
            .post_signed(USER_MEAL_INFO_ROUTE, open_id_params(open_id))
            .await?
            .ok_or(Error::NotFound("no plan information found"))
    }

    /// Gets the payment statistics of the merchant user bound to `open_id`.
    #[tracing::instrument(name = "Get User Pay Stat", skip(self))]
    pub async fn pay_stat(&self, open_id: &str) -> Result<UserPayStat, Error> {
        self.inner
            .post_signed(USER_PAY_STAT_ROUTE, open_id_params(open_id))
            .await?
            .ok_or(Error::NotFound("no statistics found"))
    }

    /// Binds the chat identity to the merchant account that issued the ticket.
    #[tracing::instrument(
        name = "Bind User",
        skip(self, request),
        fields(open_id = %request.open_id)
    )]
    pub async fn bind(&self, request: &BindUserRequest) -> Result<(), Error> {
        let mut params = open_id_params(&request.open_id);
        params.insert("ticket".to_string(), request.ticket.clone());

        self.inner
            .post_signed::<serde_json::Value>(USER_BIND_ROUTE, params)
            .await?;

        Ok(())
    }

    /// Removes the binding of `open_id`.
    #[tracing::instrument(name = "Unbind User", skip(self))]
    pub async fn unbind(&self, open_id: &str) -> Result<(), Error> {
        self.inner
            .post_signed::<serde_json::Value>(USER_UNBIND_ROUTE, open_id_params(open_id))
            .await?;

        Ok(())
    }
}
