use crate::common::{BOUND_OPEN_ID, VALID_TICKET};
use merchant_bot::signing;
use serde_json::{json, Value};
use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, RwLock},
};
use wiremock::{matchers::method, Mock, MockServer, Request, Respond, ResponseTemplate};

/// Simple mock of the merchant system used in integration tests.
///
/// Verifies the signature of every request and keeps track of bound open ids.
pub struct MerchantMockServer {
    server: MockServer,
    bound: Arc<RwLock<HashSet<String>>>,
}

impl MerchantMockServer {
    pub async fn start(secret: &str) -> Self {
        let server = MockServer::start().await;
        let bound = Arc::new(RwLock::new(HashSet::from([BOUND_OPEN_ID.to_string()])));

        Mock::given(method("POST"))
            .respond_with(MerchantResponder {
                secret: secret.to_string(),
                bound: bound.clone(),
            })
            .mount(&server)
            .await;

        Self { server, bound }
    }

    pub fn url(&self) -> String {
        self.server.uri()
    }

    pub fn is_bound(&self, open_id: &str) -> bool {
        self.bound.read().unwrap().contains(open_id)
    }

    pub async fn received_requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}

struct MerchantResponder {
    secret: String,
    bound: Arc<RwLock<HashSet<String>>>,
}

impl MerchantResponder {
    fn handle(&self, path: &str, params: &HashMap<String, String>) -> Result<Value, (i64, &'static str)> {
        let expected = signing::sign(params.iter(), &self.secret);
        if params.get(signing::SIGN_PARAM) != Some(&expected) {
            return Err((401, "invalid signature"));
        }
        if params.get("connect_type").map(String::as_str) != Some("xbot") {
            return Err((400, "unsupported connect type"));
        }

        let open_id = params.get("open_id").ok_or((400, "missing open_id"))?;

        if path == "/api/system-api/user/bind" {
            if params.get("ticket").map(String::as_str) != Some(VALID_TICKET) {
                return Err((400, "invalid ticket"));
            }
            self.bound.write().unwrap().insert(open_id.clone());
            return Ok(Value::Null);
        }

        if !self.bound.read().unwrap().contains(open_id) {
            return Err((404, "user not bound"));
        }

        match path {
            "/api/system-api/user/unbind" => {
                self.bound.write().unwrap().remove(open_id);
                Ok(Value::Null)
            }
            "/api/system-api/user/info" => Ok(json!({
                "id": 987654,
                "username": "merchant",
                "balance": 5000,
                "status": 1
            })),
            "/api/system-api/user/balance" => Ok(json!({ "balance": 5000 })),
            "/api/system-api/user/meal-info" => Ok(json!({
                "meal_name": "Standard",
                "expire_time": -1,
                "channel_account_count": 5,
                "day_limit": 5000000,
                "month_limit": -1,
                "rate": 38
            })),
            "/api/system-api/user/pay-stat" => Ok(json!({
                "today_amount": 30000,
                "today_order_count": 3,
                "week_amount": 150000,
                "week_order_count": 12,
                "month_amount": 600000,
                "month_order_count": 40,
                "total_amount": 9000000,
                "total_order_count": 700
            })),
            "/api/system-api/channel-account/list" => Ok(json!([
                {
                    "id": 1,
                    "name": "Store Alipay",
                    "pay_type": "alipay",
                    "pay_type_name": "Alipay",
                    "status": 1,
                    "online": 1,
                    "day_amount": 30000,
                    "day_amount_limit": 1000000
                }
            ])),
            _ => Err((404, "unknown route")),
        }
    }
}

impl Respond for MerchantResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let params: HashMap<String, String> = url::form_urlencoded::parse(&request.body)
            .into_owned()
            .collect();

        let body = match self.handle(request.url.path(), &params) {
            Ok(data) => json!({ "code": 200, "message": "success", "data": data }),
            Err((code, message)) => json!({ "code": code, "message": message }),
        };

        ResponseTemplate::new(200).set_body_json(body)
    }
}
