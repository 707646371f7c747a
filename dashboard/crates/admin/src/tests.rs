//! Client tests against a scripted in-memory backend

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use http::{HeaderValue, StatusCode};
use kernel::error::app_error::{AppError, AppResult};
use kernel::error::kind::ErrorKind;
use kernel::id::UserId;
use platform::cache::MemoryCache;
use platform::clock::ManualClock;
use platform::header::TOTAL_COUNT_HEADER;
use platform::token_store::{MemoryTokenStore, TokenStore, TokenStoreError};
use serde_json::{Value, json};
use zeroize::Zeroizing;

use crate::application::client::AdminClient;
use crate::application::config::AdminConfig;
use crate::application::session::SessionState;
use crate::domain::entity::{BlockRequest, StatsData};
use crate::domain::query::{OrderFilter, Pagination, UserFilter, render_query};
use crate::domain::transport::{ApiRequest, ApiResponse, BackendTransport};
use crate::domain::value_object::UserKind;
use crate::error::AdminError;

// ----------------------------------------------------------------------
// Fixtures
// ----------------------------------------------------------------------

#[derive(Clone)]
enum Reply {
    Respond(ApiResponse),
    Unreachable,
}

#[derive(Debug, Clone)]
struct Recorded {
    route: String,
    query: String,
    body: Option<Value>,
    bearer: Option<String>,
}

#[derive(Default)]
struct Script {
    /// Replies per route; the last reply of a route repeats
    replies: HashMap<String, VecDeque<Reply>>,
    calls: Vec<Recorded>,
}

/// Backend double: replays scripted replies and records every request
#[derive(Clone, Default)]
struct FakeTransport {
    script: Arc<Mutex<Script>>,
}

impl FakeTransport {
    fn reply(&self, route: &str, response: ApiResponse) -> &Self {
        self.push(route, Reply::Respond(response))
    }

    fn unreachable(&self, route: &str) -> &Self {
        self.push(route, Reply::Unreachable)
    }

    fn push(&self, route: &str, reply: Reply) -> &Self {
        self.script
            .lock()
            .unwrap()
            .replies
            .entry(route.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    fn calls(&self) -> Vec<Recorded> {
        self.script.lock().unwrap().calls.clone()
    }

    fn count(&self, route: &str) -> usize {
        self.calls().iter().filter(|c| c.route == route).count()
    }
}

impl BackendTransport for FakeTransport {
    async fn send(&self, request: &ApiRequest) -> AppResult<ApiResponse> {
        let route = request.route_key();
        let mut script = self.script.lock().unwrap();
        script.calls.push(Recorded {
            route: route.clone(),
            query: render_query(&request.query),
            body: request.body.clone(),
            bearer: request.bearer.as_ref().map(|t| t.to_string()),
        });

        let reply = match script.replies.get_mut(&route) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        match reply {
            Some(Reply::Respond(response)) => Ok(response),
            Some(Reply::Unreachable) => Err(AppError::network("Could not connect to the server")),
            None => Ok(ApiResponse::new(StatusCode::NOT_FOUND, b"".to_vec())),
        }
    }
}

/// Token store that counts how often it was cleared
#[derive(Default)]
struct CountingTokenStore {
    inner: MemoryTokenStore,
    clears: AtomicUsize,
}

impl CountingTokenStore {
    fn with_token(token: &str) -> Self {
        Self {
            inner: MemoryTokenStore::with_token(token),
            clears: AtomicUsize::new(0),
        }
    }

    fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl TokenStore for CountingTokenStore {
    fn load(&self) -> Result<Option<Zeroizing<String>>, TokenStoreError> {
        self.inner.load()
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        self.inner.save(token)
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.inner.clear()
    }
}

struct Harness {
    client: AdminClient<FakeTransport>,
    backend: FakeTransport,
    clock: Arc<ManualClock>,
    store: Arc<CountingTokenStore>,
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 12, 30, 0).unwrap()
}

fn harness_with(store: CountingTokenStore) -> Harness {
    let backend = FakeTransport::default();
    let clock = Arc::new(ManualClock::new(now().timestamp_millis()));
    let store = Arc::new(store);
    let client = AdminClient::new(
        AdminConfig::with_api_url("http://backend.test"),
        backend.clone(),
        Arc::new(MemoryCache::new(clock.clone())),
        store.clone(),
        clock.clone(),
    )
    .unwrap();

    Harness {
        client,
        backend,
        clock,
        store,
    }
}

fn signed_in() -> Harness {
    harness_with(CountingTokenStore::with_token("token-1"))
}

fn signed_out() -> Harness {
    harness_with(CountingTokenStore::default())
}

fn respond(status: u16, body: Value) -> ApiResponse {
    ApiResponse::new(
        StatusCode::from_u16(status).unwrap(),
        serde_json::to_vec(&body).unwrap(),
    )
}

fn list(body: Value, total: Option<u64>) -> ApiResponse {
    let mut response = respond(200, body);
    if let Some(total) = total {
        response
            .headers
            .insert(TOTAL_COUNT_HEADER, HeaderValue::from(total));
    }
    response
}

fn user_json(id: &str) -> Value {
    json!({
        "id": id,
        "phone": "+77010000000",
        "firstName": "Aigerim",
        "lastName": "Nurlanova",
        "isBlocked": false,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    })
}

fn order_json(id: &str, status: &str, price: f64, created_at: DateTime<Utc>) -> Value {
    json!({
        "id": id,
        "clientId": "u-1",
        "orderType": "TAXI",
        "orderStatus": status,
        "from": "Abay 10",
        "to": "Dostyk 5",
        "fromMapboxId": "m1",
        "toMapboxId": "m2",
        "price": price,
        "createdAt": created_at.to_rfc3339(),
        "updatedAt": created_at.to_rfc3339()
    })
}

const GET_CLIENTS: &str = "GET /admin/clients";
const GET_DRIVERS: &str = "GET /admin/drivers";
const GET_ORDERS: &str = "GET /admin/order-requests";
const GET_STATS: &str = "GET /admin/stats";

// ----------------------------------------------------------------------
// Session
// ----------------------------------------------------------------------

#[cfg(test)]
mod session_tests {
    use super::*;

    #[tokio::test]
    async fn test_no_token_sends_nothing() {
        let h = signed_out();
        assert_eq!(h.client.session_state(), SessionState::Unauthenticated);

        let all = UserFilter::default();
        let err = h.client.get_clients(&all).await.unwrap_err();
        assert!(matches!(err, AdminError::SessionExpired));
        assert!(err.requires_reauth());
        assert!(h.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_persisted_token_is_attached() {
        let h = signed_in();
        h.backend.reply(GET_CLIENTS, list(json!([]), Some(0)));

        h.client.get_clients(&UserFilter::default()).await.unwrap();

        let calls = h.backend.calls();
        assert_eq!(calls[0].bearer.as_deref(), Some("token-1"));
    }

    #[tokio::test]
    async fn test_second_401_logs_out_once() {
        let h = signed_in();
        let unauthorized = respond(401, json!({"message": "Unauthorized"}));
        h.backend.reply(GET_CLIENTS, unauthorized);

        let all = UserFilter::default();
        let err = h.client.get_clients(&all).await.unwrap_err();
        assert!(matches!(err, AdminError::SessionExpired));
        assert_eq!(h.backend.count(GET_CLIENTS), 2);
        assert_eq!(h.store.clears(), 1);
        assert_eq!(h.client.session_state(), SessionState::Unauthenticated);
        assert!(h.store.load().unwrap().is_none());

        // Signed out now, so nothing more goes out
        let err = h.client.get_drivers(&all).await.unwrap_err();
        assert!(matches!(err, AdminError::SessionExpired));
        assert_eq!(h.backend.count(GET_DRIVERS), 0);
        assert_eq!(h.store.clears(), 1);
    }

    #[tokio::test]
    async fn test_retry_success_clears_mark() {
        let h = signed_in();
        h.backend
            .reply(GET_ORDERS, respond(401, json!({})))
            .reply(GET_ORDERS, list(json!([]), Some(0)))
            .reply(GET_ORDERS, respond(401, json!({})))
            .reply(GET_ORDERS, list(json!([]), Some(0)));

        let first = OrderFilter::default().with_page(Pagination::window(0, 10));
        h.client.get_orders(&first).await.unwrap();

        // Same route, different cache key: a fresh 401 gets its own retry
        let second = OrderFilter::default().with_page(Pagination::window(10, 20));
        h.client.get_orders(&second).await.unwrap();

        assert_eq!(h.backend.count(GET_ORDERS), 4);
        assert!(h.client.is_authenticated());
        assert_eq!(h.store.clears(), 0);
    }

    #[tokio::test]
    async fn test_retry_network_error_keeps_session() {
        let h = signed_in();
        h.backend
            .reply(GET_CLIENTS, respond(401, json!({})))
            .unreachable(GET_CLIENTS);

        let all = UserFilter::default();
        let err = h.client.get_clients(&all).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NetworkOrUnknown);
        assert!(h.client.is_authenticated());
    }

    #[tokio::test]
    async fn test_double_logout_is_safe() {
        let h = signed_in();
        h.client.logout();
        h.client.logout();

        assert!(!h.client.is_authenticated());
        assert_eq!(h.store.clears(), 2);
        assert!(h.store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_validate_session() {
        let h = signed_out();
        assert!(!h.client.validate_session().await.unwrap());
        assert!(h.backend.calls().is_empty());

        let h = signed_in();
        h.backend
            .reply(GET_CLIENTS, list(json!([user_json("u-1")]), Some(1)));
        assert!(h.client.validate_session().await.unwrap());
        assert_eq!(h.backend.calls()[0].query, "_start=0&_end=1");

        let h = signed_in();
        h.backend.reply(GET_CLIENTS, respond(401, json!({})));
        assert!(!h.client.validate_session().await.unwrap());
        assert_eq!(h.client.session_state(), SessionState::Unauthenticated);

        let h = signed_in();
        h.backend.reply(GET_CLIENTS, respond(502, json!({})));
        assert!(matches!(
            h.client.validate_session().await,
            Err(AdminError::Server)
        ));
    }
}

// ----------------------------------------------------------------------
// Sign-in
// ----------------------------------------------------------------------

#[cfg(test)]
mod sign_in_tests {
    use super::*;

    const SEND_CODE: &str = "POST /v1/user/sing-in-by-phone";
    const CONFIRM_CODE: &str = "POST /v1/user/sing-in-by-phone-confirm-code";
    const PHONE: &str = "+77011234567";

    #[tokio::test]
    async fn test_send_code_echo() {
        let h = signed_out();
        h.backend
            .reply(SEND_CODE, respond(201, json!({"smscode": "1234"})));

        let code = h.client.send_sms_code(" +77011234567 ").await.unwrap();
        assert_eq!(code.as_deref(), Some("1234"));

        let call = &h.backend.calls()[0];
        assert_eq!(call.body, Some(json!({"phone": "+77011234567"})));
        assert!(call.bearer.is_none());
    }

    #[tokio::test]
    async fn test_send_code_failure_prefix() {
        let h = signed_out();
        let invalid = respond(
            400,
            json!({"message": "phone must be a valid phone number"}),
        );
        h.backend.reply(SEND_CODE, invalid);

        let err = h.client.send_sms_code("123").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to send SMS code: phone must be a valid phone number"
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_blank_phone_is_rejected_locally() {
        let h = signed_out();
        let err = h.client.send_sms_code("   ").await.unwrap_err();
        assert!(matches!(err, AdminError::InvalidInput(_)));
        assert!(h.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_confirm_persists_token_and_clears_cache() {
        let h = signed_in();
        h.backend
            .reply(GET_CLIENTS, list(json!([user_json("u-1")]), Some(1)))
            .reply(CONFIRM_CODE, respond(201, json!({"token": "token-2"})));

        h.client.get_clients(&UserFilter::default()).await.unwrap();
        h.client.confirm_sms_code(PHONE, "1234").await.unwrap();

        assert!(h.client.is_authenticated());
        assert_eq!(
            h.store.load().unwrap().as_deref().map(String::as_str),
            Some("token-2")
        );

        // The cached list belonged to the previous session
        h.client.get_clients(&UserFilter::default()).await.unwrap();
        let calls = h.backend.calls();
        assert_eq!(h.backend.count(GET_CLIENTS), 2);
        assert_eq!(calls.last().unwrap().bearer.as_deref(), Some("token-2"));
    }

    #[tokio::test]
    async fn test_confirm_401_is_a_rejected_code() {
        let h = signed_out();
        let rejected = respond(401, json!({"message": "Invalid code"}));
        h.backend.reply(CONFIRM_CODE, rejected);

        let err = h.client.confirm_sms_code(PHONE, "0000").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid code or authorization failed: Invalid code"
        );
        assert!(!err.requires_reauth());
        assert_eq!(h.backend.count(CONFIRM_CODE), 1);
        assert_eq!(h.store.clears(), 0);
        assert!(!h.client.is_authenticated());
    }
}

// ----------------------------------------------------------------------
// Reads and cache
// ----------------------------------------------------------------------

#[cfg(test)]
mod read_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_cache_expires_after_ttl() {
        let h = signed_in();
        h.backend
            .reply(GET_CLIENTS, list(json!([user_json("u-1")]), Some(1)));
        let filter = UserFilter::default();

        h.client.get_clients(&filter).await.unwrap();
        h.clock.advance_ms(15_000);
        h.client.get_clients(&filter).await.unwrap();
        assert_eq!(h.backend.count(GET_CLIENTS), 1);

        h.clock.advance_ms(1);
        let page = h.client.get_clients(&filter).await.unwrap();
        assert_eq!(h.backend.count(GET_CLIENTS), 2);
        assert_eq!(page.total, 1);
        assert!(page.total_known);
    }

    #[tokio::test]
    async fn test_distinct_filters_do_not_share_entries() {
        let h = signed_in();
        h.backend.reply(GET_DRIVERS, list(json!([]), Some(0)));

        let blocked = UserFilter {
            is_blocked: Some(true),
            ..Default::default()
        };
        h.client.get_drivers(&UserFilter::default()).await.unwrap();
        h.client.get_drivers(&blocked).await.unwrap();
        h.client.get_drivers(&blocked).await.unwrap();

        assert_eq!(h.backend.count(GET_DRIVERS), 2);
        assert_eq!(h.backend.calls()[1].query, "isBlocked=true");
    }

    #[tokio::test]
    async fn test_missing_total_header() {
        let h = signed_in();
        let users = json!([user_json("u-1"), user_json("u-2")]);
        h.backend.reply(GET_CLIENTS, list(users, None));

        let page = h.client.get_clients(&UserFilter::default()).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page.total, 0);
        assert!(!page.total_known);
    }

    #[tokio::test]
    async fn test_user_orders_filter_by_role() {
        let h = signed_in();
        h.backend.reply(GET_ORDERS, list(json!([]), Some(0)));
        let user_id = UserId::new("u-9");

        h.client
            .get_user_orders(&user_id, UserKind::Client, &OrderFilter::default())
            .await
            .unwrap();
        h.client
            .get_user_orders(&user_id, UserKind::Driver, &OrderFilter::default())
            .await
            .unwrap();

        let calls = h.backend.calls();
        assert_eq!(calls[0].query, "clientId=u-9");
        assert_eq!(calls[1].query, "driverId=u-9");
    }

    #[tokio::test]
    async fn test_invalid_filter_sends_nothing() {
        let h = signed_in();
        let filter = OrderFilter {
            min_price: Some(500.0),
            max_price: Some(100.0),
            ..Default::default()
        };

        let err = h.client.get_orders(&filter).await.unwrap_err();
        assert!(matches!(err, AdminError::InvalidInput(_)));
        assert!(h.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_status_messages() {
        let h = signed_in();
        h.backend
            .reply("GET /admin/clients/u-1", respond(403, json!({})))
            .reply(
                "GET /admin/order-requests/o-404",
                respond(404, json!({"message": "Order not found"})),
            )
            .reply("GET /admin/drivers/u-2", respond(404, json!({})));

        let err = h.client.get_client(&UserId::new("u-1")).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Insufficient privileges to perform this operation"
        );
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        let err = h.client.get_order(&"o-404".into()).await.unwrap_err();
        assert_eq!(err.to_string(), "Order not found");

        let err = h.client.get_driver(&UserId::new("u-2")).await.unwrap_err();
        assert_eq!(err.to_string(), "Resource not found");
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let h = signed_in();
        h.backend.unreachable(GET_CLIENTS);

        let all = UserFilter::default();
        let err = h.client.get_clients(&all).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NetworkOrUnknown);
        assert_eq!(err.to_string(), "Could not connect to the server");
        assert!(h.client.is_authenticated());
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let h = signed_in();
        h.backend
            .reply(GET_ORDERS, respond(200, json!({"unexpected": true})));

        let all = OrderFilter::default();
        let err = h.client.get_orders(&all).await.unwrap_err();
        assert!(matches!(err, AdminError::Decode(_)));
    }

    #[tokio::test]
    async fn test_id_is_one_path_segment() {
        const ROUTE: &str = "GET /admin/clients/7%2Forders%3Fphone=1";
        let h = signed_in();
        h.backend
            .reply(ROUTE, respond(200, user_json("7/orders?phone=1")));

        let id = UserId::new("7/orders?phone=1");
        let user = h.client.get_client(&id).await.unwrap();
        assert_eq!(user.id, id);
        assert_eq!(h.backend.calls()[0].route, ROUTE);
    }

    #[tokio::test]
    async fn test_dot_id_sends_nothing() {
        let h = signed_in();

        let err = h.client.get_order(&"..".into()).await.unwrap_err();
        assert!(matches!(err, AdminError::InvalidInput(_)));
        let err = h.client.unblock_user(&".".into()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(h.backend.calls().is_empty());
    }
}

// ----------------------------------------------------------------------
// Commands
// ----------------------------------------------------------------------

#[cfg(test)]
mod command_tests {
    use super::*;

    const BLOCK: &str = "POST /admin/users/block";
    const CHECK_UNBLOCK: &str = "POST /admin/users/check-unblock";

    fn prime(h: &Harness) {
        h.backend
            .reply(GET_CLIENTS, list(json!([user_json("u-1")]), Some(1)))
            .reply(GET_DRIVERS, list(json!([user_json("u-1")]), Some(1)))
            .reply(GET_ORDERS, list(json!([]), Some(0)))
            .reply("GET /admin/clients/u-1", respond(200, user_json("u-1")))
            .reply("GET /admin/drivers/u-1", respond(200, user_json("u-1")));
    }

    async fn read_all(h: &Harness) {
        let id = UserId::new("u-1");
        h.client.get_clients(&UserFilter::default()).await.unwrap();
        h.client.get_drivers(&UserFilter::default()).await.unwrap();
        h.client.get_orders(&OrderFilter::default()).await.unwrap();
        h.client.get_client(&id).await.unwrap();
        h.client.get_driver(&id).await.unwrap();
    }

    #[tokio::test]
    async fn test_block_invalidates_user_entries() {
        let h = signed_in();
        prime(&h);
        let blocked = respond(201, json!({"message": "User blocked", "userId": "u-1"}));
        h.backend.reply(BLOCK, blocked);

        read_all(&h).await;
        let until = now() + Duration::hours(24);
        let ack = h
            .client
            .block_user(&BlockRequest::new("u-1", "  Fraud  ", Some(until)))
            .await
            .unwrap();
        assert_eq!(ack.message, "User blocked");
        read_all(&h).await;

        assert_eq!(h.backend.count("GET /admin/clients/u-1"), 2);
        assert_eq!(h.backend.count("GET /admin/drivers/u-1"), 2);
        assert_eq!(h.backend.count(GET_CLIENTS), 2);
        assert_eq!(h.backend.count(GET_DRIVERS), 2);
        // Orders are untouched by a block
        assert_eq!(h.backend.count(GET_ORDERS), 1);

        let body = h
            .backend
            .calls()
            .into_iter()
            .find(|c| c.route == BLOCK)
            .and_then(|c| c.body)
            .unwrap();
        assert_eq!(body["userId"], "u-1");
        assert_eq!(body["reason"], "Fraud");
        let sent: DateTime<Utc> = serde_json::from_value(body["blockedUntil"].clone()).unwrap();
        assert_eq!(sent, until);
    }

    #[tokio::test]
    async fn test_permanent_block_omits_expiry() {
        let h = signed_in();
        h.backend.reply(BLOCK, respond(201, json!({})));

        h.client
            .block_user(&BlockRequest::new("u-1", "Abuse", None))
            .await
            .unwrap();

        let body = h.backend.calls()[0].body.clone().unwrap();
        assert!(body.get("blockedUntil").is_none());
    }

    #[tokio::test]
    async fn test_invalid_block_sends_nothing() {
        let h = signed_in();

        let err = h
            .client
            .block_user(&BlockRequest::new("u-1", "   ", None))
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::InvalidInput(_)));

        let past = now() - Duration::minutes(1);
        let err = h
            .client
            .block_user(&BlockRequest::new("u-1", "Fraud", Some(past)))
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::InvalidInput(_)));
        assert!(h.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unblock_unknown_user() {
        let h = signed_in();
        h.backend
            .reply("PUT /admin/users/u-404/unblock", respond(404, json!({})));

        let err = h.client.unblock_user(&"u-404".into()).await.unwrap_err();
        assert!(matches!(err, AdminError::UserNotFound));
        assert_eq!(err.to_string(), "User not found");
    }

    #[tokio::test]
    async fn test_unblock_empty_body() {
        let h = signed_in();
        h.backend.reply(
            "PUT /admin/users/u-1/unblock",
            ApiResponse::new(StatusCode::OK, b"".to_vec()),
        );

        let ack = h.client.unblock_user(&"u-1".into()).await.unwrap();
        assert_eq!(ack.message, "");
    }

    #[tokio::test]
    async fn test_check_unblock_invalidates_lists() {
        let h = signed_in();
        prime(&h);
        h.backend
            .reply(CHECK_UNBLOCK, respond(201, json!({"message": "ok"})));

        read_all(&h).await;
        h.client.check_unblock().await.unwrap();
        read_all(&h).await;

        assert_eq!(h.backend.count(GET_CLIENTS), 2);
        assert_eq!(h.backend.count(GET_DRIVERS), 2);
        assert_eq!(h.backend.count("GET /admin/clients/u-1"), 2);
        assert_eq!(h.backend.count(GET_ORDERS), 1);
    }
}

// ----------------------------------------------------------------------
// Statistics
// ----------------------------------------------------------------------

#[cfg(test)]
mod stats_tests {
    use super::*;

    #[tokio::test]
    async fn test_stats_endpoint_is_cached() {
        let h = signed_in();
        let aggregate = json!({
            "totalUsers": 10,
            "totalDrivers": 4,
            "totalOrders": 30,
            "activeOrders": 5,
            "completedOrders": 20,
            "rejectedOrders": 5,
            "todayOrders": 3,
            "revenue": 125000.5
        });
        h.backend.reply(GET_STATS, respond(200, aggregate));

        let stats = h.client.get_stats().await;
        assert_eq!(stats.total_users, 10);
        assert_eq!(stats.revenue, 125000.5);

        h.client.get_stats().await;
        assert_eq!(h.backend.count(GET_STATS), 1);

        h.clock.advance_ms(60_001);
        h.client.get_stats().await;
        assert_eq!(h.backend.count(GET_STATS), 2);
    }

    #[tokio::test]
    async fn test_stats_fallback_computes_from_lists() {
        let h = signed_in();
        let earlier = now() - Duration::days(3);
        let clients = json!([user_json("u-1"), user_json("u-2")]);
        let orders = json!([
            order_json("o-1", "COMPLETED", 1000.0, now()),
            order_json("o-2", "COMPLETED", 500.0, earlier),
            order_json("o-3", "ONGOING", 700.0, now()),
            order_json("o-4", "REJECTED_BY_CLIENT", 300.0, earlier),
            order_json("o-5", "ARCHIVED", 900.0, earlier),
        ]);
        h.backend
            .reply(GET_STATS, respond(500, json!({})))
            .reply(GET_CLIENTS, list(clients, Some(2)))
            .reply(GET_DRIVERS, list(json!([user_json("d-1")]), Some(1)))
            .reply(GET_ORDERS, list(orders, Some(5)));

        let stats = h.client.get_stats().await;
        assert_eq!(
            stats,
            StatsData {
                total_users: 2,
                total_drivers: 1,
                total_orders: 5,
                active_orders: 1,
                completed_orders: 2,
                rejected_orders: 1,
                today_orders: 2,
                revenue: 1500.0,
            }
        );
        assert_eq!(stats.other_orders(), 1);

        let calls = h.backend.calls();
        for route in [GET_CLIENTS, GET_DRIVERS, GET_ORDERS] {
            let call = calls.iter().find(|c| c.route == route).unwrap();
            assert_eq!(call.query, "_start=0&_end=1000");
        }

        // A computed result is not stored under the statistics key
        h.client.get_stats().await;
        assert_eq!(h.backend.count(GET_STATS), 2);
    }

    #[tokio::test]
    async fn test_stats_reports_zeros_when_everything_fails() {
        let h = signed_in();
        h.backend
            .unreachable(GET_STATS)
            .reply(GET_CLIENTS, respond(500, json!({})))
            .reply(GET_DRIVERS, respond(500, json!({})))
            .reply(GET_ORDERS, respond(500, json!({})));

        assert_eq!(h.client.get_stats().await, StatsData::default());
    }

    #[tokio::test]
    async fn test_stats_without_session_is_zero() {
        let h = signed_out();
        assert_eq!(h.client.get_stats().await, StatsData::default());
        assert!(h.backend.calls().is_empty());
    }
}

// ----------------------------------------------------------------------
// Export
// ----------------------------------------------------------------------

#[cfg(test)]
mod export_tests {
    use super::*;

    #[tokio::test]
    async fn test_export_clients_fetches_full_window() {
        let h = signed_in();
        let users = json!([user_json("u-1"), user_json("u-2")]);
        h.backend.reply(GET_CLIENTS, list(users, Some(2)));

        let filter = UserFilter {
            is_blocked: Some(false),
            ..Default::default()
        }
        .with_page(Pagination::window(20, 30));

        let export = h
            .client
            .export_users(UserKind::Client, &filter)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            h.backend.calls()[0].query,
            "isBlocked=false&_start=0&_end=10000"
        );
        assert!(export.filename.starts_with("clients_"));
        assert!(export.filename.ends_with(".csv"));
        assert_eq!(export.rows, 2);
        assert_eq!(export.content.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_export_empty_orders() {
        let h = signed_in();
        h.backend.reply(GET_ORDERS, list(json!([]), Some(0)));

        let all = OrderFilter::default();
        let export = h.client.export_orders(&all).await.unwrap();
        assert!(export.is_none());
    }
}
