//! Admin API Client
//!
//! Typed access to the admin backend. Holds the session token, attaches it
//! to every protected request, caches reads with per-resource TTLs and turns
//! backend failures into operator-facing [`AdminError`]s.
//!
//! ## 401 handling
//! The first 401 on a route (`METHOD path`) is retried once with the held
//! token. A second 401 on the same route ends the session. A successful
//! retry clears the route's mark.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use http::StatusCode;
use kernel::id::{OrderId, UserId};
use platform::cache::{MemoryCache, ResponseCache};
use platform::clock::{Clock, SystemClock};
use platform::header;
use platform::token_store::{FileTokenStore, TokenStore};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use zeroize::Zeroizing;

use crate::application::config::AdminConfig;
use crate::application::session::{Session, SessionState};
use crate::domain::entity::stats::local_midnight;
use crate::domain::entity::{BlockRequest, Order, Page, StatsData, User};
use crate::domain::query::{OrderFilter, Pagination, QueryPairs, UserFilter, render_query};
use crate::domain::transport::{ApiRequest, ApiResponse, BackendTransport};
use crate::domain::value_object::UserKind;
use crate::error::{AdminError, AdminResult};
use crate::infra::dto::{
    ActionResponse, BlockUserBody, ConfirmCodeRequest, ConfirmCodeResponse, ErrorBody,
    SendCodeRequest, SendCodeResponse,
};
use crate::infra::endpoints;
use crate::infra::http::ReqwestTransport;

/// What a request acts on; selects the 404 message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Resource,
    UserCommand,
}

/// Admin backend client
pub struct AdminClient<T> {
    config: AdminConfig,
    transport: T,
    cache: Arc<dyn ResponseCache>,
    token_store: Arc<dyn TokenStore>,
    clock: Arc<dyn Clock>,
    session: Session,
}

impl AdminClient<ReqwestTransport> {
    /// Production wiring: reqwest transport, in-memory cache, token file
    /// at `config.token_path`, wall clock
    pub fn from_config(config: AdminConfig) -> AdminResult<Self> {
        let transport = ReqwestTransport::new(&config.api_url)?;
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let cache = Arc::new(MemoryCache::new(clock.clone()));
        let token_store = Arc::new(FileTokenStore::new(config.token_path.clone()));
        Self::new(config, transport, cache, token_store, clock)
    }
}

impl<T: BackendTransport> AdminClient<T> {
    /// Create a client, restoring a persisted token if one exists
    pub fn new(
        config: AdminConfig,
        transport: T,
        cache: Arc<dyn ResponseCache>,
        token_store: Arc<dyn TokenStore>,
        clock: Arc<dyn Clock>,
    ) -> AdminResult<Self> {
        let token = token_store.load()?;
        if token.is_some() {
            tracing::debug!("Restored persisted session token");
        }

        Ok(Self {
            config,
            transport,
            cache,
            token_store,
            clock,
            session: Session::new(token),
        })
    }

    /// Release cached state. The persisted token is kept for the next run.
    pub fn dispose(self) {
        self.cache.clear();
        tracing::debug!("Admin client disposed");
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session_state() == SessionState::Authenticated
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    // ------------------------------------------------------------------
    // Authentication
    // ------------------------------------------------------------------

    /// Ask the backend to text a sign-in code to `phone`
    ///
    /// Returns the code when a development backend echoes it.
    pub async fn send_sms_code(&self, phone: &str) -> AdminResult<Option<String>> {
        let phone = non_blank(phone, "Phone number")?;
        let body = to_body(&SendCodeRequest { phone })?;

        let response = self
            .execute_public(ApiRequest::post(endpoints::SEND_CODE).with_body(body))
            .await
            .map_err(|e| AdminError::SmsSendFailed(Box::new(e)))?;

        let reply: SendCodeResponse = serde_json::from_slice(&response.body).unwrap_or_default();
        tracing::info!(phone = %phone, "SMS code requested");
        Ok(reply.smscode)
    }

    /// Exchange the SMS code for a session token and persist it
    pub async fn confirm_sms_code(&self, phone: &str, code: &str) -> AdminResult<()> {
        let phone = non_blank(phone, "Phone number")?;
        let code = non_blank(code, "SMS code")?;

        self.confirm_inner(phone, code)
            .await
            .map_err(|e| AdminError::SmsConfirmFailed(Box::new(e)))?;

        tracing::info!(phone = %phone, "Signed in");
        Ok(())
    }

    async fn confirm_inner(&self, phone: &str, code: &str) -> AdminResult<()> {
        let body = to_body(&ConfirmCodeRequest {
            phone,
            smscode: code,
        })?;
        let response = self
            .execute_public(ApiRequest::post(endpoints::CONFIRM_CODE).with_body(body))
            .await?;

        let reply: ConfirmCodeResponse = decode(&response.body)?;
        let token = Zeroizing::new(reply.token);
        if token.trim().is_empty() {
            return Err(AdminError::Decode(
                "empty token in sign-in response".to_string(),
            ));
        }

        self.token_store.save(&token)?;
        // Nothing cached under a previous session may leak into this one
        self.session.clear();
        self.cache.clear();
        self.session.set_token(token);
        Ok(())
    }

    /// End the session. Safe to call when already signed out.
    pub fn logout(&self) {
        let had_token = self.session.clear();
        if let Err(e) = self.token_store.clear() {
            tracing::warn!(error = %e, "Failed to remove persisted token");
        }
        self.cache.clear();

        if had_token {
            tracing::info!("Signed out");
        } else {
            tracing::debug!("Logout without an active session");
        }
    }

    /// Probe whether the held token is still accepted
    ///
    /// ## Returns
    /// * `Ok(true)` - The backend accepted the token
    /// * `Ok(false)` - No token is held, or the session turned out expired
    /// * `Err(_)` - The probe failed for another reason (network, server)
    pub async fn validate_session(&self) -> AdminResult<bool> {
        if !self.is_authenticated() {
            return Ok(false);
        }

        let query = UserFilter::default()
            .with_page(Pagination::window(0, 1))
            .to_query();
        let probe = ApiRequest::get(endpoints::CLIENTS).with_query(query);

        match self.execute(probe, Target::Resource).await {
            Ok(_) => Ok(true),
            Err(AdminError::SessionExpired) => Ok(false),
            Err(e) => Err(e),
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub async fn get_clients(&self, filter: &UserFilter) -> AdminResult<Page<User>> {
        self.get_users(UserKind::Client, filter).await
    }

    pub async fn get_drivers(&self, filter: &UserFilter) -> AdminResult<Page<User>> {
        self.get_users(UserKind::Driver, filter).await
    }

    pub async fn get_users(&self, kind: UserKind, filter: &UserFilter) -> AdminResult<Page<User>> {
        filter.validate()?;
        let ttl = match kind {
            UserKind::Client => self.config.ttl.clients_list,
            UserKind::Driver => self.config.ttl.drivers_list,
        };
        self.cached_page(endpoints::users(kind), filter.to_query(), ttl)
            .await
    }

    pub async fn get_client(&self, id: &UserId) -> AdminResult<User> {
        self.get_user(UserKind::Client, id).await
    }

    pub async fn get_driver(&self, id: &UserId) -> AdminResult<User> {
        self.get_user(UserKind::Driver, id).await
    }

    pub async fn get_user(&self, kind: UserKind, id: &UserId) -> AdminResult<User> {
        let ttl = match kind {
            UserKind::Client => self.config.ttl.client,
            UserKind::Driver => self.config.ttl.driver,
        };
        self.cached_entity(&endpoints::user(kind, id.as_str())?, ttl)
            .await
    }

    pub async fn get_orders(&self, filter: &OrderFilter) -> AdminResult<Page<Order>> {
        filter.validate()?;
        self.cached_page(
            endpoints::ORDERS,
            filter.to_query(),
            self.config.ttl.orders_list,
        )
        .await
    }

    /// Orders of one user: `filter` with `clientId` or `driverId` set to `user_id`
    pub async fn get_user_orders(
        &self,
        user_id: &UserId,
        kind: UserKind,
        filter: &OrderFilter,
    ) -> AdminResult<Page<Order>> {
        let filter = filter.clone().for_user(user_id, kind);
        self.get_orders(&filter).await
    }

    pub async fn get_order(&self, id: &OrderId) -> AdminResult<Order> {
        self.cached_entity(&endpoints::order(id.as_str())?, self.config.ttl.order)
            .await
    }

    /// Dashboard statistics; never fails
    ///
    /// Tries the aggregate endpoint first. On any failure the figures are
    /// computed from bounded client, driver and order lists, and if those
    /// fail too the all-zero result is returned. Only the aggregate
    /// endpoint's result is cached under the statistics key.
    pub async fn get_stats(&self) -> StatsData {
        let key = cache_key(endpoints::STATS, &[]);
        if let Some(stats) = self.cached::<StatsData>(&key) {
            return stats;
        }

        match self.fetch_stats().await {
            Ok((stats, payload)) => {
                self.cache.set(&key, payload, self.config.ttl.stats);
                stats
            }
            Err(e) => {
                tracing::warn!(error = %e, "Statistics endpoint failed, computing from lists");
                match self.compute_stats().await {
                    Ok(stats) => stats,
                    Err(e) => {
                        tracing::error!(error = %e, "Statistics fallback failed, reporting zeros");
                        StatsData::default()
                    }
                }
            }
        }
    }

    async fn fetch_stats(&self) -> AdminResult<(StatsData, Value)> {
        let response = self
            .execute(ApiRequest::get(endpoints::STATS), Target::Resource)
            .await?;
        let payload: Value = decode(&response.body)?;
        let stats = from_value(payload.clone())?;
        Ok((stats, payload))
    }

    async fn compute_stats(&self) -> AdminResult<StatsData> {
        let window = Pagination::window(0, self.config.stats_fallback_limit);
        let users = UserFilter::default().with_page(window.clone());
        let orders = OrderFilter::default().with_page(window);

        let (clients, drivers, orders) = tokio::try_join!(
            self.get_clients(&users),
            self.get_drivers(&users),
            self.get_orders(&orders),
        )?;

        let today_start = local_midnight(self.now());
        Ok(StatsData::compute(
            &clients.data,
            &drivers.data,
            &orders.data,
            today_start,
        ))
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Block an account
    ///
    /// On success every cached client/driver list and both single-user
    /// entries of the account are evicted.
    pub async fn block_user(&self, request: &BlockRequest) -> AdminResult<ActionResponse> {
        request.validate(self.now())?;
        let body = to_body(&BlockUserBody::from(request))?;

        let response = self
            .execute(
                ApiRequest::post(endpoints::BLOCK_USER).with_body(body),
                Target::UserCommand,
            )
            .await?;
        self.invalidate_user(&request.user_id);

        tracing::info!(
            user_id = %request.user_id,
            blocked_until = ?request.blocked_until,
            "User blocked"
        );
        decode_action(&response.body)
    }

    pub async fn unblock_user(&self, user_id: &UserId) -> AdminResult<ActionResponse> {
        let response = self
            .execute(
                ApiRequest::put(endpoints::unblock_user(user_id.as_str())?),
                Target::UserCommand,
            )
            .await?;
        self.invalidate_user(user_id);

        tracing::info!(user_id = %user_id, "User unblocked");
        decode_action(&response.body)
    }

    /// Ask the backend to release every block whose expiry has passed
    pub async fn check_unblock(&self) -> AdminResult<ActionResponse> {
        let response = self
            .execute(ApiRequest::post(endpoints::CHECK_UNBLOCK), Target::Resource)
            .await?;

        // Any account may have changed
        let removed =
            self.cache.invalidate(endpoints::CLIENTS) + self.cache.invalidate(endpoints::DRIVERS);
        tracing::info!(removed, "Expired blocks released");
        decode_action(&response.body)
    }

    fn invalidate_user(&self, user_id: &UserId) {
        let mut removed = 0;
        for kind in UserKind::ALL {
            let list = cache_key(endpoints::users(kind), &[]);
            removed += self.cache.invalidate(&list);
            if let Ok(path) = endpoints::user(kind, user_id.as_str()) {
                removed += self.cache.invalidate(&cache_key(&path, &[]));
            }
        }
        tracing::debug!(user_id = %user_id, removed, "Cached user entries invalidated");
    }

    // ------------------------------------------------------------------
    // Cache
    // ------------------------------------------------------------------

    fn cached<V: DeserializeOwned>(&self, key: &str) -> Option<V> {
        let value = self.cache.get(key)?;
        match serde_json::from_value(value) {
            Ok(v) => {
                tracing::debug!(key = %key, "Cache hit");
                Some(v)
            }
            Err(e) => {
                tracing::debug!(key = %key, error = %e, "Discarding unreadable cache entry");
                self.cache.invalidate(key);
                None
            }
        }
    }

    async fn cached_page<E: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: QueryPairs,
        ttl: Duration,
    ) -> AdminResult<Page<E>> {
        let key = cache_key(endpoint, &query);
        if let Some(page) = self.cached::<Page<E>>(&key) {
            return Ok(page);
        }

        let response = self
            .execute(
                ApiRequest::get(endpoint).with_query(query),
                Target::Resource,
            )
            .await?;

        let total = header::total_count(&response.headers);
        if total.is_none() {
            tracing::warn!(endpoint = %endpoint, "No x-total-count header, total reported as 0");
        }

        let data: Value = decode(&response.body)?;
        let payload = json!({
            "data": data,
            "total": total.unwrap_or(0),
            "totalKnown": total.is_some(),
        });
        let page = from_value(payload.clone())?;
        self.cache.set(&key, payload, ttl);
        Ok(page)
    }

    async fn cached_entity<E: DeserializeOwned>(
        &self,
        path: &str,
        ttl: Duration,
    ) -> AdminResult<E> {
        let key = cache_key(path, &[]);
        if let Some(entity) = self.cached::<E>(&key) {
            return Ok(entity);
        }

        let request = ApiRequest::get(path);
        let response = self.execute(request, Target::Resource).await?;
        let payload: Value = decode(&response.body)?;
        let entity = from_value(payload.clone())?;
        self.cache.set(&key, payload, ttl);
        Ok(entity)
    }

    // ------------------------------------------------------------------
    // Request pipeline
    // ------------------------------------------------------------------

    /// Send a protected request
    ///
    /// Fails with [`AdminError::SessionExpired`] without sending anything
    /// when no token is held.
    async fn execute(&self, request: ApiRequest, target: Target) -> AdminResult<ApiResponse> {
        let token = self.session.token().ok_or(AdminError::SessionExpired)?;
        let request = ApiRequest {
            bearer: Some(token),
            ..request
        };

        let response = self.transport.send(&request).await?;
        let response = if response.status == StatusCode::UNAUTHORIZED {
            self.recover_unauthorized(request).await?
        } else {
            response
        };

        check_status(response, target)
    }

    /// Send a request that needs no session (sign-in)
    ///
    /// A 401 here is a rejected credential, not an expired session.
    async fn execute_public(&self, request: ApiRequest) -> AdminResult<ApiResponse> {
        let response = self.transport.send(&request).await?;
        check_status(response, Target::Resource)
    }

    async fn recover_unauthorized(&self, mut request: ApiRequest) -> AdminResult<ApiResponse> {
        let route = request.route_key();

        let Some(token) = self.session.token() else {
            tracing::warn!(route = %route, "401 with no token held");
            self.logout();
            return Err(AdminError::SessionExpired);
        };

        if !self.session.mark_retry(&route) {
            tracing::warn!(route = %route, "Repeated 401, ending session");
            self.logout();
            return Err(AdminError::SessionExpired);
        }

        tracing::debug!(route = %route, "401 received, retrying once");
        request.bearer = Some(token);

        match self.transport.send(&request).await {
            Ok(retry) if retry.status == StatusCode::UNAUTHORIZED => {
                tracing::warn!(route = %route, "401 after retry, ending session");
                self.logout();
                Err(AdminError::SessionExpired)
            }
            Ok(retry) => {
                self.session.clear_retry(&route);
                Ok(retry)
            }
            Err(e) => {
                self.session.clear_retry(&route);
                Err(e.into())
            }
        }
    }
}

/// Map a non-success status to the operator-facing error
fn check_status(response: ApiResponse, target: Target) -> AdminResult<ApiResponse> {
    if response.is_success() {
        return Ok(response);
    }

    let status = response.status;
    let message = ErrorBody::extract(&response.body);

    let error = match status {
        StatusCode::FORBIDDEN => AdminError::Forbidden,
        StatusCode::NOT_FOUND => match target {
            Target::UserCommand => AdminError::UserNotFound,
            Target::Resource => {
                AdminError::NotFound(message.unwrap_or_else(|| "Resource not found".to_string()))
            }
        },
        s if s.is_server_error() => AdminError::Server,
        s => AdminError::Rejected(
            message.unwrap_or_else(|| format!("Request failed with status {}", s.as_u16())),
        ),
    };
    Err(error)
}

/// `<endpoint>?<query>`
fn cache_key(endpoint: &str, query: &[(&'static str, String)]) -> String {
    format!("{}?{}", endpoint, render_query(query))
}

fn non_blank<'a>(value: &'a str, what: &str) -> AdminResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        let message = format!("{} must not be empty", what);
        Err(AdminError::InvalidInput(message))
    } else {
        Ok(trimmed)
    }
}

fn to_body<S: Serialize>(body: &S) -> AdminResult<Value> {
    serde_json::to_value(body).map_err(|e| AdminError::InvalidInput(e.to_string()))
}

fn decode<V: DeserializeOwned>(body: &[u8]) -> AdminResult<V> {
    serde_json::from_slice(body).map_err(|e| AdminError::Decode(e.to_string()))
}

fn from_value<V: DeserializeOwned>(value: Value) -> AdminResult<V> {
    serde_json::from_value(value).map_err(|e| AdminError::Decode(e.to_string()))
}

fn decode_action(body: &[u8]) -> AdminResult<ActionResponse> {
    if body.iter().all(u8::is_ascii_whitespace) {
        Ok(ActionResponse::default())
    } else {
        decode(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse::new(
            StatusCode::from_u16(status).unwrap(),
            body.as_bytes().to_vec(),
        )
    }

    #[test]
    fn test_cache_key_shape() {
        assert_eq!(cache_key("/admin/stats", &[]), "/admin/stats?");
        assert_eq!(
            cache_key("/admin/clients", &[("_start", "0".to_string())]),
            "/admin/clients?_start=0"
        );
    }

    #[test]
    fn test_check_status_mapping() {
        assert!(check_status(response(200, "[]"), Target::Resource).is_ok());

        assert!(matches!(
            check_status(response(403, ""), Target::Resource),
            Err(AdminError::Forbidden)
        ));
        assert!(matches!(
            check_status(response(404, ""), Target::UserCommand),
            Err(AdminError::UserNotFound)
        ));
        assert!(matches!(
            check_status(response(404, ""), Target::Resource),
            Err(AdminError::NotFound(m)) if m == "Resource not found"
        ));
        assert!(matches!(
            check_status(response(503, r#"{"message":"down"}"#), Target::Resource),
            Err(AdminError::Server)
        ));
        let rejected = response(400, r#"{"message":["reason must be a string"]}"#);
        assert!(matches!(
            check_status(rejected, Target::UserCommand),
            Err(AdminError::Rejected(m)) if m == "reason must be a string"
        ));
        assert!(matches!(
            check_status(response(409, "conflict"), Target::Resource),
            Err(AdminError::Rejected(m)) if m == "Request failed with status 409"
        ));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  +7701  ", "Phone").unwrap(), "+7701");
        assert!(matches!(
            non_blank(" ", "Phone"),
            Err(AdminError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_decode_action_allows_empty_body() {
        assert_eq!(decode_action(b"").unwrap(), ActionResponse::default());
        let action = decode_action(br#"{"message":"User blocked","userId":"u-1"}"#).unwrap();
        assert_eq!(action.message, "User blocked");
    }
}
