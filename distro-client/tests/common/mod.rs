//! Fake backend for integration tests
//!
//! An axum `Router` over in-memory zones, products, wallets and subsidy
//! orders, driven in-process
//! through `OneshotHttpClient`. Every request is counted by method and
//! path+query so tests can assert on network traffic.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};

use distro_client::session::{MemoryStorage, SessionStorage, SessionStore};
use distro_client::transport::OneshotHttpClient;
use distro_client::{Api, ClientConfig};
use shared::models::{
    Product, ProductStatusUpdate, Role, SubsidyOrder, SubsidyStatus, Wallet, Zone, ZoneCreate,
    ZoneUpdate,
};
use shared::{LoginRequest, LoginResponse, UserInfo};

pub const PASSWORD: &str = "secret";

type ApiError = (StatusCode, Json<Value>);

fn error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "message": message })))
}

#[derive(Default)]
struct BackendState {
    zones: BTreeMap<i64, Zone>,
    products: BTreeMap<i64, Product>,
    /// Keyed by distributor
    wallets: BTreeMap<i64, Wallet>,
    orders: BTreeMap<i64, SubsidyOrder>,
    next_id: i64,
    hits: HashMap<String, usize>,
    authorizations: Vec<Option<String>>,
    latency: Option<Duration>,
}

#[derive(Clone, Default)]
pub struct Backend {
    state: Arc<Mutex<BackendState>>,
}

impl Backend {
    /// Zones 1 "North", 2 "South"; products 10 (active), 11 (inactive);
    /// wallets of distributors 12 and 13 holding 100.00 each; order 500 of
    /// distributor 12 with a pending 15.00 subsidy
    pub fn seeded() -> Self {
        let backend = Self::default();
        {
            let mut state = backend.state.lock();
            for (id, name) in [(1, "North"), (2, "South")] {
                state.zones.insert(
                    id,
                    Zone {
                        id,
                        name: name.to_string(),
                        description: None,
                        distributor_id: None,
                    },
                );
            }
            for (id, code, active) in [(10, "SOAP-1", true), (11, "SOAP-2", false)] {
                state.products.insert(
                    id,
                    Product {
                        id,
                        code: code.to_string(),
                        name: format!("Soap {id}"),
                        price: Decimal::new(12550, 2),
                        unit: Some("box".to_string()),
                        is_active: active,
                    },
                );
            }
            for distributor_id in [12, 13] {
                state.wallets.insert(
                    distributor_id,
                    Wallet {
                        id: distributor_id + 1000,
                        distributor_id,
                        balance: Decimal::new(10000, 2),
                        credit_limit: Decimal::ZERO,
                        updated_at: None,
                    },
                );
            }
            state.orders.insert(
                500,
                SubsidyOrder {
                    id: 500,
                    order_number: "ORD-500".to_string(),
                    shop_id: 1,
                    distributor_id: 12,
                    total_amount: Decimal::new(20000, 2),
                    subsidy_amount: Decimal::new(1500, 2),
                    net_amount: Decimal::new(18500, 2),
                    subsidy_status: SubsidyStatus::PendingApproval,
                    rejection_reason: None,
                    created_at: Utc::now(),
                },
            );
            state.next_id = 100;
        }
        backend
    }

    /// Requests seen for `"METHOD /path?query"`
    pub fn hits(&self, request: &str) -> usize {
        self.state.lock().hits.get(request).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.state.lock().hits.values().sum()
    }

    /// Authorization header of the most recent request
    pub fn last_authorization(&self) -> Option<String> {
        self.state.lock().authorizations.last().cloned().flatten()
    }

    /// Delay every response (tokio time)
    pub fn set_latency(&self, latency: Duration) {
        self.state.lock().latency = Some(latency);
    }

    /// Change a zone behind the client's back
    pub fn rename_zone(&self, id: i64, name: &str) {
        if let Some(zone) = self.state.lock().zones.get_mut(&id) {
            zone.name = name.to_string();
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/auth/login", post(login))
            .route("/auth/me", get(me))
            .route("/zones", get(list_zones).post(create_zone))
            .route(
                "/zones/{id}",
                get(get_zone).put(update_zone).delete(delete_zone),
            )
            .route("/products", get(list_products))
            .route("/products/{id}/status", put(set_product_status))
            .route("/wallets/distributor/{id}", get(get_wallet))
            .route("/orders/{id}/approve-subsidy", post(approve_subsidy))
            .layer(middleware::from_fn_with_state(self.clone(), record))
            .with_state(self.clone())
    }

    /// Client over this backend with an in-memory session
    pub fn api(&self) -> Api {
        self.api_with_storage(Arc::new(MemoryStorage::new()))
    }

    pub fn api_with_storage(&self, storage: Arc<dyn SessionStorage>) -> Api {
        self.api_with(storage, ClientConfig::default())
    }

    pub fn api_with(&self, storage: Arc<dyn SessionStorage>, config: ClientConfig) -> Api {
        let session = SessionStore::hydrate(storage, config.session_key.clone());
        let transport = Arc::new(OneshotHttpClient::new(self.router()));
        Api::with_transport(transport, session, &config)
    }
}

async fn record(State(backend): State<Backend>, request: Request, next: Next) -> Response {
    let key = format!(
        "{} {}",
        request.method(),
        request
            .uri()
            .path_and_query()
            .map(|p| p.as_str())
            .unwrap_or("/")
    );
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let latency = {
        let mut state = backend.state.lock();
        *state.hits.entry(key).or_default() += 1;
        state.authorizations.push(authorization);
        state.latency
    };
    if let Some(latency) = latency {
        tokio::time::sleep(latency).await;
    }
    next.run(request).await
}

fn user_for(username: &str) -> Option<UserInfo> {
    let role = match username {
        "root" => Role::SuperAdmin,
        "admin" => Role::Admin,
        "dist.north" => Role::Distributor,
        "manager" => Role::Manager,
        _ => return None,
    };
    Some(UserInfo {
        id: 1,
        username: username.to_string(),
        name: None,
        email: None,
        role,
        distributor_id: (role == Role::Distributor).then_some(12),
    })
}

async fn login(Json(body): Json<LoginRequest>) -> Result<Json<LoginResponse>, ApiError> {
    match user_for(&body.username) {
        Some(user) if body.password == PASSWORD => Ok(Json(LoginResponse {
            token: format!("token-{}", body.username),
            user,
        })),
        _ => Err(error(StatusCode::UNAUTHORIZED, "Invalid credentials")),
    }
}

async fn me(headers: HeaderMap) -> Result<Json<UserInfo>, ApiError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer token-"))
        .and_then(user_for)
        .map(Json)
        .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Token expired"))
}

async fn list_zones(State(backend): State<Backend>) -> Json<Vec<Zone>> {
    Json(backend.state.lock().zones.values().cloned().collect())
}

async fn get_zone(State(backend): State<Backend>, Path(id): Path<i64>) -> Result<Json<Zone>, ApiError> {
    backend
        .state
        .lock()
        .zones
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Zone not found"))
}

async fn create_zone(
    State(backend): State<Backend>,
    Json(body): Json<ZoneCreate>,
) -> Result<(StatusCode, Json<Zone>), ApiError> {
    let mut state = backend.state.lock();
    if state.zones.values().any(|z| z.name == body.name) {
        return Err(error(StatusCode::CONFLICT, "Zone name already exists"));
    }
    state.next_id += 1;
    let zone = Zone {
        id: state.next_id,
        name: body.name,
        description: body.description,
        distributor_id: body.distributor_id,
    };
    state.zones.insert(zone.id, zone.clone());
    Ok((StatusCode::CREATED, Json(zone)))
}

async fn update_zone(
    State(backend): State<Backend>,
    Path(id): Path<i64>,
    Json(body): Json<ZoneUpdate>,
) -> Result<Json<Zone>, ApiError> {
    let mut state = backend.state.lock();
    let zone = state
        .zones
        .get_mut(&id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Zone not found"))?;
    if let Some(name) = body.name {
        zone.name = name;
    }
    if let Some(description) = body.description {
        zone.description = Some(description);
    }
    Ok(Json(zone.clone()))
}

async fn delete_zone(State(backend): State<Backend>, Path(id): Path<i64>) -> Response {
    match backend.state.lock().zones.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => error(StatusCode::NOT_FOUND, "Zone not found").into_response(),
    }
}

#[derive(Deserialize)]
struct ProductQuery {
    active_only: Option<bool>,
}

async fn list_products(
    State(backend): State<Backend>,
    Query(query): Query<ProductQuery>,
) -> Json<Vec<Product>> {
    let active_only = query.active_only.unwrap_or(false);
    Json(
        backend
            .state
            .lock()
            .products
            .values()
            .filter(|p| !active_only || p.is_active)
            .cloned()
            .collect(),
    )
}

async fn set_product_status(
    State(backend): State<Backend>,
    Path(id): Path<i64>,
    Json(body): Json<ProductStatusUpdate>,
) -> Result<Json<Product>, ApiError> {
    let mut state = backend.state.lock();
    let product = state
        .products
        .get_mut(&id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Product not found"))?;
    product.is_active = body.is_active;
    Ok(Json(product.clone()))
}

async fn get_wallet(
    State(backend): State<Backend>,
    Path(distributor_id): Path<i64>,
) -> Result<Json<Wallet>, ApiError> {
    backend
        .state
        .lock()
        .wallets
        .get(&distributor_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Wallet not found"))
}

/// Approve the subsidy and credit it to the distributor's wallet
async fn approve_subsidy(
    State(backend): State<Backend>,
    Path(id): Path<i64>,
) -> Result<Json<SubsidyOrder>, ApiError> {
    let mut state = backend.state.lock();
    let order = state
        .orders
        .get_mut(&id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Order not found"))?;
    if order.subsidy_status != SubsidyStatus::PendingApproval {
        return Err(error(StatusCode::CONFLICT, "Subsidy already reviewed"));
    }
    order.subsidy_status = SubsidyStatus::Approved;
    let order = order.clone();

    if let Some(wallet) = state.wallets.get_mut(&order.distributor_id) {
        wallet.balance += order.subsidy_amount;
    }
    Ok(Json(order))
}
