//! Prometheus metrics for the HTTP surface, the connection pool and the shop itself.

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, GaugeVec, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};

const NAMESPACE: &str = "gift_certificates";

/// Histogram upper bounds in seconds.
const LATENCY_BUCKETS: &[f64] = &[0.002, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5];

/// Every metric the service exports, registered against a private registry.
pub struct ShopMetrics {
    registry: Registry,
    requests: IntCounterVec,
    request_latency: HistogramVec,
    pool_connections: GaugeVec,
    orders_placed: IntCounter,
    order_cost: IntCounter,
    logins: IntCounterVec,
}

impl ShopMetrics {
    fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new_custom(Some(NAMESPACE.into()), None)?;

        let requests = IntCounterVec::new(
            Opts::new("http_requests_total", "Requests served, by route and status"),
            &["method", "route", "status"],
        )?;
        let request_latency = HistogramVec::new(
            HistogramOpts::new("http_request_duration_seconds", "Time to produce a response")
                .buckets(LATENCY_BUCKETS.to_vec()),
            &["method", "route"],
        )?;
        let pool_connections = GaugeVec::new(
            Opts::new("db_pool_connections", "Postgres pool connections"),
            &["state"],
        )?;
        let orders_placed = IntCounter::new("orders_placed_total", "Orders placed")?;
        let order_cost = IntCounter::new("order_cost_total", "Sum of order costs at purchase")?;
        let logins = IntCounterVec::new(
            Opts::new("logins_total", "Login attempts by outcome"),
            &["outcome"],
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(request_latency.clone()))?;
        registry.register(Box::new(pool_connections.clone()))?;
        registry.register(Box::new(orders_placed.clone()))?;
        registry.register(Box::new(order_cost.clone()))?;
        registry.register(Box::new(logins.clone()))?;

        Ok(Self {
            registry,
            requests,
            request_latency,
            pool_connections,
            orders_placed,
            order_cost,
            logins,
        })
    }
}

pub static METRICS: Lazy<ShopMetrics> =
    Lazy::new(|| ShopMetrics::new().expect("Failed to build metric definitions"));

/// Render the registry in the Prometheus text exposition format.
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&METRICS.registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

/// `route` is the matched route template (`/tags/{id}`), never the raw path.
pub fn record_http_request(method: &str, route: &str, status: u16, duration_secs: f64) {
    let status = status.to_string();
    METRICS
        .requests
        .with_label_values(&[method, route, status.as_str()])
        .inc();
    METRICS
        .request_latency
        .with_label_values(&[method, route])
        .observe(duration_secs);
}

pub fn update_db_pool_stats(idle: u32, active: u32, max: u32) {
    for (state, value) in [("idle", idle), ("active", active), ("max", max)] {
        METRICS
            .pool_connections
            .with_label_values(&[state])
            .set(f64::from(value));
    }
}

pub fn record_order_placed(cost: i32) {
    METRICS.orders_placed.inc();
    METRICS.order_cost.inc_by(u64::try_from(cost).unwrap_or(0));
}

pub fn record_login(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    METRICS.logins.with_label_values(&[outcome]).inc();
}
