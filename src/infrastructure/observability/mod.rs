//! Observability infrastructure - Metrics

mod metrics;

pub use self::metrics::{
    PrometheusMetrics, create_metrics_router, init_metrics, record_engine_call,
    record_http_request,
};
