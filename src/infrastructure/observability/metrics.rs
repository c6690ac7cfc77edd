//! Prometheus metrics for user operations

use std::sync::Arc;

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::config::MetricsConfig;

/// Handle for rendering the Prometheus exposition format. Serving it is
/// the embedding application's job.
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl PrometheusMetrics {
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Installs the global Prometheus recorder when metrics are enabled.
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(PrometheusMetrics {
            handle: Arc::new(handle),
        }),
        Err(e) => {
            tracing::error!("failed to install metrics recorder: {e}");
            None
        }
    }
}

pub(crate) fn record_user_created() {
    counter!("users_created_total").increment(1);
}

pub(crate) fn record_users_deleted(count: u64) {
    counter!("users_deleted_total").increment(count);
}

pub(crate) fn record_user_blocked() {
    counter!("users_blocked_total").increment(1);
}
