// Request metrics and Prometheus text exposition

use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::config::AppInfoConfig;

const BUCKET_COUNT: usize = 14;

/// Upper bounds, in seconds, of the latency histogram buckets
pub const LATENCY_BUCKETS: [f64; BUCKET_COUNT] = [
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Label set shared by the request counter and the latency histogram
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestLabels {
    pub method: String,
    pub endpoint: String,
    pub http_status: u16,
}

#[derive(Debug, Clone, Default)]
pub struct HistogramMetrics {
    /// Cumulative count per bucket, aligned with [`LATENCY_BUCKETS`]
    pub buckets: [u64; BUCKET_COUNT],
    pub count: u64,
    pub sum: f64,
}

impl HistogramMetrics {
    fn observe(&mut self, seconds: f64) {
        for (bound, bucket) in LATENCY_BUCKETS.iter().zip(self.buckets.iter_mut()) {
            if seconds <= *bound {
                *bucket += 1;
            }
        }
        self.count += 1;
        self.sum += seconds;
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestMetrics {
    pub requests_total: BTreeMap<RequestLabels, u64>,
    pub request_duration: BTreeMap<RequestLabels, HistogramMetrics>,
}

/// Process-wide metrics registry, shared through application state
#[derive(Debug)]
pub struct MetricsCollector {
    app_info: AppInfoConfig,
    request_metrics: RwLock<RequestMetrics>,
}

impl MetricsCollector {
    pub fn new(app_info: AppInfoConfig) -> Self {
        Self {
            app_info,
            request_metrics: RwLock::new(RequestMetrics::default()),
        }
    }

    /// Record a request completion
    pub async fn record_request(&self, labels: RequestLabels, duration: Duration) {
        let mut metrics = self.request_metrics.write().await;

        *metrics.requests_total.entry(labels.clone()).or_insert(0) += 1;
        metrics
            .request_duration
            .entry(labels)
            .or_default()
            .observe(duration.as_secs_f64());
    }

    pub async fn snapshot(&self) -> RequestMetrics {
        self.request_metrics.read().await.clone()
    }

    /// Export metrics in Prometheus text format
    pub async fn export_prometheus_metrics(&self) -> String {
        let snapshot = self.snapshot().await;
        let mut output = String::new();

        output.push_str(
            "# HELP app_version Application version and deployment config\n\
             # TYPE app_version gauge\n",
        );
        output.push_str(&format!(
            "app_version{{version=\"{}\",config=\"{}\"}} 1\n\n",
            escape_label(&self.app_info.version),
            escape_label(&self.app_info.environment)
        ));

        output.push_str(
            "# HELP http_requests_total Total HTTP Requests\n\
             # TYPE http_requests_total counter\n",
        );
        for (labels, count) in &snapshot.requests_total {
            output.push_str(&format!(
                "http_requests_total{{{}}} {}\n",
                render_labels(labels),
                count
            ));
        }
        output.push('\n');

        output.push_str(
            "# HELP http_request_duration_seconds HTTP request latency\n\
             # TYPE http_request_duration_seconds histogram\n",
        );
        for (labels, histogram) in &snapshot.request_duration {
            let rendered = render_labels(labels);
            for (bound, count) in LATENCY_BUCKETS.iter().zip(histogram.buckets.iter()) {
                output.push_str(&format!(
                    "http_request_duration_seconds_bucket{{{},le=\"{}\"}} {}\n",
                    rendered, bound, count
                ));
            }
            output.push_str(&format!(
                "http_request_duration_seconds_bucket{{{},le=\"+Inf\"}} {}\n",
                rendered, histogram.count
            ));
            output.push_str(&format!(
                "http_request_duration_seconds_sum{{{}}} {}\n",
                rendered, histogram.sum
            ));
            output.push_str(&format!(
                "http_request_duration_seconds_count{{{}}} {}\n",
                rendered, histogram.count
            ));
        }

        output
    }
}

fn render_labels(labels: &RequestLabels) -> String {
    format!(
        "method=\"{}\",endpoint=\"{}\",http_status=\"{}\"",
        escape_label(&labels.method),
        escape_label(&labels.endpoint),
        labels.http_status
    )
}

fn escape_label(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
