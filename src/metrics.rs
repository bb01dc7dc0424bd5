use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // Pre-register counters so they appear even before the first increment.
    for mode in ["single", "name", "dataset"] {
        counter!("predictions_total", "mode" => mode).absolute(0);
    }
    counter!("players_not_found_total").absolute(0);
    counter!("recruitable_players_total").absolute(0);
    counter!("request_logs_written_total").absolute(0);
    counter!("request_logs_dropped_total").absolute(0);

    // Histogram is lazily created on first record; force creation.
    histogram!("inference_latency_seconds", "mode" => "single").record(0.0);

    handle
}

/// Handle backed by a recorder that is not installed globally.
///
/// Used where several routers live in one process, e.g. integration tests.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}
