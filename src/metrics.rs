use anyhow::Result;
use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::time::Duration;

/// Metric name prefix for all Genrify metrics
const PREFIX: &str = "genrify";

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // Job Metrics
    pub static ref JOBS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_jobs_total"), "Total finished jobs by kind and outcome"),
        &["kind", "status"]
    ).expect("Failed to create jobs_total metric");

    pub static ref JOB_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_job_duration_seconds"),
            "Job duration in seconds"
        )
        .buckets(vec![0.1, 0.5, 1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 300.0]),
        &["kind"]
    ).expect("Failed to create job_duration_seconds metric");

    // Cache Metrics
    pub static ref CACHE_LOOKUPS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_cache_lookups_total"), "Stage memoization lookups"),
        &["stage", "result"]
    ).expect("Failed to create cache_lookups_total metric");

    // External Catalog Metrics
    pub static ref CATALOG_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_catalog_requests_total"), "Requests issued to the music catalog"),
        &["operation"]
    ).expect("Failed to create catalog_requests_total metric");

    // Playlist Metrics
    pub static ref PLAYLISTS_CREATED_TOTAL: Counter = Counter::new(
        format!("{PREFIX}_playlists_created_total"),
        "Total generated playlists created"
    ).expect("Failed to create playlists_created_total metric");

    pub static ref PLAYLISTS_DELETED_TOTAL: Counter = Counter::new(
        format!("{PREFIX}_playlists_deleted_total"),
        "Total generated playlists removed"
    ).expect("Failed to create playlists_deleted_total metric");
}

/// Initialize the metrics registry.
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(JOBS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(JOB_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(CACHE_LOOKUPS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(CATALOG_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(PLAYLISTS_CREATED_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(PLAYLISTS_DELETED_TOTAL.clone()));

    tracing::info!("Metrics system initialized successfully");
}

/// Render all registered metrics in the Prometheus text format.
pub fn gather_text() -> Result<String> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&REGISTRY.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

pub fn record_job_execution(kind: &str, status: &str, duration: Duration) {
    JOBS_TOTAL.with_label_values(&[kind, status]).inc();
    JOB_DURATION_SECONDS
        .with_label_values(&[kind])
        .observe(duration.as_secs_f64());
}

pub fn record_cache_lookup(stage: &str, hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    CACHE_LOOKUPS_TOTAL.with_label_values(&[stage, result]).inc();
}

pub fn record_catalog_request(operation: &str) {
    CATALOG_REQUESTS_TOTAL.with_label_values(&[operation]).inc();
}

pub fn record_playlist_created() {
    PLAYLISTS_CREATED_TOTAL.inc();
}

pub fn record_playlist_deleted() {
    PLAYLISTS_DELETED_TOTAL.inc();
}
