use super::job::{JobError, JobKind};
use super::pipeline::{CachedResults, GenrifyPipeline};
use super::status::{JobStatus, StatusReport};
use crate::analysis::{AnalysisTextGenerator, LibraryStatsAnalyzer};
use crate::cache::{CacheKeys, CacheStore};
use crate::catalog_client::{CatalogClientFactory, ClientCredentials};
use crate::genres::{GenreTaxonomy, StaticGenreTaxonomy};
use crate::metrics;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

/// Launches user pipelines in the background and tracks their status.
///
/// The status cell is the only coordination between a job and its pollers.
/// Two jobs for the same user may run at once; each overwrites the cell when
/// it finishes and the last writer wins.
pub struct JobOrchestrator {
    cache: Arc<dyn CacheStore>,
    client_factory: Arc<dyn CatalogClientFactory>,
    taxonomy: Arc<dyn GenreTaxonomy>,
    analyzer: Arc<dyn AnalysisTextGenerator>,
}

impl JobOrchestrator {
    pub fn new(cache: Arc<dyn CacheStore>, client_factory: Arc<dyn CatalogClientFactory>) -> Self {
        Self {
            cache,
            client_factory,
            taxonomy: Arc::new(StaticGenreTaxonomy::new()),
            analyzer: Arc::new(LibraryStatsAnalyzer::new()),
        }
    }

    pub fn with_taxonomy(mut self, taxonomy: Arc<dyn GenreTaxonomy>) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    pub fn with_analyzer(mut self, analyzer: Arc<dyn AnalysisTextGenerator>) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Mark the user's job as pending and run `kind` on a new task.
    ///
    /// Returns as soon as the task is spawned. The handle resolves to the
    /// terminal status that was written; callers are free to drop it. Must be
    /// called from within a tokio runtime.
    pub fn launch(
        &self,
        user_id: &str,
        credentials: ClientCredentials,
        kind: JobKind,
    ) -> Result<JoinHandle<JobStatus>, JobError> {
        let keys = CacheKeys::for_user(user_id);
        write_status(self.cache.as_ref(), &keys, &JobStatus::Pending)
            .map_err(JobError::StatusStore)?;

        let run_id = Uuid::new_v4();
        let span = info_span!("job", user_id = %user_id, kind = %kind, run_id = %run_id);
        info!(parent: &span, "Launching {} job", kind);

        let job = run_job(
            user_id.to_string(),
            credentials,
            kind,
            Arc::clone(&self.cache),
            Arc::clone(&self.client_factory),
            Arc::clone(&self.taxonomy),
            Arc::clone(&self.analyzer),
        )
        .instrument(span.clone());
        let cache = Arc::clone(&self.cache);

        let handle = tokio::spawn(async move {
            let start_time = Instant::now();
            // a panic in the job surfaces here as a JoinError
            let result = tokio::spawn(job).await;
            let elapsed = start_time.elapsed();

            let (status, status_label) = span.in_scope(|| match result {
                Ok(Ok(())) => {
                    info!("Job {} completed in {:?}", kind, elapsed);
                    (JobStatus::Completed, "completed")
                }
                Ok(Err(e)) => {
                    error!("Job {} failed after {:?}: {}", kind, elapsed, e);
                    (JobStatus::Error(e.to_string()), "error")
                }
                Err(e) => {
                    error!("Job {} panicked after {:?}: {}", kind, elapsed, e);
                    (JobStatus::Error(format!("Task panic: {}", e)), "panic")
                }
            });

            metrics::record_job_execution(kind.as_str(), status_label, elapsed);

            if let Err(e) = write_status(cache.as_ref(), &keys, &status) {
                error!(parent: &span, "Failed to record {} status: {}", kind, e);
            }
            status
        });

        Ok(handle)
    }

    /// Current status of the user's most recent job, `None` if none was ever
    /// launched.
    pub fn status(&self, user_id: &str) -> Result<Option<JobStatus>, JobError> {
        let value = self
            .cache
            .get(&CacheKeys::for_user(user_id).status())
            .map_err(JobError::StatusStore)?;
        Ok(value.map(|v| JobStatus::from_cache_value(&v)))
    }

    /// Poller-facing status, echoing `job_type` back once completed.
    pub fn check_status(
        &self,
        user_id: &str,
        job_type: Option<&str>,
    ) -> Result<Option<StatusReport>, JobError> {
        Ok(self
            .status(user_id)?
            .map(|status| status.report(job_type)))
    }

    pub fn results_for(&self, user_id: &str) -> CachedResults {
        CachedResults::new(Arc::clone(&self.cache), user_id)
    }
}

fn write_status(cache: &dyn CacheStore, keys: &CacheKeys, status: &JobStatus) -> anyhow::Result<()> {
    cache.set(&keys.status(), &status.to_cache_value())
}

async fn run_job(
    user_id: String,
    credentials: ClientCredentials,
    kind: JobKind,
    cache: Arc<dyn CacheStore>,
    client_factory: Arc<dyn CatalogClientFactory>,
    taxonomy: Arc<dyn GenreTaxonomy>,
    analyzer: Arc<dyn AnalysisTextGenerator>,
) -> Result<(), JobError> {
    let client = client_factory
        .client_for(&credentials)
        .map_err(JobError::ClientUnavailable)?;
    let pipeline = GenrifyPipeline::new(&user_id, cache, client, taxonomy, analyzer);

    pipeline.run(kind).await?;
    Ok(())
}
