use crate::core::report::ResultReporter;
use crate::core::{Pipeline, SyncOutcome};
use crate::utils::error::Result;
use std::io::Write;

pub struct SyncEngine<P: Pipeline> {
    pipeline: P,
    dry_run: bool,
}

impl<P: Pipeline> SyncEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// fetching → building → submitting → reporting，任一階段失敗即中止
    pub async fn run<W: Write>(&self, out: W) -> Result<SyncOutcome> {
        let mut out = out;

        tracing::info!("🔍 Fetching records...");
        let records = self.pipeline.extract().await?;
        tracing::info!("Fetched {} records", records.len());
        writeln!(out, "Synchronising {} entries", records.len())?;

        tracing::info!("🔧 Building batch request...");
        let request = self.pipeline.transform(records).await?;

        if self.dry_run {
            let entries = request.entries.len();
            tracing::info!("Dry run enabled, skipping submission");
            writeln!(
                out,
                "Dry run: {} entries would be submitted to list {}",
                entries, request.list_id
            )?;
            return Ok(SyncOutcome::DryRun { entries });
        }

        tracing::info!(
            "📤 Submitting {} entries to list {}",
            request.entries.len(),
            request.list_id
        );
        let response = self.pipeline.load(request).await?;

        tracing::info!("📊 Reporting results...");
        let mut reporter = ResultReporter::new(out);
        reporter.report(&response)?;

        if response.error_count > 0 {
            tracing::warn!(
                "⚠️ {} subscribers were rejected by Mailchimp",
                response.error_count
            );
        }
        tracing::info!("✅ Sync completed");

        Ok(SyncOutcome::Submitted(response))
    }
}
