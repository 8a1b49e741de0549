//! Planning and running a full fetch.
//!
//! All targets are spawned up front and run in parallel; results are then
//! awaited one slot at a time so the printed order is always personal, work,
//! then extras in command-line order, regardless of which finishes first.

use std::io::Write;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::error::{FetchError, FetchResult};
use crate::fetcher::Fetcher;
use crate::target::{AccountAliases, ExtraCalendar, FetchTarget, SectionLabel};

pub const USAGE: &str =
    "Usage: fetch_events <personal_account> <work_account> <from> <to> [extra_calendar_ids...]";

/// Positional arguments of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub personal: String,
    pub work: String,
    pub from: String,
    pub to: String,
    pub extras: Vec<String>,
}

impl Invocation {
    /// Requires at least personal account, work account, from and to.
    pub fn from_args(args: &[String]) -> FetchResult<Self> {
        let [personal, work, from, to, extras @ ..] = args else {
            return Err(FetchError::Usage(USAGE.to_string()));
        };

        Ok(Invocation {
            personal: personal.clone(),
            work: work.clone(),
            from: from.clone(),
            to: to.clone(),
            extras: extras.to_vec(),
        })
    }

    /// Resolve every section to fetch. Malformed extras are collected in
    /// `skipped` instead of failing the run.
    pub fn plan(&self) -> FetchPlan {
        let aliases = AccountAliases::new(&self.personal, &self.work);

        let mut sections = vec![
            (SectionLabel::Personal, FetchTarget::primary(&self.personal, &self.from, &self.to)),
            (SectionLabel::Work, FetchTarget::primary(&self.work, &self.from, &self.to)),
        ];
        let mut skipped = Vec::new();

        for spec in &self.extras {
            match ExtraCalendar::parse(spec) {
                Ok(extra) => {
                    let target = extra.to_target(&aliases, &self.from, &self.to);
                    sections.push((extra.label(), target));
                }
                Err(e) => skipped.push(e),
            }
        }

        FetchPlan { sections, skipped }
    }
}

#[derive(Debug)]
pub struct FetchPlan {
    pub sections: Vec<(SectionLabel, FetchTarget)>,
    pub skipped: Vec<FetchError>,
}

/// Output of one section, in print order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOutput {
    pub label: SectionLabel,
    pub output: String,
}

impl FetchPlan {
    /// Spawn one task per section and return the handles in print order.
    pub fn spawn<F: Fetcher>(self, fetcher: Arc<F>) -> Vec<(SectionLabel, JoinHandle<String>)> {
        self.sections
            .into_iter()
            .map(|(label, target)| {
                let fetcher = Arc::clone(&fetcher);
                let handle = tokio::spawn(async move { fetcher.fetch(&target).await });
                (label, handle)
            })
            .collect()
    }
}

/// Wait for a spawned section. A task that panicked contributes empty output.
pub async fn collect(label: SectionLabel, handle: JoinHandle<String>) -> SectionOutput {
    let output = handle.await.unwrap_or_else(|e| {
        tracing::warn!(section = %label, error = %e, "fetch task did not complete");
        String::new()
    });
    SectionOutput { label, output }
}

/// Run a whole invocation: warnings go to `err`, sections to `out`.
pub async fn run<F, O, E>(
    invocation: &Invocation,
    fetcher: Arc<F>,
    out: &mut O,
    err: &mut E,
) -> FetchResult<()>
where
    F: Fetcher,
    O: Write,
    E: Write,
{
    let plan = invocation.plan();
    for skipped in &plan.skipped {
        writeln!(err, "Warning: {skipped}")?;
    }
    tracing::debug!(sections = plan.sections.len(), skipped = plan.skipped.len(), "fetch plan ready");

    for (label, handle) in plan.spawn(fetcher) {
        let section = collect(label, handle).await;
        writeln!(out, "{}", section.label.marker())?;
        writeln!(out, "{}", section.output)?;
    }
    out.flush()?;

    Ok(())
}
