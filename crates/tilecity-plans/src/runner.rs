//! Executes plans against a map.
//!
//! Steps run in order. Each step becomes a [`StepReport`]; nothing a plan
//! does is an error. Unknown building names skip the affected step or spec,
//! a wait that runs out of time is reported as timed out, and a cancelled
//! runner stops after the step it was in.

use std::time::Duration;

use tilecity_core::construction::unfinished;
use tilecity_core::{BuildingKind, Catalog, CityMap, ConstructionDriver, RefreshHub};
use tilecity_data::EditorConfig;
use tilecity_region::{
    CancelToken, ClearReport, ExtractorReport, FillReport, Pacing, PlacementSpec, RegionEditor,
};
use tokio::time::Instant;

use crate::schema::{Area, AreaData, PlanData, SpecData, StepData};

/// Outcome of a wait-for-construction step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitReport {
    /// Unfinished buildings in the area when the wait began.
    pub pending_at_start: usize,
    /// Unfinished buildings when the wait ended.
    pub remaining: usize,
    pub polls: u32,
    pub waited: Duration,
    pub timed_out: bool,
    pub cancelled: bool,
}

/// Outcome of one plan step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepReport {
    Clear(ClearReport),
    Fill {
        report: FillReport,
        /// Spec building names that did not parse.
        unknown: Vec<String>,
    },
    Extractors(ExtractorReport),
    Wait(WaitReport),
    Skipped {
        step: &'static str,
        reason: String,
    },
}

impl StepReport {
    fn was_cancelled(&self) -> bool {
        match self {
            StepReport::Fill { report, .. } => report.cancelled,
            StepReport::Wait(wait) => wait.cancelled,
            _ => false,
        }
    }

    fn message(&self) -> Option<&str> {
        match self {
            StepReport::Clear(r) => r.message.as_deref(),
            StepReport::Fill { report, .. } => report.message.as_deref(),
            StepReport::Extractors(r) => r.message.as_deref(),
            StepReport::Skipped { reason, .. } => Some(reason),
            StepReport::Wait(_) => None,
        }
    }
}

/// Outcome of a plan run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanReport {
    pub name: String,
    pub steps: Vec<StepReport>,
    /// The run was cancelled before every step finished.
    pub cancelled: bool,
    /// One line for a toast notification.
    pub summary: String,
}

/// Runs plans against one map.
#[derive(Debug)]
pub struct PlanRunner<'a> {
    map: &'a mut CityMap,
    catalog: &'a Catalog,
    hub: &'a mut RefreshHub,
    driver: &'a mut dyn ConstructionDriver,
    config: EditorConfig,
    cancel: CancelToken,
}

impl<'a> PlanRunner<'a> {
    pub fn new(
        map: &'a mut CityMap,
        catalog: &'a Catalog,
        hub: &'a mut RefreshHub,
        driver: &'a mut dyn ConstructionDriver,
    ) -> Self {
        Self {
            map,
            catalog,
            hub,
            driver,
            config: EditorConfig::default(),
            cancel: CancelToken::new(),
        }
    }

    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// A handle that cancels this runner.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run every step of `plan` in order.
    pub async fn run(&mut self, plan: &PlanData) -> PlanReport {
        let mut steps = Vec::with_capacity(plan.steps.len());
        let mut cancelled = false;

        for (i, step) in plan.steps.iter().enumerate() {
            if self.cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            let report = self.run_step(step).await;
            tracing::info!(
                plan = %plan.name,
                step = i + 1,
                of = plan.steps.len(),
                kind = step.label(),
                message = report.message().unwrap_or(""),
                "plan step done"
            );
            let stop = report.was_cancelled();
            steps.push(report);
            self.hub.flush_frame();
            if stop {
                cancelled = true;
                break;
            }
        }

        let summary = summarize(plan.display_title(), &steps, cancelled);
        tracing::info!(plan = %plan.name, %summary, "plan finished");
        PlanReport {
            name: plan.name.clone(),
            steps,
            cancelled,
            summary,
        }
    }

    fn editor(&mut self) -> RegionEditor<'_> {
        RegionEditor::new(self.map, self.catalog, self.hub).with_options(self.config.editor_options())
    }

    async fn run_step(&mut self, step: &StepData) -> StepReport {
        match step {
            StepData::Clear { area } => {
                let target = area.resolve(self.map);
                let mut editor = self.editor();
                StepReport::Clear(match target {
                    Area::Region(region) => editor.clear_region(region),
                    Area::Strip(strip) => editor.clear_strip(strip),
                })
            }
            StepData::Fill {
                area,
                specs,
                interval_ms,
            } => self.fill(*area, specs, *interval_ms).await,
            StepData::Extractors {
                building,
                level,
                quantity,
            } => match building.parse::<BuildingKind>() {
                Ok(kind) => {
                    StepReport::Extractors(self.editor().place_extractors(kind, *level, *quantity))
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping extractor step");
                    StepReport::Skipped {
                        step: step.label(),
                        reason: e.to_string(),
                    }
                }
            },
            StepData::WaitForConstruction {
                area,
                max_wait_ms,
                poll_ms,
            } => StepReport::Wait(self.wait(*area, *max_wait_ms, *poll_ms).await),
        }
    }

    async fn fill(
        &mut self,
        area: AreaData,
        specs: &[SpecData],
        interval_ms: Option<u64>,
    ) -> StepReport {
        let mut unknown = Vec::new();
        let mut resolved = Vec::with_capacity(specs.len());
        for spec in specs {
            match spec.building.parse::<BuildingKind>() {
                Ok(kind) => {
                    let mut placement = PlacementSpec::new(kind, spec.count);
                    if let Some(level) = spec.level {
                        placement = placement.at_level(level);
                    }
                    resolved.push(placement);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping fill spec");
                    unknown.push(spec.building.clone());
                }
            }
        }

        let pacing = match interval_ms {
            Some(0) => None,
            Some(ms) => Some(Pacing::from_millis(ms)),
            None => self.config.pacing(),
        };
        let paced = pacing.and_then(|p| Some((area.region(self.map)?, p)));

        let report = match paced {
            Some((region, pacing)) => {
                let pacing = pacing.with_cancel(self.cancel.clone());
                self.editor()
                    .place_in_region_paced(region, &resolved, &pacing)
                    .await
            }
            None => {
                let target = area.resolve(self.map);
                let mut editor = self.editor();
                match target {
                    Area::Region(region) => editor.place_in_region(region, &resolved),
                    Area::Strip(strip) => editor.place_in_strip(strip, &resolved),
                }
            }
        };
        StepReport::Fill { report, unknown }
    }

    async fn wait(
        &mut self,
        area: AreaData,
        max_wait_ms: Option<u64>,
        poll_ms: Option<u64>,
    ) -> WaitReport {
        let max = max_wait_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| self.config.wait_max());
        let poll = poll_ms
            .map(|ms| Duration::from_millis(ms.max(1)))
            .unwrap_or_else(|| self.config.wait_poll());
        let region = area.region(self.map);
        let pending = |map: &CityMap| match region {
            Some(r) => unfinished(map, |p| r.contains(p)).len(),
            None => 0,
        };

        let start = Instant::now();
        let pending_at_start = pending(&*self.map);
        let mut report = WaitReport {
            pending_at_start,
            remaining: pending_at_start,
            polls: 0,
            waited: Duration::ZERO,
            timed_out: false,
            cancelled: false,
        };

        while report.remaining > 0 {
            let elapsed = start.elapsed();
            if elapsed >= max {
                report.timed_out = true;
                break;
            }
            tokio::select! {
                _ = tokio::time::sleep(poll.min(max - elapsed)) => {}
                _ = self.cancel.cancelled() => {
                    report.cancelled = true;
                    break;
                }
            }
            report.polls += 1;
            if self.driver.advance(self.map) > 0 {
                self.hub.grid_changed();
            }
            report.remaining = pending(&*self.map);
        }

        report.waited = start.elapsed();
        if report.timed_out {
            tracing::warn!(
                remaining = report.remaining,
                waited_ms = report.waited.as_millis() as u64,
                "construction still pending after wait"
            );
        }
        report
    }
}

/// Build the toast line for a finished run.
fn summarize(title: &str, steps: &[StepReport], cancelled: bool) -> String {
    let mut cleared = 0;
    let mut placed = 0;
    let mut requested = 0;
    let mut extractors = 0;
    let mut skipped = 0;
    let mut waits = Vec::new();
    let mut has = [false; 3];

    for step in steps {
        match step {
            StepReport::Clear(r) => {
                has[0] = true;
                cleared += r.cleared;
            }
            StepReport::Fill { report, unknown } => {
                has[1] = true;
                placed += report.total_placed();
                requested += report.total_requested();
                skipped += unknown.len() + report.unknown.len();
            }
            StepReport::Extractors(r) => {
                has[2] = true;
                extractors += r.placed;
            }
            StepReport::Wait(w) => waits.push(w),
            StepReport::Skipped { .. } => skipped += 1,
        }
    }

    let mut parts = Vec::new();
    if has[0] {
        parts.push(format!("cleared {cleared}"));
    }
    if has[1] {
        parts.push(format!("placed {placed} of {requested} buildings"));
    }
    if has[2] {
        parts.push(format!("{extractors} extractors"));
    }
    if !waits.is_empty() {
        let remaining: usize = waits.iter().map(|w| w.remaining).sum();
        if remaining == 0 {
            parts.push("construction complete".to_string());
        } else {
            parts.push(format!("{remaining} still under construction"));
        }
    }
    if skipped > 0 {
        parts.push(format!("{skipped} skipped"));
    }
    if let Some(message) = steps.iter().find_map(StepReport::message) {
        parts.push(format!("note: {message}"));
    }
    if cancelled {
        parts.push("cancelled".to_string());
    }

    if parts.is_empty() {
        format!("{title}: nothing to do")
    } else {
        format!("{title}: {}", parts.join(", "))
    }
}
