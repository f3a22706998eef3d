//! Main sync command

use crate::diff::{build_sync_plan, SyncPlan};
use crate::executor::{execute_plan, ExecutionEvent, ExecutionStats};
use crate::scanner::{scan_directory, ExtensionFilter};
use crate::types::{Inventory, SyncError};
use crate::ui::{AssumeYes, ProgressReporter, Prompter, Question, StdioPrompter};
use crate::Config;
use std::cell::RefCell;
use std::path::Path;
use tracing::info;

/// Where a run currently is
#[derive(Debug)]
pub enum SyncState {
    /// Nothing scanned yet
    Idle,
    /// Inventorying both roots
    Scanning,
    /// Comparing the two inventories
    Diffing {
        library: Inventory,
        mirror: Inventory,
    },
    /// Counts match, nothing to do
    Synced,
    /// Unsynced files found, waiting for the user
    AwaitingCopyDecision(SyncPlan),
    /// Copying the plan
    Copying(SyncPlan),
    /// Copy finished, waiting for a rescan decision
    AwaitingRescan,
    /// Run finished
    Done,
}

/// What a run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Scan/diff cycles performed
    pub cycles: usize,
    /// Files copied across all cycles
    pub copied_files: usize,
    /// Files that failed across all cycles
    pub failed_files: usize,
    /// Bytes copied across all cycles
    pub bytes_copied: u64,
    /// Plan from the last cycle
    pub last_plan: Option<SyncPlan>,
}

impl SyncOutcome {
    /// Whether the last scan found both sides synced
    pub fn synced(&self) -> bool {
        self.last_plan.as_ref().is_some_and(|plan| plan.synced)
    }

    fn record(&mut self, stats: &ExecutionStats) {
        self.copied_files += stats.copied_files;
        self.failed_files += stats.failed_files;
        self.bytes_copied += stats.bytes_copied;
    }
}

/// Run the sync operation with prompts on stdin/stdout (or `--yes`)
pub fn run(config: &Config) -> Result<SyncOutcome, SyncError> {
    if config.json {
        let plan = plan_report(config)?;
        println!("{}", plan.to_json().map_err(std::io::Error::from)?);
        return Ok(SyncOutcome {
            cycles: 1,
            last_plan: Some(plan),
            ..SyncOutcome::default()
        });
    }

    let mut reporter = ProgressReporter::new();
    if config.assume_yes {
        run_with(config, &mut AssumeYes::default(), &mut reporter)
    } else {
        run_with(config, &mut StdioPrompter::stdio(), &mut reporter)
    }
}

/// Scan both roots and build the plan without printing anything
pub fn plan_report(config: &Config) -> Result<SyncPlan, SyncError> {
    config.ensure_roots_exist()?;
    let filter = ExtensionFilter::from_config(config)?;
    let library = scan_directory(&config.library, &filter, None)?;
    let mirror = scan_directory(&config.mirror, &filter, None)?;
    Ok(build_sync_plan(&library, &mirror))
}

/// Drive the scan → diff → copy → rescan cycle until the user stops
///
/// Fails only when a root is missing (at startup or before a rescan) or the
/// configuration is invalid. Per-file copy failures are reported and counted.
pub fn run_with(
    config: &Config,
    prompter: &mut dyn Prompter,
    reporter: &mut ProgressReporter,
) -> Result<SyncOutcome, SyncError> {
    config.ensure_roots_exist()?;
    let filter = ExtensionFilter::from_config(config)?;

    let mut outcome = SyncOutcome::default();
    let mut state = SyncState::Idle;

    loop {
        state = match state {
            SyncState::Idle => SyncState::Scanning,
            SyncState::Scanning => {
                outcome.cycles += 1;
                info!("cycle {}: scanning", outcome.cycles);
                let library = scan_root(reporter, "library", &config.library, &filter)?;
                let mirror = scan_root(reporter, "mirror", &config.mirror, &filter)?;
                SyncState::Diffing { library, mirror }
            }
            SyncState::Diffing { library, mirror } => {
                let plan = build_sync_plan(&library, &mirror);
                outcome.last_plan = Some(plan.clone());
                let answer = if plan.synced { "YES" } else { "NO" };
                println!("Are both synced? {}", answer);

                if plan.synced {
                    SyncState::Synced
                } else if !plan.has_work() {
                    // Source is larger but every path already exists on the target
                    println!(
                        "Counts differ but no file is missing from the {}.",
                        plan.direction.target
                    );
                    SyncState::Done
                } else if config.dry_run {
                    println!("{} file(s) missing ({}):", plan.len(), plan.direction);
                    println!("{}", format_unsynced_list(&plan));
                    SyncState::Done
                } else {
                    SyncState::AwaitingCopyDecision(plan)
                }
            }
            SyncState::Synced => {
                println!("Looks like there's nothing to do here.");
                SyncState::Done
            }
            SyncState::AwaitingCopyDecision(plan) => {
                if prompter.confirm(Question::ShowUnsynced)? {
                    println!("\n{}\n", format_unsynced_list(&plan));
                }
                if prompter.confirm(Question::Copy(plan.direction))? {
                    SyncState::Copying(plan)
                } else {
                    SyncState::Done
                }
            }
            SyncState::Copying(plan) => {
                info!("copying {} file(s) {}", plan.len(), plan.direction);
                let stats = copy_plan(&plan, config, reporter);
                outcome.record(&stats);
                SyncState::AwaitingRescan
            }
            SyncState::AwaitingRescan => {
                if prompter.confirm(Question::Rescan)? {
                    // The mirror may have been unplugged in the meantime
                    config.ensure_roots_exist()?;
                    SyncState::Scanning
                } else {
                    SyncState::Done
                }
            }
            SyncState::Done => break,
        };
    }

    println!("Alright, take care!");
    Ok(outcome)
}

fn scan_root(
    reporter: &mut ProgressReporter,
    label: &'static str,
    root: &Path,
    filter: &ExtensionFilter,
) -> Result<Inventory, SyncError> {
    reporter.start_scan(label, root);
    let progress = reporter.scan_callback(label);
    let inventory = scan_directory(root, filter, Some(&progress))?;
    reporter.finish_scan(label, inventory.len(), inventory.scan_duration);
    Ok(inventory)
}

fn copy_plan(
    plan: &SyncPlan,
    config: &Config,
    reporter: &mut ProgressReporter,
) -> ExecutionStats {
    reporter.start_transfer(plan.len() as u64);

    let reporter = RefCell::new(reporter);
    let on_event = |event: &ExecutionEvent| {
        let mut progress = reporter.borrow_mut();
        match event {
            ExecutionEvent::FileStart { path, .. } => progress.set_current_file(path),
            ExecutionEvent::FileCopied {
                index,
                total,
                path,
                destination,
                bytes,
                elapsed,
            } => progress.complete_transfer_file(
                *index,
                *total,
                path,
                destination,
                *bytes,
                *elapsed,
            ),
            ExecutionEvent::FileFailed {
                index,
                total,
                error,
            } => progress.transfer_error(*index, *total, error),
            ExecutionEvent::Complete { stats } => progress.finish_transfer(stats),
        }
    };

    execute_plan(plan, config, Some(&on_event))
}

/// Numbered list of the files a plan would copy
pub fn format_unsynced_list(plan: &SyncPlan) -> String {
    plan.unsynced
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {}", i + 1, entry.path.display()))
        .collect::<Vec<_>>()
        .join("\n")
}
