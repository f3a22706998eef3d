//! Progress reporting

use crate::executor::ExecutionStats;
use crate::scanner::ProgressCallback;
use crate::types::SyncError;
use indicatif::{HumanBytes, HumanDuration, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::Path;
use std::time::{Duration, Instant};

/// Progress reporter for scan and copy phases
pub struct ProgressReporter {
    hidden: bool,
    scan_bar: ProgressBar,
    transfer_bar: ProgressBar,
    transfer_started_at: Option<Instant>,
    transferred_bytes: u64,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        Self::with_visibility(false)
    }

    /// Reporter whose bars draw nothing (tests, non-interactive runs)
    pub fn hidden() -> Self {
        Self::with_visibility(true)
    }

    fn with_visibility(hidden: bool) -> Self {
        Self {
            hidden,
            scan_bar: new_scan_bar(hidden),
            transfer_bar: new_transfer_bar(0, hidden),
            transfer_started_at: None,
            transferred_bytes: 0,
        }
    }

    /// Mark start of a scanning phase.
    pub fn start_scan(&mut self, label: &str, root: &Path) {
        self.scan_bar = new_scan_bar(self.hidden);
        if !self.hidden {
            self.scan_bar.enable_steady_tick(Duration::from_millis(120));
        }
        self.scan_bar
            .set_message(format!("Scanning {} \"{}\"...", label, root.display()));
    }

    /// Callback feeding scanner progress into the spinner.
    pub fn scan_callback(&self, label: &'static str) -> ProgressCallback {
        let bar = self.scan_bar.clone();
        Box::new(move |files: u64| bar.set_message(scan_message(label, files)))
    }

    /// Mark completion of a scanning phase.
    pub fn finish_scan(&self, label: &str, files: usize, elapsed: Duration) {
        self.scan_bar.finish_and_clear();
        self.scan_bar.suspend(|| {
            println!(
                "Done. {} files in {} ({})",
                files,
                label,
                HumanDuration(elapsed)
            )
        });
    }

    /// Initialize transfer phase progress.
    pub fn start_transfer(&mut self, total_files: u64) {
        self.transfer_started_at = Some(Instant::now());
        self.transferred_bytes = 0;
        self.transfer_bar = new_transfer_bar(total_files, self.hidden);
        self.transfer_bar.set_message("Starting copy...".to_string());
    }

    /// Update current file indicator.
    pub fn set_current_file(&self, path: &Path) {
        self.transfer_bar
            .set_message(format!("Working on \"{}\"", path.display()));
    }

    /// Mark one file copied and print its result line.
    pub fn complete_transfer_file(
        &mut self,
        index: usize,
        total: usize,
        path: &Path,
        destination: &Path,
        bytes: u64,
        elapsed: Duration,
    ) {
        self.transferred_bytes = self.transferred_bytes.saturating_add(bytes);
        self.transfer_bar.inc(1);
        self.transfer_bar.suspend(|| {
            println!(
                "{}",
                format_copied_line(index, total, path, destination, bytes, elapsed)
            )
        });

        let throughput = self.current_throughput_bps();
        self.transfer_bar.set_message(format!(
            "{} copied | {}/s",
            HumanBytes(self.transferred_bytes),
            HumanBytes(throughput)
        ));
    }

    /// Surface a per-file failure; the bar still advances.
    pub fn transfer_error(&self, index: usize, total: usize, error: &SyncError) {
        self.transfer_bar.inc(1);
        self.transfer_bar
            .suspend(|| eprintln!("{}", format_failure(index, total, error)));
    }

    /// Finalize transfer phase.
    pub fn finish_transfer(&self, stats: &ExecutionStats) {
        self.transfer_bar.finish_and_clear();
        let throughput = self.current_throughput_bps();
        self.transfer_bar.suspend(|| {
            println!(
                "All files have been processed: {} copied, {} failed | {} total | {}/s",
                stats.copied_files,
                stats.failed_files,
                HumanBytes(stats.bytes_copied),
                HumanBytes(throughput)
            )
        });
    }

    fn current_throughput_bps(&self) -> u64 {
        match self.transfer_started_at {
            Some(started) => {
                let secs = started.elapsed().as_secs_f64();
                if secs > 0.0 {
                    (self.transferred_bytes as f64 / secs) as u64
                } else {
                    0
                }
            }
            None => 0,
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn scan_message(label: &str, files: u64) -> String {
    format!("Scanning {}... {} files", label, files)
}

fn new_scan_bar(hidden: bool) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
    }
    if hidden {
        bar.set_draw_target(ProgressDrawTarget::hidden());
    }
    bar
}

fn new_transfer_bar(len: u64, hidden: bool) -> ProgressBar {
    let bar = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} files | {msg}")
    {
        bar.set_style(style.progress_chars("=>-"));
    }
    if hidden {
        bar.set_draw_target(ProgressDrawTarget::hidden());
    }
    bar
}

fn format_copied_line(
    index: usize,
    total: usize,
    path: &Path,
    destination: &Path,
    bytes: u64,
    elapsed: Duration,
) -> String {
    format!(
        "[{}/{}] File \"{}\" copied to \"{}\" ({} in {:.2?})",
        index,
        total,
        path.display(),
        destination.display(),
        HumanBytes(bytes),
        elapsed
    )
}

/// Failure report: file, progress, reason, both paths
pub fn format_failure(index: usize, total: usize, error: &SyncError) -> String {
    match error {
        SyncError::Copy {
            path,
            from,
            to,
            source,
        } => {
            format!(
                "[{}/{}] Failed to copy file \"{}\"!\n  Why: {}\n  path1: {}\n  path2: {}",
                index,
                total,
                path.display(),
                source,
                from.display(),
                to.display()
            )
        }
        other => format!("[{}/{}] {}", index, total, other),
    }
}
