//! Progress reporting for running analyses

use colored::Colorize;
use esg_application::{AnalysisBranch, AnalysisProgressNotifier};
use esg_domain::{EsgCategory, TaskId, TaskKind, TaskStatus};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;

/// Reports analysis progress with one bar per running task
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<String, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn branch_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisProgressNotifier for ProgressReporter {
    fn on_task_start(&self, task_id: &TaskId, kind: TaskKind, branch_count: usize) {
        let pb = self.multi.add(ProgressBar::new(branch_count as u64));
        pb.set_style(Self::branch_style());
        pb.set_prefix(kind.as_str().to_string());
        pb.set_message("starting...");

        self.bars
            .lock()
            .unwrap()
            .insert(task_id.as_str().to_string(), pb);
    }

    fn on_branch_complete(&self, task_id: &TaskId, branch: AnalysisBranch, success: bool) {
        if let Some(pb) = self.bars.lock().unwrap().get(task_id.as_str()) {
            let status = if success {
                format!("{} {}", "v".green(), branch)
            } else {
                format!("{} {}", "x".red(), branch)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_fallback(&self, task_id: &TaskId, category: EsgCategory) {
        if let Some(pb) = self.bars.lock().unwrap().get(task_id.as_str()) {
            pb.set_message(format!("{} {} fallback", "~".yellow(), category));
        }
    }

    fn on_task_complete(&self, task_id: &TaskId, status: TaskStatus) {
        if let Some(pb) = self.bars.lock().unwrap().remove(task_id.as_str()) {
            match status {
                TaskStatus::Completed => pb.finish_with_message("complete!".green().to_string()),
                TaskStatus::Failed => pb.finish_with_message("failed".red().to_string()),
                other => pb.finish_with_message(other.as_str().to_string()),
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl AnalysisProgressNotifier for SimpleProgress {
    fn on_task_start(&self, task_id: &TaskId, kind: TaskKind, branch_count: usize) {
        println!(
            "{} {} {} ({} branches)",
            "->".cyan(),
            task_id,
            kind.as_str().bold(),
            branch_count
        );
    }

    fn on_branch_complete(&self, _task_id: &TaskId, branch: AnalysisBranch, success: bool) {
        if success {
            println!("  {} {}", "v".green(), branch);
        } else {
            println!("  {} {} (failed)", "x".red(), branch);
        }
    }

    fn on_fallback(&self, _task_id: &TaskId, category: EsgCategory) {
        println!("  {} {} degraded to fallback scoring", "~".yellow(), category);
    }

    fn on_task_complete(&self, task_id: &TaskId, status: TaskStatus) {
        println!("{} {} {}", "<-".cyan(), task_id, status);
    }
}
