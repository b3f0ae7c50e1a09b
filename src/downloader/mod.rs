// src/downloader/mod.rs

mod dispatcher;
mod job;
mod task_processor;
mod task_runner;

pub use dispatcher::{DispatchPlan, plan_tasks, resolve_destination, resolve_url};
pub use job::AssetMirror;
pub use task_processor::TaskProcessor;
pub use task_runner::execute_tasks;

// DownloadManager 是所有并发任务共享的统计中心
use crate::{
    models::{AssetReference, DownloadStatus, MirrorReport},
    symbols, ui,
};
use colored::*;
use itertools::Itertools;
use log::info;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct DownloadStats {
    pub total: usize,
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Clone)]
pub struct DownloadManager {
    stats: Arc<Mutex<DownloadStats>>,
    succeeded: Arc<Mutex<Vec<AssetReference>>>,
    failed_downloads: Arc<Mutex<Vec<FailedDownload>>>,
    skipped_downloads: Arc<Mutex<Vec<(AssetReference, String)>>>,
}

#[derive(Clone)]
struct FailedDownload {
    reference: AssetReference,
    reason: &'static str,
    detail: String,
}

impl Default for DownloadManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DownloadManager {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(Mutex::new(DownloadStats::default())),
            succeeded: Arc::new(Mutex::new(Vec::new())),
            failed_downloads: Arc::new(Mutex::new(Vec::new())),
            skipped_downloads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn start_batch(&self, total_tasks: usize) {
        info!("开始新一批下载任务，总数: {}", total_tasks);
        let mut stats = self.stats.lock().unwrap();
        *stats = DownloadStats {
            total: total_tasks,
            ..Default::default()
        };
        self.succeeded.lock().unwrap().clear();
        self.failed_downloads.lock().unwrap().clear();
        self.skipped_downloads.lock().unwrap().clear();
    }

    pub fn record_success(&self, reference: &AssetReference) {
        self.stats.lock().unwrap().success += 1;
        self.succeeded.lock().unwrap().push(reference.clone());
    }

    /// 跳过的引用不计入任务总数。
    pub fn record_skip(&self, reference: &AssetReference, reason: &str) {
        info!("跳过资源 '{}'，原因: {}", reference, reason);
        self.stats.lock().unwrap().skipped += 1;
        self.skipped_downloads
            .lock()
            .unwrap()
            .push((reference.clone(), reason.to_string()));
    }

    pub fn record_failure(&self, reference: &AssetReference, status: DownloadStatus, detail: &str) {
        log::error!("资源 '{}' 下载失败，状态: {:?}，详情: {}", reference, status, detail);
        self.stats.lock().unwrap().failed += 1;
        let (_, _, reason) = status.get_display_info();
        self.failed_downloads.lock().unwrap().push(FailedDownload {
            reference: reference.clone(),
            reason,
            detail: detail.to_string(),
        });
    }

    pub fn get_stats(&self) -> DownloadStats {
        self.stats.lock().unwrap().clone()
    }

    pub fn report(&self) -> MirrorReport {
        let mut report = MirrorReport {
            total: self.get_stats().total,
            succeeded: self.succeeded.lock().unwrap().clone(),
            failed: self
                .failed_downloads
                .lock()
                .unwrap()
                .iter()
                .map(|f| (f.reference.clone(), f.detail.clone()))
                .collect(),
            skipped: self.skipped_downloads.lock().unwrap().clone(),
        };
        report.succeeded.sort();
        report.failed.sort();
        report.skipped.sort();
        report
    }

    pub fn print_report(&self) {
        let stats = self.get_stats();
        let skipped = self.skipped_downloads.lock().unwrap();
        let failed = self.failed_downloads.lock().unwrap();
        info!(
            "下载报告: Total={}, Success={}, Skipped={}, Failed={}",
            stats.total, stats.success, stats.skipped, stats.failed
        );

        if !skipped.is_empty() || !failed.is_empty() {
            ui::print_sub_header("下载详情报告");
            if !skipped.is_empty() {
                println!("\n{} 跳过的资源 ({}个):", *symbols::INFO, stats.skipped);
                let items = skipped
                    .iter()
                    .map(|(reference, reason)| (reason.as_str(), reference.to_string()));
                print_grouped_report(items, |s| s.cyan());
            }
            if !failed.is_empty() {
                println!("\n{} 失败的资源 ({}个):", *symbols::ERROR, stats.failed);
                let items = failed
                    .iter()
                    .map(|f| (f.reason, format!("{} ({})", f.reference, f.detail)));
                print_grouped_report(items, |s| s.red());
            }
        }
        ui::print_sub_header("任务总结");
        if stats.failed == 0 {
            println!(
                "{} 所有 {} 个资源均已下载成功 ({} 个站外资源已跳过)。",
                *symbols::OK,
                stats.total,
                stats.skipped
            );
        } else {
            let summary = format!(
                "{} | {} | {}",
                format!("成功: {}", stats.success).green(),
                format!("失败: {}", stats.failed).red(),
                format!("跳过: {}", stats.skipped).yellow()
            );
            println!("{}", summary);
        }
    }
}

// 按原因分组打印
fn print_grouped_report<'a>(
    items: impl Iterator<Item = (&'a str, String)>,
    color_fn: fn(ColoredString) -> ColoredString,
) {
    let grouped = items.into_group_map();
    for reason in grouped.keys().sorted() {
        println!("  - {}", color_fn(format!("原因: {}", reason).into()));
        for entry in grouped[reason].iter().sorted() {
            println!("    - {}", entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_collects_report() {
        let manager = DownloadManager::new();
        manager.start_batch(3);
        manager.record_success(&"/b.png".into());
        manager.record_success(&"/a.png".into());
        manager.record_failure(&"/c.png".into(), DownloadStatus::HttpError, "404 Not Found");
        manager.record_skip(&"https://cdn.example.com/x.js".into(), "站外资源");

        let report = manager.report();
        assert!(!report.all_succeeded());
        assert_eq!(report.total, 3);
        assert_eq!(
            report.succeeded,
            vec![AssetReference::from("/a.png"), AssetReference::from("/b.png")]
        );
        assert_eq!(
            report.failed,
            vec![(AssetReference::from("/c.png"), "404 Not Found".to_string())]
        );
        assert_eq!(report.skipped.len(), 1);

        manager.start_batch(1);
        let report = manager.report();
        assert!(report.all_succeeded());
        assert!(report.succeeded.is_empty());
        assert!(report.skipped.is_empty());
    }
}
