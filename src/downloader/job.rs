// src/downloader/job.rs

use super::{dispatcher, task_runner};
use crate::{
    MirrorJobContext,
    error::*,
    extractor::AssetExtractor,
    models::{DownloadStatus, MirrorReport},
    page, symbols, ui,
};
use log::{debug, info};
use std::fs;

/// 一次完整的镜像流程：读取页面 → 提取引用 → 并发下载 → 汇总报告。
pub struct AssetMirror {
    pub(super) context: MirrorJobContext,
}

impl AssetMirror {
    pub fn new(context: MirrorJobContext) -> Self {
        Self { context }
    }

    pub async fn run(&self) -> AppResult<MirrorReport> {
        let config = &self.context.config;

        if config.fetch_page {
            page::fetch_page(
                &self.context.http_client,
                &config.base_url,
                &config.document_path,
            )
            .await?;
            ui::info(&format!(
                "已下载页面 {} -> \"{}\"",
                config.base_url,
                config.document_path.display()
            ));
        }

        let document = page::load_document(&config.document_path)?;
        let references = AssetExtractor::new(config.scan_inline_styles).extract(&document);
        ui::info(&format!(
            "在 \"{}\" 中找到 {} 个资源引用。",
            document.source().display(),
            references.len()
        ));

        let plan = dispatcher::plan_tasks(&references, &config.base_url, &config.output_root);
        debug!(
            "调度计划: {} 个任务, {} 个站外引用, {} 个无效引用, {} 个重复路径",
            plan.tasks.len(),
            plan.external.len(),
            plan.rejected.len(),
            plan.duplicates.len()
        );

        if config.dry_run {
            print_plan(&plan);
            return Ok(MirrorReport {
                total: plan.tasks.len(),
                ..Default::default()
            });
        }

        fs::create_dir_all(&config.output_root)?;
        let absolute_path = dunce::canonicalize(&config.output_root)?;
        info!("资源将保存到目录: \"{}\"", absolute_path.display());
        ui::info(&format!("资源将保存到目录: \"{}\"", absolute_path.display()));

        let manager = &self.context.manager;
        manager.start_batch(plan.tasks.len() + plan.rejected.len());
        for reference in &plan.external {
            manager.record_skip(reference, "站外资源，不做本地镜像");
        }
        for (reference, kept) in &plan.duplicates {
            manager.record_skip(reference, &format!("与 '{}' 映射到同一路径", kept));
        }
        for (reference, err) in &plan.rejected {
            manager.record_failure(reference, DownloadStatus::from(err), &err.to_string());
        }

        if plan.tasks.is_empty() {
            ui::warn("页面中没有需要下载的站内资源。");
        }
        task_runner::execute_tasks(&self.context, &plan.tasks).await;

        manager.print_report();
        Ok(manager.report())
    }
}

fn print_plan(plan: &dispatcher::DispatchPlan) {
    ui::print_sub_header(&format!("下载计划 (共 {} 个资源)", plan.tasks.len()));
    for task in &plan.tasks {
        println!("  {} {} -> {}", *symbols::FETCH, task.url, task.destination.display());
    }
    for reference in &plan.external {
        println!("  {} {} (站外资源，跳过)", *symbols::INFO, reference);
    }
    for (reference, kept) in &plan.duplicates {
        println!("  {} {} (与 '{}' 映射到同一路径，跳过)", *symbols::INFO, reference, kept);
    }
    for (reference, err) in &plan.rejected {
        println!("  {} {} ({})", *symbols::ERROR, reference, err);
    }
}
