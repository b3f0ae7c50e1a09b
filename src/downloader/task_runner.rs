// src/downloader/task_runner.rs

use super::task_processor::TaskProcessor;
use crate::{MirrorJobContext, constants, models::*, symbols, ui, utils};
use futures::{StreamExt, stream};
use indicatif::{HumanBytes, ProgressBar};

/// 并发执行一批下载任务，全部结束后才返回。单个任务失败不会影响其他任务。
pub async fn execute_tasks(context: &MirrorJobContext, tasks: &[DownloadTask]) {
    if tasks.is_empty() {
        return;
    }
    let limit = context.config.max_workers.map(|w| w.min(tasks.len()));
    let main_pbar = setup_progress_bar(tasks.len(), limit);

    stream::iter(tasks.iter().cloned())
        .for_each_concurrent(limit, |task| {
            run_single_concurrent_task(task, context.clone(), main_pbar.clone())
        })
        .await;

    main_pbar.finish_and_clear();
}

/// 在并发池中运行的单个任务单元。
async fn run_single_concurrent_task(
    task: DownloadTask,
    context: MirrorJobContext,
    main_pbar: ProgressBar,
) {
    ui::println_above(
        &main_pbar,
        &format!(
            "{} {} -> {}",
            *symbols::FETCH,
            utils::truncate_text(task.url.as_str(), constants::URL_TRUNCATE_LENGTH),
            task.destination.display()
        ),
    );

    let processor = TaskProcessor::new(context.clone());
    let result = processor.process(&task).await;

    if result.status.is_success() {
        context.manager.record_success(&result.reference);
        ui::println_above(
            &main_pbar,
            &format!(
                "{} {} ({})",
                *symbols::OK,
                task.destination.display(),
                HumanBytes(result.bytes_written)
            ),
        );
    } else {
        let detail = result.message.as_deref().unwrap_or_default();
        context
            .manager
            .record_failure(&result.reference, result.status, detail);
        let (symbol, color_fn, default_msg) = result.status.get_display_info();
        ui::println_above(
            &main_pbar,
            &format!(
                "{} {} {}",
                symbol,
                task.reference,
                color_fn(format!("失败: {} (详情: {})", default_msg, detail).into())
            ),
        );
    }
    main_pbar.inc(1);
}

fn setup_progress_bar(total: usize, limit: Option<usize>) -> ProgressBar {
    ui::plain("");
    let workers = limit.map_or_else(|| "不限".to_string(), |w| w.to_string());
    ui::info(&format!("开始下载 {} 个资源 (并发数: {})...", total, workers));
    ui::new_tasks_progress_bar(total as u64, "下载")
}
