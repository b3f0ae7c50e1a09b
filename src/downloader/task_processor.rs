// src/downloader/task_processor.rs

use crate::{MirrorJobContext, error::*, models::*};
use futures::StreamExt;
use log::{debug, error};
use std::path::Path;
use tokio::{fs, io::AsyncWriteExt};

/// `TaskProcessor` 封装了处理单个下载任务的所有逻辑。
pub struct TaskProcessor {
    context: MirrorJobContext,
}

impl TaskProcessor {
    pub fn new(context: MirrorJobContext) -> Self {
        Self { context }
    }

    /// 处理单个任务。任何错误都在这里转换为失败结果，不会向上传播。
    pub async fn process(&self, task: &DownloadTask) -> DownloadResult {
        match self.download(task).await {
            Ok(bytes_written) => DownloadResult {
                reference: task.reference.clone(),
                destination: task.destination.clone(),
                status: DownloadStatus::Success,
                bytes_written,
                message: None,
            },
            Err(e) => {
                error!("处理任务 '{}' 时发生错误: {}", task.url, e);
                remove_partial_file(&task.destination).await;
                DownloadResult {
                    reference: task.reference.clone(),
                    destination: task.destination.clone(),
                    status: DownloadStatus::from(&e),
                    bytes_written: 0,
                    message: Some(e.to_string()),
                }
            }
        }
    }

    /// 边接收边写入目标文件，返回写入的字节数。
    async fn download(&self, task: &DownloadTask) -> AppResult<u64> {
        if let Some(parent) = task.destination.parent() {
            fs::create_dir_all(parent).await?;
        }

        let res = self.context.http_client.get(task.url.clone()).await?;

        let mut file = fs::File::create(&task.destination).await?;
        let mut written = 0u64;
        let mut stream = res.bytes_stream();
        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        drop(file);

        debug!("已写入 {} 字节到 {:?}", written, task.destination);
        Ok(written)
    }
}

// 清理失败任务留下的文件，删除失败时忽略
async fn remove_partial_file(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        debug!("清理文件 {:?} 未完成: {}", path, e);
    }
}
