//! 活动日志后台 Worker
//!
//! 从 mpsc 通道消费 ActivityLogEntry，写入 ActivitySink。
//! 通道关闭时自动退出。

use shared::ActivityLogEntry;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::ActivitySink;

pub struct ActivityWorker {
    sink: Arc<dyn ActivitySink>,
}

impl ActivityWorker {
    pub fn new(sink: Arc<dyn ActivitySink>) -> Self {
        Self { sink }
    }

    /// 运行 worker（阻塞直到通道关闭）
    pub async fn run(self, mut rx: mpsc::Receiver<ActivityLogEntry>) {
        tracing::info!("Activity log worker started");

        while let Some(entry) = rx.recv().await {
            match self.sink.write(&entry).await {
                Ok(()) => {
                    tracing::debug!(section = %entry.section, "Activity entry recorded");
                }
                Err(e) => {
                    tracing::warn!(
                        section = %entry.section,
                        "Failed to write activity entry: {}",
                        e
                    );
                }
            }
        }

        tracing::info!("Activity log channel closed, worker stopping");
    }
}
