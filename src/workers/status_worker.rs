// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::control::{CrawlCounter, ShutdownSignal};
use crate::domain::models::job::{CrawlJob, CrawlResult};
use crate::queue::CrawlQueue;
use crate::utils::errors::WorkerError;
use crate::workers::worker::Worker;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

/// 状态触发源特质
///
/// 状态报告由外部事件驱动。生产环境使用SIGHUP信号，
/// 非信号环境（以及测试）可以替换为定时器或通道触发源。
#[async_trait]
pub trait StatusTrigger: Send {
    /// 等待下一次状态请求
    ///
    /// # 返回值
    ///
    /// * `Some(())` - 收到一次状态请求
    /// * `None` - 触发源已关闭
    async fn triggered(&mut self) -> Option<()>;
}

/// 基于SIGHUP的状态触发源
///
/// 信号在内核中最多挂起一个，突发的多次触发会被合并
#[cfg(unix)]
pub struct SignalStatusTrigger {
    signal: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl SignalStatusTrigger {
    /// 注册SIGHUP信号处理器
    pub fn new() -> Result<Self, WorkerError> {
        let signal = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::hangup())
            .map_err(|e| WorkerError::SignalError(e.to_string()))?;
        Ok(Self { signal })
    }
}

#[cfg(unix)]
#[async_trait]
impl StatusTrigger for SignalStatusTrigger {
    async fn triggered(&mut self) -> Option<()> {
        self.signal.recv().await
    }
}

/// 状态报告工作器
///
/// 响应外部状态请求，报告队列深度和爬取计数。
/// 只读观察，不改变任何共享状态，也不参与数据流。
pub struct StatusWorker {
    trigger: Mutex<Box<dyn StatusTrigger>>,
    request_queue: CrawlQueue<CrawlJob>,
    response_queue: CrawlQueue<CrawlResult>,
    counter: CrawlCounter,
    shutdown: ShutdownSignal,
}

impl StatusWorker {
    /// 创建新的状态报告工作器实例
    pub fn new(
        trigger: Box<dyn StatusTrigger>,
        request_queue: CrawlQueue<CrawlJob>,
        response_queue: CrawlQueue<CrawlResult>,
        counter: CrawlCounter,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            trigger: Mutex::new(trigger),
            request_queue,
            response_queue,
            counter,
            shutdown,
        }
    }
}

#[async_trait]
impl Worker for StatusWorker {
    /// 运行状态报告工作器
    async fn run(&self) -> Result<(), WorkerError> {
        info!("Status worker started");
        let mut trigger = self.trigger.lock().await;

        loop {
            tokio::select! {
                _ = self.shutdown.raised() => {
                    info!("Status worker received shutdown signal");
                    return Ok(());
                }
                event = trigger.triggered() => {
                    match event {
                        Some(()) => {
                            info!(
                                request_queue_len = self.request_queue.len(),
                                response_queue_len = self.response_queue.len(),
                                urls_crawled = self.counter.get(),
                                "Status report"
                            );
                        }
                        None => {
                            info!("Status trigger closed");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    fn name(&self) -> &str {
        "status"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    struct ChannelTrigger {
        rx: mpsc::Receiver<()>,
    }

    #[async_trait]
    impl StatusTrigger for ChannelTrigger {
        async fn triggered(&mut self) -> Option<()> {
            self.rx.recv().await
        }
    }

    fn build_worker(rx: mpsc::Receiver<()>, shutdown: ShutdownSignal) -> StatusWorker {
        StatusWorker::new(
            Box::new(ChannelTrigger { rx }),
            CrawlQueue::new(10),
            CrawlQueue::new(15),
            CrawlCounter::new(),
            shutdown,
        )
    }

    #[tokio::test]
    async fn test_status_worker_exits_on_shutdown() {
        let (_tx, rx) = mpsc::channel(1);
        let shutdown = ShutdownSignal::new();
        let worker = build_worker(rx, shutdown.clone());

        let handle = tokio::spawn(async move { worker.run().await });
        shutdown.raise();

        timeout(Duration::from_secs(1), handle)
            .await
            .expect("status worker should exit on shutdown")
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_status_worker_survives_triggers_then_exits() {
        let (tx, rx) = mpsc::channel(1);
        let shutdown = ShutdownSignal::new();
        let worker = build_worker(rx, shutdown.clone());

        let handle = tokio::spawn(async move { worker.run().await });
        tx.send(()).await.unwrap();
        tx.send(()).await.unwrap();
        shutdown.raise();

        timeout(Duration::from_secs(1), handle)
            .await
            .expect("status worker should exit after reports")
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_status_worker_exits_when_trigger_closes() {
        let (tx, rx) = mpsc::channel(1);
        let shutdown = ShutdownSignal::new();
        let worker = build_worker(rx, shutdown);

        let handle = tokio::spawn(async move { worker.run().await });
        drop(tx);

        timeout(Duration::from_secs(1), handle)
            .await
            .expect("status worker should exit when its trigger closes")
            .unwrap()
            .unwrap();
    }
}
