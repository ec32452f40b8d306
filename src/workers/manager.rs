// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::control::{CrawlCounter, ShutdownSignal};
use crate::domain::models::job::{CrawlJob, CrawlResult};
use crate::engines::traits::FetchEngine;
use crate::queue::CrawlQueue;
use crate::workers::collector_worker::CollectorWorker;
use crate::workers::spider_worker::SpiderWorker;
use crate::workers::worker::Worker;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// 工作管理器
///
/// 负责构造并启动收集器和爬虫工作器，
/// 并在关闭信号触发后等待所有工作器退出。
/// 两阶段关闭（信号 → 排空）保证没有任务被中途抛弃。
pub struct WorkerManager {
    engine: Arc<dyn FetchEngine>,
    request_queue: CrawlQueue<CrawlJob>,
    response_queue: CrawlQueue<CrawlResult>,
    counter: CrawlCounter,
    shutdown: ShutdownSignal,
    crawl_limit: u64,
    crawl_delay: Duration,
    fetch_timeout: Duration,
    handles: Vec<JoinHandle<()>>,
}

impl WorkerManager {
    /// 创建新的工作管理器实例
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        engine: Arc<dyn FetchEngine>,
        request_queue: CrawlQueue<CrawlJob>,
        response_queue: CrawlQueue<CrawlResult>,
        counter: CrawlCounter,
        shutdown: ShutdownSignal,
        crawl_limit: u64,
        crawl_delay: Duration,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            engine,
            request_queue,
            response_queue,
            counter,
            shutdown,
            crawl_limit,
            crawl_delay,
            fetch_timeout,
            handles: Vec::new(),
        }
    }

    fn spawn<W>(&mut self, worker: W)
    where
        W: Worker + 'static,
    {
        // We spawn the worker loop on a separate task to avoid blocking the
        // loop that spawns workers.
        let handle = tokio::spawn(async move {
            if let Err(e) = worker.run().await {
                error!("Worker {} failed: {}", worker.name(), e);
            }
        });
        self.handles.push(handle);
    }

    /// 启动收集器
    ///
    /// 收集器是响应队列的唯一消费者，必须恰好启动一个
    pub fn start_collector(&mut self) {
        let collector = CollectorWorker::new(
            self.response_queue.clone(),
            self.counter.clone(),
            self.shutdown.clone(),
            self.crawl_limit,
        );
        self.spawn(collector);
    }

    /// 启动爬虫工作器
    ///
    /// 创建并启动指定数量的爬虫工作器，数量在进程生命周期内固定
    ///
    /// # 参数
    ///
    /// * `count` - 要启动的工作器数量
    pub fn start_workers(&mut self, count: usize) {
        for _ in 0..count {
            let worker = SpiderWorker::new(
                self.engine.clone(),
                self.request_queue.clone(),
                self.response_queue.clone(),
                self.counter.clone(),
                self.shutdown.clone(),
                self.crawl_delay,
                self.fetch_timeout,
            );
            self.spawn(worker);
        }
        info!("Started {} spider workers", count);
    }

    /// 等待关闭信号并排空工作器
    ///
    /// 阻塞直到关闭信号触发，然后逐个等待所有已启动的
    /// 工作器退出。在途抓取允许自然完成或失败，不会被中止。
    pub async fn wait_for_shutdown(&mut self) {
        self.shutdown.raised().await;
        info!("Shutdown signal received, draining workers...");

        for handle in self.handles.drain(..) {
            if let Err(e) = handle.await {
                error!("Worker task panicked: {}", e);
            }
        }

        info!("All workers drained");
    }
}
