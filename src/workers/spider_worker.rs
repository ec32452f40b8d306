// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::control::{CrawlCounter, ShutdownSignal};
use crate::domain::models::job::{CrawlJob, CrawlResult};
use crate::engines::traits::{FetchEngine, FetchRequest};
use crate::queue::CrawlQueue;
use crate::utils::errors::WorkerError;
use crate::workers::worker::Worker;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 爬虫工作器
///
/// 从请求队列拉取任务，调用抓取引擎，抓取成功后递增
/// 计数器并将结果转发到响应队列。传输错误和非成功响应
/// 在本地记录日志后丢弃任务，不重试也不上抛。
pub struct SpiderWorker {
    engine: Arc<dyn FetchEngine>,
    request_queue: CrawlQueue<CrawlJob>,
    response_queue: CrawlQueue<CrawlResult>,
    counter: CrawlCounter,
    shutdown: ShutdownSignal,
    crawl_delay: Duration,
    fetch_timeout: Duration,
    worker_id: Uuid,
}

impl SpiderWorker {
    /// 创建新的爬虫工作器实例
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        engine: Arc<dyn FetchEngine>,
        request_queue: CrawlQueue<CrawlJob>,
        response_queue: CrawlQueue<CrawlResult>,
        counter: CrawlCounter,
        shutdown: ShutdownSignal,
        crawl_delay: Duration,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            engine,
            request_queue,
            response_queue,
            counter,
            shutdown,
            crawl_delay,
            fetch_timeout,
            worker_id: Uuid::new_v4(),
        }
    }

    /// 处理单个爬取任务
    ///
    /// 关闭信号只在循环顶部被观察，在途抓取允许完成
    async fn process_job(&self, job: CrawlJob) {
        if !self.crawl_delay.is_zero() {
            sleep(self.crawl_delay).await;
        }

        let CrawlJob {
            tag,
            url,
            user_agent,
            params,
        } = job;
        let request = FetchRequest {
            url,
            user_agent,
            params,
            timeout: self.fetch_timeout,
        };

        let response = match self.engine.fetch(&request).await {
            Ok(resp) => resp,
            Err(e) => {
                warn!(tag = %tag, url = %request.url, "Request error: {}", e);
                return;
            }
        };

        if !response.is_ok() {
            warn!(
                tag = %tag,
                url = %request.url,
                status = response.status_code,
                "Response is not ok"
            );
            return;
        }

        let crawled = self.counter.increment();
        debug!(tag = %tag, urls_crawled = crawled, "Fetch succeeded");

        let result = CrawlResult::new(tag, response);
        tokio::select! {
            _ = self.shutdown.raised() => {
                debug!("Shutting down, result discarded");
            }
            sent = self.response_queue.enqueue(result) => {
                if sent.is_err() {
                    warn!("Response queue closed, result discarded");
                }
            }
        }
    }
}

#[async_trait]
impl Worker for SpiderWorker {
    /// 运行爬虫工作器
    async fn run(&self) -> Result<(), WorkerError> {
        info!("Spider worker {} started", self.worker_id);

        while let Some(job) = self.request_queue.dequeue(&self.shutdown).await {
            self.process_job(job).await;
        }

        info!("Spider worker {} received shutdown signal", self.worker_id);
        Ok(())
    }

    fn name(&self) -> &str {
        "spider"
    }
}
