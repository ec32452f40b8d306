// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::control::{CrawlCounter, ShutdownSignal};
use crate::domain::models::job::CrawlResult;
use crate::queue::CrawlQueue;
use crate::utils::errors::WorkerError;
use crate::workers::worker::Worker;
use async_trait::async_trait;
use tracing::{debug, info};

/// 收集器
///
/// 响应队列的唯一消费者。对每个结果读取爬取计数器，
/// 达到上限时触发关闭信号。上限判定集中在这个单消费者阶段，
/// 避免多个工作器同时认为自己是触发者。
///
/// 判定条件为`>=`而非`==`：计数器由多个工作器并发递增，
/// 可能从L-1直接越过L，相等判定存在永不触发的风险。
/// 因此计数器最终值可能超过上限，超出量以在途任务数为界。
pub struct CollectorWorker {
    response_queue: CrawlQueue<CrawlResult>,
    counter: CrawlCounter,
    shutdown: ShutdownSignal,
    crawl_limit: u64,
}

impl CollectorWorker {
    /// 创建新的收集器实例
    pub fn new(
        response_queue: CrawlQueue<CrawlResult>,
        counter: CrawlCounter,
        shutdown: ShutdownSignal,
        crawl_limit: u64,
    ) -> Self {
        Self {
            response_queue,
            counter,
            shutdown,
            crawl_limit,
        }
    }
}

#[async_trait]
impl Worker for CollectorWorker {
    /// 运行收集器
    async fn run(&self) -> Result<(), WorkerError> {
        info!("Collector started, crawl limit {}", self.crawl_limit);

        while let Some(result) = self.response_queue.dequeue(&self.shutdown).await {
            let crawled = self.counter.get();
            if crawled >= self.crawl_limit && self.shutdown.raise() {
                info!(urls_crawled = crawled, "Crawl limit reached, shutting down");
            }
            // Dropping the result releases the response body.
            debug!(tag = %result.tag, "Crawl result consumed");
            drop(result);
        }

        info!("Collector received shutdown signal");
        Ok(())
    }

    fn name(&self) -> &str {
        "collector"
    }
}
