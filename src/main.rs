// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use spiderd::config::settings::Settings;
use spiderd::control::{CrawlCounter, ShutdownSignal};
use spiderd::domain::models::job::CrawlJob;
use spiderd::engines::reqwest_engine::ReqwestEngine;
use spiderd::engines::traits::FetchEngine;
use spiderd::queue::CrawlQueue;
use spiderd::utils::telemetry;
use spiderd::workers::manager::WorkerManager;
use spiderd::workers::status_worker::{SignalStatusTrigger, StatusWorker};
use spiderd::workers::Worker;
use std::sync::Arc;
use tracing::{error, info};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件、注入种子任务并
/// 在关闭信号触发后排空所有工作器
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting spiderd...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Shared control state and queues
    let counter = CrawlCounter::new();
    let shutdown = ShutdownSignal::new();
    let request_queue: CrawlQueue<CrawlJob> = CrawlQueue::new(settings.queues.request_depth);
    let response_queue = CrawlQueue::new(settings.queues.response_depth);

    // 4. Status worker, reporting on SIGHUP
    let trigger = SignalStatusTrigger::new()?;
    let status_worker = StatusWorker::new(
        Box::new(trigger),
        request_queue.clone(),
        response_queue.clone(),
        counter.clone(),
        shutdown.clone(),
    );
    let status_handle = tokio::spawn(async move {
        if let Err(e) = status_worker.run().await {
            error!("Worker {} failed: {}", status_worker.name(), e);
        }
    });

    // 5. Seed job
    let params = settings.crawler.seed_params.clone().unwrap_or_default();
    let job = CrawlJob::new(&settings.crawler.seed_tag, &settings.crawler.seed_url, params);
    request_queue.enqueue(job).await?;

    // 6. Start collector and spider workers
    let engine: Arc<dyn FetchEngine> = Arc::new(ReqwestEngine);
    let mut manager = WorkerManager::new(
        engine,
        request_queue,
        response_queue,
        counter,
        shutdown,
        settings.crawler.crawl_limit,
        settings.crawler.crawl_delay(),
        settings.http.timeout(),
    );
    manager.start_collector();
    manager.start_workers(settings.crawler.num_workers);

    // 7. Two-phase shutdown: wait for the signal, then drain everyone
    manager.wait_for_shutdown().await;
    status_handle.await?;

    info!("spiderd shut down cleanly");
    Ok(())
}
