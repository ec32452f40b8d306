// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 队列模块
///
/// 提供有界请求/响应队列
/// 负责生产者与消费者之间的解耦和背压
pub mod crawl_queue;

pub use crawl_queue::{CrawlQueue, QueueError};
