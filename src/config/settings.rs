// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含爬虫、队列和HTTP等所有配置项，启动后只读
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 爬虫配置
    pub crawler: CrawlerSettings,
    /// 队列配置
    pub queues: QueueSettings,
    /// HTTP配置
    pub http: HttpSettings,
}

/// 爬虫配置设置
#[derive(Debug, Deserialize)]
pub struct CrawlerSettings {
    /// 爬取上限，成功抓取达到该数量后触发关闭
    pub crawl_limit: u64,
    /// 工作器数量，进程生命周期内固定
    pub num_workers: usize,
    /// 每次抓取前的节流延迟（秒）
    pub crawl_delay_secs: u64,
    /// 种子任务标签
    pub seed_tag: String,
    /// 种子任务URL
    pub seed_url: String,
    /// 种子任务查询参数
    pub seed_params: Option<HashMap<String, String>>,
}

impl CrawlerSettings {
    /// 每次抓取前的节流延迟
    pub fn crawl_delay(&self) -> Duration {
        Duration::from_secs(self.crawl_delay_secs)
    }
}

/// 队列配置设置
///
/// 队列深度是内存占用与生产者/消费者解耦程度之间的权衡：
/// 太小导致生产者频繁阻塞，太大延迟关闭响应
#[derive(Debug, Deserialize)]
pub struct QueueSettings {
    /// 请求队列深度
    pub request_depth: usize,
    /// 响应队列深度
    pub response_depth: usize,
}

/// HTTP配置设置
#[derive(Debug, Deserialize)]
pub struct HttpSettings {
    /// 单次请求超时时间（秒）
    pub timeout_secs: u64,
}

impl HttpSettings {
    /// 单次请求超时时间
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量和可选配置文件加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default crawler settings
            .set_default("crawler.crawl_limit", 1)?
            .set_default("crawler.num_workers", 100)?
            .set_default("crawler.crawl_delay_secs", 0)?
            .set_default("crawler.seed_tag", "seed")?
            .set_default("crawler.seed_url", "http://example.com/")?
            // Default queue settings
            .set_default("queues.request_depth", 10)?
            .set_default("queues.response_depth", 15)?
            // Default HTTP settings
            .set_default("http.timeout_secs", 10)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SPIDERD").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
