// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::FetchResponse;
use crate::utils::user_agent;
use std::collections::HashMap;
use tracing::{debug, info};

/// 爬取任务
///
/// 表示请求队列中的一个待抓取工作单元。任务入队后不可变，
/// 由且仅由一个爬虫工作器消费一次。
#[derive(Debug, Clone)]
pub struct CrawlJob {
    /// 来源标签，用于日志追踪
    pub tag: String,
    /// 目标URL
    pub url: String,
    /// 本次请求使用的User-Agent
    pub user_agent: String,
    /// 查询参数
    pub params: HashMap<String, String>,
}

impl CrawlJob {
    /// 创建新的爬取任务
    ///
    /// User-Agent在创建时从池中随机选取
    pub fn new(tag: &str, url: &str, params: HashMap<String, String>) -> Self {
        info!(tag = %tag, url = %url, "Crawl job created");
        Self {
            tag: tag.to_string(),
            url: url.to_string(),
            user_agent: user_agent::random_user_agent(),
            params,
        }
    }
}

/// 爬取结果
///
/// 由爬虫工作器在抓取成功后创建，由收集器消费一次。
/// 响应体随结果一起被移动，收集器丢弃结果即释放资源。
#[derive(Debug)]
pub struct CrawlResult {
    /// 来源标签，与任务的标签一致
    pub tag: String,
    /// 抓取到的响应
    pub response: FetchResponse,
}

impl CrawlResult {
    pub fn new(tag: String, response: FetchResponse) -> Self {
        debug!(tag = %tag, status = response.status_code, "Crawl result created");
        Self { tag, response }
    }
}
