// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体：
/// - 爬取任务（CrawlJob）：管道中一个待抓取的工作单元
/// - 爬取结果（CrawlResult）：抓取成功后产生的结果
pub mod job;
