// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供后台任务处理和工作器管理功能
/// 包括爬虫工作器、收集器、状态报告器和工作器生命周期管理
pub mod collector_worker;
pub mod manager;
pub mod spider_worker;
pub mod status_worker;
pub mod worker;

pub use worker::Worker;
