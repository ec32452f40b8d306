// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::control::ShutdownSignal;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use thiserror::Error;

/// 队列错误类型
#[derive(Error, Debug)]
pub enum QueueError {
    /// 队列已关闭
    #[error("Queue closed")]
    Closed,
}

/// 有界爬取队列
///
/// 基于tokio mpsc通道的先进先出有界队列。接收端由互斥锁保护，
/// 允许多个工作器共享同一个消费端。容量在构造时固定：
/// 队列满时入队阻塞（背压），队列空时出队阻塞，
/// 直到有元素可取或关闭信号触发。
pub struct CrawlQueue<T> {
    tx: mpsc::Sender<T>,
    rx: Arc<Mutex<mpsc::Receiver<T>>>,
}

impl<T> Clone for CrawlQueue<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            rx: self.rx.clone(),
        }
    }
}

impl<T: Send> CrawlQueue<T> {
    /// 创建指定容量的队列
    pub fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        Self {
            tx,
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// 入队一个元素
    ///
    /// 队列满时等待，直到有空位。这是限制生产者
    /// 领先于消费者程度的背压机制。
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 入队成功
    /// * `Err(QueueError::Closed)` - 队列已关闭
    pub async fn enqueue(&self, item: T) -> Result<(), QueueError> {
        self.tx.send(item).await.map_err(|_| QueueError::Closed)
    }

    /// 出队一个元素
    ///
    /// 等待直到有元素可取或关闭信号触发。
    /// 两个条件同时就绪时选择哪个分支是不确定的。
    ///
    /// # 返回值
    ///
    /// * `Some(item)` - 出队的元素
    /// * `None` - 关闭信号已触发或队列已关闭
    pub async fn dequeue(&self, shutdown: &ShutdownSignal) -> Option<T> {
        let mut rx = self.rx.lock().await;
        tokio::select! {
            _ = shutdown.raised() => None,
            item = rx.recv() => item,
        }
    }

    /// 当前队列深度
    ///
    /// 仅用于状态报告，读取瞬时值
    pub fn len(&self) -> usize {
        self.tx.max_capacity() - self.tx.capacity()
    }

    /// 队列是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
