// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// 爬取计数器
///
/// 记录成功抓取的URL数量，由多个工作器并发递增。
/// 计数器单调递增，永不回退。由于递增发生在多个工作器中，
/// 计数器最终值可能超出爬取上限，超出量以在途任务数为界，
/// 这是设计上接受的容差而非缺陷。
#[derive(Clone, Default)]
pub struct CrawlCounter {
    inner: Arc<AtomicU64>,
}

impl CrawlCounter {
    /// 创建新的计数器实例
    pub fn new() -> Self {
        Self::default()
    }

    /// 原子递增计数器，返回递增后的值
    pub fn increment(&self) -> u64 {
        self.inner.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// 读取当前计数
    pub fn get(&self) -> u64 {
        self.inner.load(Ordering::SeqCst)
    }
}

/// 一次性关闭信号
///
/// 进程级广播事件，所有长驻组件都持有一个克隆。
/// 信号一旦触发便永久保持触发状态，不可重置；
/// 并发触发是安全的，只有一次触发生效，其余为空操作。
#[derive(Clone)]
pub struct ShutdownSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownSignal {
    /// 创建未触发的关闭信号
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// 触发关闭信号
    ///
    /// # 返回值
    ///
    /// 若本次调用完成了状态切换则返回true，信号已触发时返回false
    pub fn raise(&self) -> bool {
        !self.tx.send_replace(true)
    }

    /// 查询信号是否已触发
    pub fn is_raised(&self) -> bool {
        *self.tx.borrow()
    }

    /// 等待信号触发
    ///
    /// 信号已触发时立即完成，可被任意数量的观察者重复等待
    pub async fn raised(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as self, so wait_for cannot fail here.
        let _ = rx.wait_for(|raised| *raised).await;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[test]
    fn test_counter_increments_monotonically() {
        let counter = CrawlCounter::new();
        assert_eq!(counter.get(), 0);
        assert_eq!(counter.increment(), 1);
        assert_eq!(counter.increment(), 2);
        assert_eq!(counter.get(), 2);
    }

    #[tokio::test]
    async fn test_counter_concurrent_increments() {
        let counter = CrawlCounter::new();
        let mut handles = Vec::new();
        for _ in 0..8 {
            let counter = counter.clone();
            handles.push(tokio::spawn(async move {
                for _ in 0..100 {
                    counter.increment();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(counter.get(), 800);
    }

    #[tokio::test]
    async fn test_shutdown_raise_is_idempotent() {
        let shutdown = ShutdownSignal::new();
        assert!(!shutdown.is_raised());
        assert!(shutdown.raise());
        assert!(!shutdown.raise());
        assert!(shutdown.is_raised());
    }

    #[tokio::test]
    async fn test_shutdown_concurrent_raise_single_transition() {
        let shutdown = ShutdownSignal::new();
        let mut handles = Vec::new();
        for _ in 0..16 {
            let shutdown = shutdown.clone();
            handles.push(tokio::spawn(async move { shutdown.raise() }));
        }
        let mut transitions = 0;
        for handle in handles {
            if handle.await.unwrap() {
                transitions += 1;
            }
        }
        assert_eq!(transitions, 1);
        assert!(shutdown.is_raised());
    }

    #[tokio::test]
    async fn test_raised_completes_after_raise() {
        let shutdown = ShutdownSignal::new();
        let waiter = {
            let shutdown = shutdown.clone();
            tokio::spawn(async move { shutdown.raised().await })
        };
        shutdown.raise();
        timeout(Duration::from_secs(1), waiter)
            .await
            .expect("raised() should complete after raise")
            .unwrap();

        // An already-raised signal completes immediately, repeatedly.
        timeout(Duration::from_millis(100), shutdown.raised())
            .await
            .expect("raised() should complete immediately when already raised");
        timeout(Duration::from_millis(100), shutdown.raised())
            .await
            .expect("raised state is permanent");
    }
}
