//! 容器运行时
//!
//! 构建完成后的容器门面: 持有冻结的容器实例与发现阶段的扫描
//! 报告, 并提供运行状况摘要。容器没有启动/停止生命周期, 实例
//! 的生命周期完全由调用方持有。

use crate::builder::ContainerBuilder;
use autowire_common::{BoxedInstance, ResolutionResult, ServiceId, ServiceMetadata};
use chrono::{DateTime, Duration, Utc};
use container_abstractions::{ContainerExt, ScanReport, ServiceContainer};
use container_impl::ServiceContainerImpl;
use serde::Serialize;
use std::sync::Arc;

/// 容器运行时
pub struct AutowireRuntime {
    /// 容器实例
    container: Arc<ServiceContainerImpl>,
    /// 发现阶段的扫描报告
    scan_reports: Vec<ScanReport>,
    /// 构建完成时间
    built_at: DateTime<Utc>,
}

impl std::fmt::Debug for AutowireRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutowireRuntime")
            .field("registered_services", &self.container.stats().registered_services)
            .field("scan_reports_count", &self.scan_reports.len())
            .field("built_at", &self.built_at)
            .finish()
    }
}

impl AutowireRuntime {
    /// 创建容器构建器
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    pub(crate) fn new(container: ServiceContainerImpl, scan_reports: Vec<ScanReport>) -> Self {
        Self {
            container: Arc::new(container),
            scan_reports,
            built_at: Utc::now(),
        }
    }

    /// 获取容器引用
    pub fn container(&self) -> &ServiceContainerImpl {
        &self.container
    }

    /// 获取可跨线程共享的容器句柄
    pub fn shared_container(&self) -> Arc<ServiceContainerImpl> {
        Arc::clone(&self.container)
    }

    /// 解析指定标识符的服务
    pub fn get(&self, id: &ServiceId) -> ResolutionResult<BoxedInstance> {
        self.container.get(id)
    }

    /// 解析服务并向下转型到具体类型
    pub fn get_as<T: 'static>(&self, id: &ServiceId) -> ResolutionResult<Box<T>> {
        self.container.get_as::<T>(id)
    }

    /// 获取发现阶段的扫描报告
    pub fn scan_reports(&self) -> &[ScanReport] {
        &self.scan_reports
    }

    /// 获取全部已注册服务的元数据
    pub fn registered_services(&self) -> Vec<ServiceMetadata> {
        self.container.registered_services()
    }

    /// 构建完成时间
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// 构建完成后经过的时间
    pub fn uptime(&self) -> Duration {
        Utc::now() - self.built_at
    }

    /// 生成运行状况摘要
    pub fn summary(&self) -> RuntimeSummary {
        let stats = self.container.stats();
        RuntimeSummary {
            built_at: self.built_at,
            uptime_seconds: self.uptime().num_seconds(),
            registered_services: stats.registered_services,
            manifest_roots_scanned: self.scan_reports.len(),
            resolutions_attempted: stats.resolutions_attempted,
            resolutions_succeeded: stats.resolutions_succeeded,
            resolutions_failed: stats.resolutions_failed,
        }
    }
}

/// 运行状况摘要
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeSummary {
    /// 构建完成时间
    pub built_at: DateTime<Utc>,
    /// 构建完成后经过的秒数
    pub uptime_seconds: i64,
    /// 已注册的服务数量
    pub registered_services: usize,
    /// 扫描过的清单根目录数量
    pub manifest_roots_scanned: usize,
    /// 发起的解析次数
    pub resolutions_attempted: u64,
    /// 成功的解析次数
    pub resolutions_succeeded: u64,
    /// 失败的解析次数
    pub resolutions_failed: u64,
}
