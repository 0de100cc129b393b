//! 清单扫描抽象接口
//!
//! 发现输入是一棵清单文件树: 清单按标识符列出要启用的服务,
//! 构造细节始终留在代码侧的声明目录中。扫描一次性同步完成,
//! 失败即中止容器构建。

use crate::discovery::DeclarationCatalog;
use autowire_common::{DiscoveryResult, ServiceId};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// 清单扫描选项
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// 清单文件扩展名
    pub manifest_extension: String,
    /// 最大递归深度, `None` 表示不限
    pub max_depth: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            manifest_extension: "toml".to_string(),
            max_depth: None,
        }
    }
}

/// 扫描报告
///
/// 记录一次清单扫描的输入、产出与起止时间。
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// 被扫描的根目录
    pub root: PathBuf,
    /// 读取的清单文件数量
    pub manifests_read: usize,
    /// 启用的服务标识符, 按首次遇到的顺序 (重复引用已去除)
    pub services_enabled: Vec<ServiceId>,
    /// 扫描开始时间
    pub started_at: DateTime<Utc>,
    /// 扫描结束时间
    pub finished_at: DateTime<Utc>,
}

impl ScanReport {
    /// 扫描耗时
    pub fn duration(&self) -> Duration {
        self.finished_at - self.started_at
    }
}

/// 清单扫描器 trait
///
/// 递归遍历清单树, 对照声明目录校验每个被引用的标识符。根目录
/// 不存在、文件不可读、清单无法解析、引用了目录中不存在的服务,
/// 都以 [`autowire_common::DiscoveryError`] 终止扫描。
pub trait ManifestScanner: Send + Sync {
    /// 扫描一棵清单树
    fn scan(
        &self,
        root: &Path,
        catalog: &DeclarationCatalog,
        options: &ScanOptions,
    ) -> DiscoveryResult<ScanReport>;
}
