//! 清单发现实现
//!
//! 递归遍历清单树并对照声明目录启用服务。清单是 TOML 文件, 按
//! 标识符列出要启用的服务; 构造细节始终留在代码侧的声明目录中,
//! 清单只做选择。同一目录内按路径排序读取, 保证发现顺序确定。

use autowire_common::{DiscoveryError, DiscoveryResult, ServiceId};
use chrono::Utc;
use container_abstractions::{DeclarationCatalog, ManifestScanner, ScanOptions, ScanReport};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 清单文件结构
#[derive(Debug, Deserialize)]
struct ManifestFile {
    /// 要启用的服务标识符
    #[serde(default)]
    services: Vec<String>,
    /// 清单说明
    #[serde(default)]
    description: Option<String>,
}

/// 清单发现实现
#[derive(Debug, Default)]
pub struct ManifestDiscovery;

impl ManifestDiscovery {
    /// 创建清单发现实例
    pub fn new() -> Self {
        Self
    }

    fn walk(
        &self,
        dir: &Path,
        catalog: &DeclarationCatalog,
        options: &ScanOptions,
        depth: usize,
        enabled: &mut Vec<ServiceId>,
        manifests_read: &mut usize,
    ) -> DiscoveryResult<()> {
        if let Some(max) = options.max_depth {
            if depth > max {
                return Ok(());
            }
        }

        let mut paths: Vec<PathBuf> = Vec::new();
        let entries =
            std::fs::read_dir(dir).map_err(|e| DiscoveryError::DirectoryUnreadable {
                path: dir.display().to_string(),
                source: e,
            })?;
        for entry in entries {
            let entry = entry.map_err(|e| DiscoveryError::DirectoryUnreadable {
                path: dir.display().to_string(),
                source: e,
            })?;
            paths.push(entry.path());
        }
        paths.sort();

        for path in paths {
            if path.is_dir() {
                self.walk(&path, catalog, options, depth + 1, enabled, manifests_read)?;
            } else if path.extension().and_then(|e| e.to_str())
                == Some(options.manifest_extension.as_str())
            {
                self.read_manifest(&path, catalog, enabled)?;
                *manifests_read += 1;
            }
        }
        Ok(())
    }

    fn read_manifest(
        &self,
        path: &Path,
        catalog: &DeclarationCatalog,
        enabled: &mut Vec<ServiceId>,
    ) -> DiscoveryResult<()> {
        debug!("读取清单文件: {}", path.display());
        let content =
            std::fs::read_to_string(path).map_err(|e| DiscoveryError::ManifestUnreadable {
                path: path.display().to_string(),
                source: e,
            })?;
        let manifest: ManifestFile =
            toml::from_str(&content).map_err(|e| DiscoveryError::ManifestInvalid {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;
        if let Some(description) = &manifest.description {
            debug!("清单 {}: {}", path.display(), description);
        }

        for service in manifest.services {
            let id = ServiceId::new(service);
            if !catalog.contains(&id) {
                return Err(DiscoveryError::unknown_service(
                    path.display().to_string(),
                    id,
                ));
            }
            if enabled.contains(&id) {
                debug!("忽略重复引用的服务: {}", id);
            } else {
                enabled.push(id);
            }
        }
        Ok(())
    }
}

impl ManifestScanner for ManifestDiscovery {
    fn scan(
        &self,
        root: &Path,
        catalog: &DeclarationCatalog,
        options: &ScanOptions,
    ) -> DiscoveryResult<ScanReport> {
        let started_at = Utc::now();
        if !root.is_dir() {
            return Err(DiscoveryError::root_not_found(root.display().to_string()));
        }
        info!("开始扫描清单树: {}", root.display());

        let mut enabled: Vec<ServiceId> = Vec::new();
        let mut manifests_read = 0usize;
        self.walk(root, catalog, options, 0, &mut enabled, &mut manifests_read)?;

        let report = ScanReport {
            root: root.to_path_buf(),
            manifests_read,
            services_enabled: enabled,
            started_at,
            finished_at: Utc::now(),
        };
        info!(
            "清单扫描完成: {} 个清单, 启用 {} 个服务",
            report.manifests_read,
            report.services_enabled.len()
        );
        Ok(report)
    }
}
