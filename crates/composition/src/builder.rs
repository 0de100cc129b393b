//! 容器构建器

use crate::manifest_scanner::ManifestDiscovery;
use crate::runtime::AutowireRuntime;
use autowire_common::{ContainerError, ContainerResult, ServiceId};
use container_abstractions::{
    DeclarationCatalog, ManifestScanner, ScanOptions, ScanReport, ServiceContainer,
    ServiceRegistration,
};
use container_impl::{RegistryBuilder, ServiceContainerImpl};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// 容器构建器
///
/// 使用建造者模式组装容器: 收集服务声明, 可选地扫描清单树挑选
/// 要启用的服务, 冻结注册表并校验后产出运行时。
pub struct ContainerBuilder {
    /// 服务声明目录
    catalog: DeclarationCatalog,
    /// 清单根目录列表
    manifest_roots: Vec<PathBuf>,
    /// 清单扫描选项
    scan_options: ScanOptions,
    /// 是否在构建时校验注册表
    validation_enabled: bool,
    /// 是否启用日志初始化
    logging_enabled: bool,
    /// 日志配置
    logging_config: LoggingConfig,
}

impl std::fmt::Debug for ContainerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerBuilder")
            .field("declarations_count", &self.catalog.len())
            .field("manifest_roots", &self.manifest_roots)
            .field("scan_options", &self.scan_options)
            .field("validation_enabled", &self.validation_enabled)
            .field("logging_enabled", &self.logging_enabled)
            .finish()
    }
}

impl ContainerBuilder {
    /// 创建新的容器构建器
    pub fn new() -> Self {
        Self {
            catalog: DeclarationCatalog::new(),
            manifest_roots: Vec::new(),
            scan_options: ScanOptions::default(),
            validation_enabled: true,
            logging_enabled: false,
            logging_config: LoggingConfig::default(),
        }
    }

    /// 加入一条服务声明
    pub fn declare(mut self, registration: ServiceRegistration) -> Self {
        debug!("声明服务: {}", registration.id);
        self.catalog.add(registration);
        self
    }

    /// 合并一个声明目录
    pub fn with_catalog(mut self, catalog: DeclarationCatalog) -> Self {
        debug!("合并声明目录, 共 {} 条声明", catalog.len());
        self.catalog.merge(catalog);
        self
    }

    /// 添加清单根目录
    ///
    /// 配置了清单根目录后, 只有清单引用的服务会被注册; 未配置时
    /// 目录中的全部声明都被启用。
    pub fn add_manifest_root<P: AsRef<Path>>(mut self, path: P) -> ContainerResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ContainerError::bootstrap_failed(format!(
                "清单根目录不存在: {}",
                path.display()
            )));
        }

        info!("添加清单根目录: {}", path.display());
        self.manifest_roots.push(path.to_path_buf());
        Ok(self)
    }

    /// 设置清单扫描选项
    pub fn with_scan_options(mut self, options: ScanOptions) -> Self {
        self.scan_options = options;
        self
    }

    /// 启用或禁用构建时校验
    pub fn enable_validation(mut self, enabled: bool) -> Self {
        self.validation_enabled = enabled;
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = config;
        self.logging_enabled = true;
        self
    }

    /// 构建容器运行时
    pub fn build(self) -> ContainerResult<AutowireRuntime> {
        info!("开始构建容器");

        // 只有在明确配置了日志时才初始化日志
        if self.logging_enabled {
            self.initialize_logging()?;
        }

        // 发现阶段: 扫描清单树或启用全部声明
        let scanner = ManifestDiscovery::new();
        let mut reports: Vec<ScanReport> = Vec::new();
        let enabled: Vec<ServiceId> = if self.manifest_roots.is_empty() {
            info!("未配置清单根目录, 启用目录中全部 {} 条声明", self.catalog.len());
            self.catalog.ids()
        } else {
            let mut ids: Vec<ServiceId> = Vec::new();
            for root in &self.manifest_roots {
                let report = scanner.scan(root, &self.catalog, &self.scan_options)?;
                for id in &report.services_enabled {
                    if !ids.contains(id) {
                        ids.push(id.clone());
                    }
                }
                reports.push(report);
            }
            ids
        };

        // 注册阶段: 填充并冻结注册表
        let mut builder = RegistryBuilder::new();
        for id in &enabled {
            if let Some(registration) = self.catalog.get(id) {
                builder.insert(registration.clone());
            }
        }
        let container = ServiceContainerImpl::new(builder.freeze());

        // 校验阶段: 报告全部无法解析的依赖
        if self.validation_enabled {
            info!("开始校验注册表");
            if let Err(errors) = container.validate() {
                for problem in &errors {
                    error!("校验问题: {}", problem);
                }
                return Err(ContainerError::ValidationFailed {
                    count: errors.len(),
                });
            }
            info!("注册表校验通过");
        }

        let runtime = AutowireRuntime::new(container, reports);
        info!("容器构建完成");
        Ok(runtime)
    }

    /// 初始化日志系统
    fn initialize_logging(&self) -> ContainerResult<()> {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(self.logging_config.level)
            .with_target(self.logging_config.show_target)
            .with_thread_ids(self.logging_config.show_thread_ids)
            .with_file(self.logging_config.show_file)
            .with_line_number(self.logging_config.show_line_number);

        if self.logging_config.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| ContainerError::bootstrap_failed(format!("日志初始化失败: {}", e)))?;

        info!("日志系统初始化完成");
        Ok(())
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: tracing::Level,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }
}
