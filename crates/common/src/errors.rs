//! 错误类型定义

use crate::identifier::ServiceId;
use thiserror::Error;

/// 服务发现错误类型
///
/// 发现阶段的错误是致命的: 容器构建被中止, 错误不会被重试。
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("扫描根目录不存在: {path}")]
    RootNotFound { path: String },

    #[error("目录读取失败: {path}, 原因: {source}")]
    DirectoryUnreadable {
        path: String,
        source: std::io::Error,
    },

    #[error("清单文件读取失败: {path}, 原因: {source}")]
    ManifestUnreadable {
        path: String,
        source: std::io::Error,
    },

    #[error("清单文件解析失败: {path}, 原因: {source}")]
    ManifestInvalid {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("清单文件 {path} 引用了目录中不存在的服务: {service}")]
    UnknownService { path: String, service: ServiceId },
}

impl DiscoveryError {
    /// 创建根目录不存在错误
    pub fn root_not_found(path: impl Into<String>) -> Self {
        Self::RootNotFound { path: path.into() }
    }

    /// 创建未知服务错误
    pub fn unknown_service(path: impl Into<String>, service: ServiceId) -> Self {
        Self::UnknownService {
            path: path.into(),
            service,
        }
    }
}

/// 服务解析错误类型
///
/// 每种失败条件对应唯一的类型化错误, 解析遇到第一个失败即中止,
/// 已构造的部分实例被丢弃, 不会泄漏到可用状态。
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("服务未注册: {service}")]
    ServiceNotFound { service: ServiceId },

    #[error("注册表与构造蓝图不一致: {service}, 详情: {detail}")]
    Descriptor { service: ServiceId, detail: String },

    #[error("服务 {service} 的构造参数 {parameter} 没有可用的解析策略")]
    UnresolvableParameter {
        service: ServiceId,
        parameter: String,
    },

    #[error("服务 {service} 的实例类型与期望类型 {expected} 不符")]
    TypeMismatch { service: ServiceId, expected: String },

    #[error("检测到循环依赖: {chain}")]
    CycleDetected { chain: String },

    #[error("服务 {service} 构造失败, 原因: {message}")]
    ConstructionFailed { service: ServiceId, message: String },

    #[error("构造参数 {parameter} 缺失或已被取出")]
    ArgumentMissing { parameter: String },

    #[error("构造参数 {parameter} 的值形态不符: 期望 {expected}")]
    ArgumentMismatch { parameter: String, expected: String },
}

impl ResolutionError {
    /// 创建服务未注册错误
    pub fn service_not_found(service: impl Into<ServiceId>) -> Self {
        Self::ServiceNotFound {
            service: service.into(),
        }
    }

    /// 创建注册表不一致错误
    pub fn descriptor(service: impl Into<ServiceId>, detail: impl Into<String>) -> Self {
        Self::Descriptor {
            service: service.into(),
            detail: detail.into(),
        }
    }

    /// 创建参数无法解析错误
    pub fn unresolvable_parameter(
        service: impl Into<ServiceId>,
        parameter: impl Into<String>,
    ) -> Self {
        Self::UnresolvableParameter {
            service: service.into(),
            parameter: parameter.into(),
        }
    }

    /// 创建类型不匹配错误
    pub fn type_mismatch(service: impl Into<ServiceId>, expected: impl Into<String>) -> Self {
        Self::TypeMismatch {
            service: service.into(),
            expected: expected.into(),
        }
    }

    /// 创建构造失败错误
    pub fn construction_failed(
        service: impl Into<ServiceId>,
        message: impl Into<String>,
    ) -> Self {
        Self::ConstructionFailed {
            service: service.into(),
            message: message.into(),
        }
    }

    /// 创建参数缺失错误
    pub fn argument_missing(parameter: impl Into<String>) -> Self {
        Self::ArgumentMissing {
            parameter: parameter.into(),
        }
    }

    /// 创建参数形态不符错误
    pub fn argument_mismatch(
        parameter: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::ArgumentMismatch {
            parameter: parameter.into(),
            expected: expected.into(),
        }
    }
}

/// 容器错误类型
///
/// 组合层使用的聚合错误, 覆盖发现、解析与引导三类失败。
#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("发现错误: {source}")]
    Discovery {
        #[from]
        source: DiscoveryError,
    },

    #[error("解析错误: {source}")]
    Resolution {
        #[from]
        source: ResolutionError,
    },

    #[error("容器引导失败: {message}")]
    BootstrapFailed { message: String },

    #[error("容器校验失败, 共 {count} 个问题")]
    ValidationFailed { count: usize },
}

impl ContainerError {
    /// 创建引导失败错误
    pub fn bootstrap_failed(message: impl Into<String>) -> Self {
        Self::BootstrapFailed {
            message: message.into(),
        }
    }
}

/// 结果类型别名
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;
pub type ResolutionResult<T> = Result<T, ResolutionError>;
pub type ContainerResult<T> = Result<T, ContainerError>;
