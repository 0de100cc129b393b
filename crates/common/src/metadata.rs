//! 元数据定义
//!
//! 提供服务与类型的元数据信息

use crate::identifier::ServiceId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::any::TypeId;

/// 类型信息
///
/// 记录注册时捕获的具体 Rust 类型, 构造后的实例会与它做
/// 精确比对。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 完整类型名称
    pub name: String,
    /// 类型ID
    pub id: TypeId,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: 'static>() -> Self {
        Self {
            name: std::any::type_name::<T>().to_string(),
            id: TypeId::of::<T>(),
        }
    }

    /// 获取简短的类型名称 (不包含模块路径)
    pub fn short_name(&self) -> &str {
        self.name.split("::").last().unwrap_or(&self.name)
    }
}

/// 服务元数据
///
/// 注册表对外的诊断视图, 不携带构造函数本身。
#[derive(Debug, Clone, Serialize)]
pub struct ServiceMetadata {
    /// 服务标识符
    pub id: ServiceId,
    /// 注册的具体类型名称
    pub type_name: String,
    /// 声明满足的能力
    pub capabilities: Vec<ServiceId>,
    /// 构造参数数量
    pub parameter_count: usize,
    /// 能力收集标记数量
    pub collection_markers: usize,
    /// 注册时间
    pub registered_at: DateTime<Utc>,
}

impl ServiceMetadata {
    /// 创建服务元数据
    pub fn new(
        id: ServiceId,
        type_name: impl Into<String>,
        capabilities: Vec<ServiceId>,
        parameter_count: usize,
        collection_markers: usize,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            type_name: type_name.into(),
            capabilities,
            parameter_count,
            collection_markers,
            registered_at,
        }
    }
}
