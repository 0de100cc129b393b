//! 构造器蓝图
//!
//! 描述一个服务的构造函数: 参数列表 (名称、声明类型、默认值) 与
//! 附着在参数上的能力收集标记。蓝图在注册时声明一次, 解析时按需
//! 读取, 从不缓存派生结果。

use crate::identifier::ServiceId;
use serde::{Deserialize, Serialize};

/// 构造参数的声明类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterKind {
    /// 声明为另一个服务
    Service(ServiceId),
    /// 声明为内建/原始类型, 不参与服务解析
    Builtin,
}

/// 构造参数规格
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// 参数名称
    pub name: String,
    /// 声明类型
    pub kind: ParameterKind,
    /// 声明的默认值, 解析失败前的最后回退
    pub default: Option<serde_json::Value>,
}

impl ParameterSpec {
    /// 声明一个服务类型参数
    pub fn service(name: impl Into<String>, dependency: impl Into<ServiceId>) -> Self {
        Self {
            name: name.into(),
            kind: ParameterKind::Service(dependency.into()),
            default: None,
        }
    }

    /// 声明一个内建类型参数
    pub fn builtin(name: impl Into<String>, default: Option<serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            kind: ParameterKind::Builtin,
            default,
        }
    }

    /// 附加默认值
    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }

    /// 是否声明了默认值
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// 能力收集请求
///
/// 声明某个构造参数应接收指定能力的全部实现者, 而不是单个依赖。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityRequest {
    /// 目标参数名称
    pub parameter: String,
    /// 请求收集的能力标识符
    pub capability: ServiceId,
}

impl CapabilityRequest {
    /// 创建能力收集请求
    pub fn new(parameter: impl Into<String>, capability: impl Into<ServiceId>) -> Self {
        Self {
            parameter: parameter.into(),
            capability: capability.into(),
        }
    }
}

/// 构造器蓝图
///
/// 参数保持声明顺序; 标记以参数名称为键, 指向不存在的参数名的
/// 标记永远不会匹配, 保持惰性。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstructorBlueprint {
    /// 构造参数, 按声明顺序
    pub parameters: Vec<ParameterSpec>,
    /// 附着在构造器上的能力收集标记
    pub markers: Vec<CapabilityRequest>,
}

impl ConstructorBlueprint {
    /// 创建蓝图
    pub fn new(parameters: Vec<ParameterSpec>, markers: Vec<CapabilityRequest>) -> Self {
        Self {
            parameters,
            markers,
        }
    }

    /// 没有任何构造参数的蓝图
    pub fn empty() -> Self {
        Self::default()
    }

    /// 查找指向指定参数的能力收集标记
    pub fn marker_for(&self, parameter: &str) -> Option<&CapabilityRequest> {
        self.markers
            .iter()
            .find(|marker| marker.parameter == parameter)
    }

    /// 是否为平凡构造 (无参数)
    pub fn is_trivial(&self) -> bool {
        self.parameters.is_empty()
    }
}
