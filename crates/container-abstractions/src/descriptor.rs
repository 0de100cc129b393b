//! 构造器蓝图来源抽象接口

use autowire_common::{CapabilityRequest, ConstructorBlueprint, ResolutionResult, ServiceId};

/// 构造器蓝图来源 trait
///
/// 解析器按需读取蓝图, 每次调用重新派生, 从不缓存。标识符
/// 不在注册表中时返回 [`autowire_common::ResolutionError::Descriptor`]:
/// 解析入口已经验证过服务存在, 走到这里意味着注册表内部不一致。
pub trait DescriptorSource: Send + Sync {
    /// 读取服务的构造器蓝图
    fn describe(&self, id: &ServiceId) -> ResolutionResult<ConstructorBlueprint>;

    /// 读取附着在服务构造器上的能力收集标记
    fn collection_markers_of(&self, id: &ServiceId) -> ResolutionResult<Vec<CapabilityRequest>>;
}
