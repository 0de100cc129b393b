//! 服务容器抽象接口

use autowire_common::{
    BoxedInstance, ResolutionError, ResolutionResult, ServiceId, ServiceMetadata,
};
use serde::Serialize;

/// 服务容器 trait
///
/// 系统其余部分需要的唯一操作是 [`Self::get`]; 其余方法是围绕
/// 冻结注册表的查询与诊断。该 trait 保持对象安全, 类型化的便捷
/// 访问见 [`ContainerExt`]。
pub trait ServiceContainer: Send + Sync {
    /// 解析指定标识符的服务及其完整依赖图
    ///
    /// 标识符未注册时以 [`ResolutionError::ServiceNotFound`] 失败,
    /// 此时不会构造任何实例。
    fn get(&self, id: &ServiceId) -> ResolutionResult<BoxedInstance>;

    /// 检查服务是否已注册
    fn contains(&self, id: &ServiceId) -> bool;

    /// 返回实现指定能力的全部具体服务, 按发现顺序
    fn implementors_of(&self, capability: &ServiceId) -> Vec<ServiceId>;

    /// 返回全部已注册服务的元数据, 按发现顺序
    fn registered_services(&self) -> Vec<ServiceMetadata>;

    /// 校验全部注册的依赖关系
    ///
    /// 不构造任何实例, 报告所有无法解析的参数与依赖循环。
    fn validate(&self) -> Result<(), Vec<ResolutionError>>;
}

/// 容器便捷访问扩展
pub trait ContainerExt: ServiceContainer {
    /// 解析服务并向下转型到具体类型
    fn get_as<T: 'static>(&self, id: &ServiceId) -> ResolutionResult<Box<T>> {
        self.get(id)?.downcast::<T>().map_err(|_| {
            ResolutionError::type_mismatch(id.clone(), std::any::type_name::<T>())
        })
    }
}

impl<C: ServiceContainer + ?Sized> ContainerExt for C {}

/// 容器统计信息
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContainerStats {
    /// 已注册的服务数量
    pub registered_services: usize,
    /// 发起的解析次数
    pub resolutions_attempted: u64,
    /// 成功的解析次数
    pub resolutions_succeeded: u64,
    /// 失败的解析次数
    pub resolutions_failed: u64,
}
