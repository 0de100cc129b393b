//! 服务注册表抽象接口

use autowire_common::{
    BoxedInstance, ConstructorBlueprint, ResolutionError, ResolvedArguments, ServiceId,
    ServiceMetadata, TypeInfo,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// 服务构造函数类型
///
/// 接收按声明顺序排列的已解析参数, 返回类型擦除的实例。
/// 注册表跨线程共享, 构造函数必须 `Send + Sync`; 产出的实例
/// 归调用方所有, 不受此约束。
pub type ServiceBuilderFn =
    Arc<dyn Fn(ResolvedArguments) -> Result<BoxedInstance, ResolutionError> + Send + Sync>;

/// 能力适配函数类型
///
/// 把已构造的具体实例转换为对应能力的 trait 对象 (再次类型擦除),
/// 供能力收集参数的消费方向下转型。
pub type CapabilityAdapterFn =
    Arc<dyn Fn(BoxedInstance) -> Result<BoxedInstance, ResolutionError> + Send + Sync>;

/// 单个服务的注册记录
///
/// 注册时声明一次, 冻结后只读: 构造蓝图、声明满足的能力及其
/// 适配函数、以及类型擦除的构造函数。
#[derive(Clone)]
pub struct ServiceRegistration {
    /// 服务标识符
    pub id: ServiceId,
    /// 注册的具体类型
    pub type_info: TypeInfo,
    /// 构造器蓝图
    pub blueprint: ConstructorBlueprint,
    /// 声明满足的能力, 按声明顺序
    pub capabilities: Vec<ServiceId>,
    /// 能力标识符到适配函数的映射
    pub adapters: HashMap<ServiceId, CapabilityAdapterFn>,
    /// 构造函数
    pub builder: ServiceBuilderFn,
    /// 注册时间
    pub registered_at: DateTime<Utc>,
}

impl ServiceRegistration {
    /// 是否声明满足指定能力
    pub fn satisfies(&self, capability: &ServiceId) -> bool {
        self.capabilities.contains(capability)
    }

    /// 查找指定能力的适配函数
    pub fn adapter_for(&self, capability: &ServiceId) -> Option<&CapabilityAdapterFn> {
        self.adapters.get(capability)
    }

    /// 生成诊断用的服务元数据
    pub fn metadata(&self) -> ServiceMetadata {
        ServiceMetadata::new(
            self.id.clone(),
            self.type_info.name.clone(),
            self.capabilities.clone(),
            self.blueprint.parameters.len(),
            self.blueprint.markers.len(),
            self.registered_at,
        )
    }
}

impl std::fmt::Debug for ServiceRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistration")
            .field("id", &self.id)
            .field("type_info", &self.type_info)
            .field("blueprint", &self.blueprint)
            .field("capabilities", &self.capabilities)
            .field("builder", &"<function>")
            .finish()
    }
}

/// 服务注册表 trait
///
/// 冻结后的只读查询接口; 注册表在容器构建期间填充一次,
/// 之后可被并发读取。
pub trait ServiceRegistry: Send + Sync {
    /// 检查服务是否已注册
    fn contains(&self, id: &ServiceId) -> bool;

    /// 按发现顺序返回全部服务标识符
    fn all(&self) -> Vec<ServiceId>;

    /// 查找服务的注册记录
    fn registration(&self, id: &ServiceId) -> Option<&ServiceRegistration>;

    /// 已注册的服务数量
    fn len(&self) -> usize;

    /// 注册表是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
