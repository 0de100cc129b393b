//! 容器启动器
//!
//! 协调宿主程序的标准启动顺序: 构建容器, 然后解析唯一的入口
//! 服务。入口服务拿到手后, 宿主程序的其余部分都从它出发, 不再
//! 直接接触容器。

use crate::builder::ContainerBuilder;
use crate::runtime::AutowireRuntime;
use autowire_common::{BoxedInstance, ContainerResult, ResolutionError, ServiceId};
use container_abstractions::ServiceContainer;
use tracing::{error, info};

/// 容器启动器
pub struct Bootstrapper {
    /// 容器构建器
    builder: ContainerBuilder,
    /// 入口服务标识符
    entry: ServiceId,
}

impl Bootstrapper {
    /// 创建新的启动器
    pub fn new(builder: ContainerBuilder, entry: impl Into<ServiceId>) -> Self {
        Self {
            builder,
            entry: entry.into(),
        }
    }

    /// 启动容器并解析入口服务
    pub fn bootstrap(self) -> ContainerResult<BootstrapOutcome> {
        info!("开始启动容器运行时");
        let Self { builder, entry } = self;

        // 第一步: 构建容器 (发现、冻结、校验)
        let runtime = builder.build()?;

        // 第二步: 解析入口服务及其完整依赖图
        info!("解析入口服务: {}", entry);
        let instance = runtime.container().get(&entry).map_err(|e| {
            error!("入口服务 {} 解析失败: {}", entry, e);
            e
        })?;

        info!("容器运行时启动完成, 入口服务: {}", entry);
        Ok(BootstrapOutcome {
            runtime,
            entry_id: entry,
            entry: instance,
        })
    }
}

/// 启动结果
pub struct BootstrapOutcome {
    /// 容器运行时
    pub runtime: AutowireRuntime,
    /// 入口服务标识符
    pub entry_id: ServiceId,
    /// 入口服务实例
    pub entry: BoxedInstance,
}

impl std::fmt::Debug for BootstrapOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapOutcome")
            .field("runtime", &self.runtime)
            .field("entry_id", &self.entry_id)
            .field("entry", &"<instance>")
            .finish()
    }
}

impl BootstrapOutcome {
    /// 把入口实例向下转型到具体类型
    pub fn entry_as<T: 'static>(self) -> ContainerResult<(Box<T>, AutowireRuntime)> {
        let Self {
            runtime,
            entry_id,
            entry,
        } = self;
        let typed = entry
            .downcast::<T>()
            .map_err(|_| ResolutionError::type_mismatch(entry_id, std::any::type_name::<T>()))?;
        Ok((typed, runtime))
    }
}
