//! 服务容器实现
//!
//! 把冻结注册表、能力索引与图解析器组装为对外的容器门面, 并
//! 维护解析统计。容器不缓存任何实例: 每次 get 都构造全新的
//! 依赖子图, 生命周期完全由调用方持有。

use crate::capability_index::MemoizedCapabilityIndex;
use crate::registry::{FrozenRegistry, RegistryBuilder};
use crate::resolver::GraphResolverImpl;
use crate::validation;
use autowire_common::{
    BoxedInstance, ResolutionError, ResolutionResult, ServiceId, ServiceMetadata,
};
use container_abstractions::{
    CapabilityIndex, ContainerStats, GraphResolver, ServiceContainer, ServiceRegistration,
    ServiceRegistry,
};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 服务容器实现
pub struct ServiceContainerImpl {
    registry: Arc<FrozenRegistry>,
    capabilities: Arc<MemoizedCapabilityIndex>,
    resolver: GraphResolverImpl,
    stats: RwLock<ContainerStats>,
}

impl ServiceContainerImpl {
    /// 基于冻结注册表创建容器
    pub fn new(registry: FrozenRegistry) -> Self {
        let registry = Arc::new(registry);
        let capabilities = Arc::new(MemoizedCapabilityIndex::new(Arc::clone(&registry)));
        let resolver = GraphResolverImpl::new(Arc::clone(&registry), Arc::clone(&capabilities));
        let stats = RwLock::new(ContainerStats {
            registered_services: registry.len(),
            ..ContainerStats::default()
        });
        info!("依赖注入容器构建完成, 共 {} 个服务", registry.len());
        Self {
            registry,
            capabilities,
            resolver,
            stats,
        }
    }

    /// 从一组注册记录创建容器, 重复标识符保留首次注册
    pub fn from_declarations(declarations: Vec<ServiceRegistration>) -> Self {
        let mut builder = RegistryBuilder::new();
        for declaration in declarations {
            builder.insert(declaration);
        }
        Self::new(builder.freeze())
    }

    /// 返回当前解析统计的快照
    pub fn stats(&self) -> ContainerStats {
        self.stats.read().clone()
    }
}

impl ServiceContainer for ServiceContainerImpl {
    fn get(&self, id: &ServiceId) -> ResolutionResult<BoxedInstance> {
        debug!("请求解析服务: {}", id);
        self.stats.write().resolutions_attempted += 1;
        match self.resolver.resolve(id) {
            Ok(instance) => {
                self.stats.write().resolutions_succeeded += 1;
                Ok(instance)
            }
            Err(e) => {
                self.stats.write().resolutions_failed += 1;
                warn!("服务 {} 解析失败: {}", id, e);
                Err(e)
            }
        }
    }

    fn contains(&self, id: &ServiceId) -> bool {
        self.registry.contains(id)
    }

    fn implementors_of(&self, capability: &ServiceId) -> Vec<ServiceId> {
        self.capabilities.implementors_of(capability)
    }

    fn registered_services(&self) -> Vec<ServiceMetadata> {
        self.registry.entries().map(|r| r.metadata()).collect()
    }

    fn validate(&self) -> Result<(), Vec<ResolutionError>> {
        validation::validate_registrations(&self.registry, &self.capabilities)
    }
}
