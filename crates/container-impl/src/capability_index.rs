//! 能力索引实现

use crate::registry::FrozenRegistry;
use autowire_common::ServiceId;
use container_abstractions::CapabilityIndex;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// 带缓存的能力索引
///
/// 注册表冻结后不再变化, 每个能力的实现者列表只计算一次,
/// 之后从缓存读取。结果保持注册表的发现顺序。
pub struct MemoizedCapabilityIndex {
    registry: Arc<FrozenRegistry>,
    memo: DashMap<ServiceId, Arc<Vec<ServiceId>>>,
}

impl MemoizedCapabilityIndex {
    /// 基于冻结注册表创建能力索引
    pub fn new(registry: Arc<FrozenRegistry>) -> Self {
        Self {
            registry,
            memo: DashMap::new(),
        }
    }
}

impl CapabilityIndex for MemoizedCapabilityIndex {
    fn implementors_of(&self, capability: &ServiceId) -> Vec<ServiceId> {
        if let Some(hit) = self.memo.get(capability) {
            return hit.as_ref().clone();
        }

        let implementors: Vec<ServiceId> = self
            .registry
            .entries()
            .filter(|registration| registration.satisfies(capability))
            .map(|registration| registration.id.clone())
            .collect();
        debug!(
            "能力 {} 的实现者已索引, 共 {} 个",
            capability,
            implementors.len()
        );
        self.memo
            .insert(capability.clone(), Arc::new(implementors.clone()));
        implementors
    }
}
