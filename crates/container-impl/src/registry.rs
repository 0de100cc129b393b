//! 服务注册表实现
//!
//! 注册表分两个阶段: [`RegistryBuilder`] 在容器构建期间按发现
//! 顺序收集注册记录并去重, [`RegistryBuilder::freeze`] 之后得到
//! 只读的 [`FrozenRegistry`], 供并发解析使用。没有冻结后的写入
//! 路径, 也没有进程级全局状态。

use autowire_common::{
    CapabilityRequest, ConstructorBlueprint, ResolutionError, ResolutionResult, ServiceId,
};
use container_abstractions::{DescriptorSource, ServiceRegistration, ServiceRegistry};
use std::collections::HashMap;
use tracing::{debug, info};

/// 注册表构建器
///
/// 同一标识符的重复注册被静默忽略, 第一条声明生效; 迭代顺序
/// 即首次注册顺序。
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<ServiceRegistration>,
    index: HashMap<ServiceId, usize>,
}

impl RegistryBuilder {
    /// 创建空的注册表构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入一条注册记录
    ///
    /// 返回记录是否被实际加入; 重复标识符返回 `false`。
    pub fn insert(&mut self, registration: ServiceRegistration) -> bool {
        if self.index.contains_key(&registration.id) {
            debug!("跳过重复注册: {}", registration.id);
            return false;
        }
        debug!(
            "注册服务: {} ({})",
            registration.id, registration.type_info.name
        );
        self.index
            .insert(registration.id.clone(), self.entries.len());
        self.entries.push(registration);
        true
    }

    /// 当前已收集的记录数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否尚未收集任何记录
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 冻结注册表
    ///
    /// 此后注册表只读, 可被并发访问。
    pub fn freeze(self) -> FrozenRegistry {
        info!("服务注册表已冻结, 共 {} 个服务", self.entries.len());
        FrozenRegistry {
            entries: self.entries,
            index: self.index,
        }
    }
}

/// 冻结后的服务注册表
#[derive(Debug)]
pub struct FrozenRegistry {
    entries: Vec<ServiceRegistration>,
    index: HashMap<ServiceId, usize>,
}

impl FrozenRegistry {
    /// 按发现顺序迭代全部注册记录
    pub fn entries(&self) -> impl Iterator<Item = &ServiceRegistration> {
        self.entries.iter()
    }
}

impl ServiceRegistry for FrozenRegistry {
    fn contains(&self, id: &ServiceId) -> bool {
        self.index.contains_key(id)
    }

    fn all(&self) -> Vec<ServiceId> {
        self.entries.iter().map(|entry| entry.id.clone()).collect()
    }

    fn registration(&self, id: &ServiceId) -> Option<&ServiceRegistration> {
        self.index.get(id).map(|position| &self.entries[*position])
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl DescriptorSource for FrozenRegistry {
    fn describe(&self, id: &ServiceId) -> ResolutionResult<ConstructorBlueprint> {
        self.registration(id)
            .map(|registration| registration.blueprint.clone())
            .ok_or_else(|| ResolutionError::descriptor(id.clone(), "注册表中缺少该服务的记录"))
    }

    fn collection_markers_of(&self, id: &ServiceId) -> ResolutionResult<Vec<CapabilityRequest>> {
        self.registration(id)
            .map(|registration| registration.blueprint.markers.clone())
            .ok_or_else(|| ResolutionError::descriptor(id.clone(), "注册表中缺少该服务的记录"))
    }
}
