//! 服务声明目录
//!
//! 宿主程序把全部可用的服务声明放入目录; 发现阶段 (清单扫描或
//! 直接全量启用) 从目录中挑选条目填充注册表。目录本身只是声明
//! 的池子, 去重发生在注册表构建时。

use crate::registry::ServiceRegistration;
use autowire_common::ServiceId;

/// 服务声明目录
#[derive(Debug)]
pub struct DeclarationCatalog {
    entries: Vec<ServiceRegistration>,
}

impl DeclarationCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 链式加入一条声明
    pub fn declare(mut self, registration: ServiceRegistration) -> Self {
        self.entries.push(registration);
        self
    }

    /// 加入一条声明
    pub fn add(&mut self, registration: ServiceRegistration) {
        self.entries.push(registration);
    }

    /// 合并另一个目录的全部声明
    pub fn merge(&mut self, other: DeclarationCatalog) {
        self.entries.extend(other.entries);
    }

    /// 按标识符查找声明, 重复声明时第一条生效
    pub fn get(&self, id: &ServiceId) -> Option<&ServiceRegistration> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// 是否存在指定标识符的声明
    pub fn contains(&self, id: &ServiceId) -> bool {
        self.get(id).is_some()
    }

    /// 按加入顺序返回全部声明标识符
    pub fn ids(&self) -> Vec<ServiceId> {
        self.entries.iter().map(|entry| entry.id.clone()).collect()
    }

    /// 目录中的声明数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 目录是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 迭代全部声明
    pub fn iter(&self) -> impl Iterator<Item = &ServiceRegistration> {
        self.entries.iter()
    }

    /// 消费目录, 取出全部声明
    pub fn into_entries(self) -> Vec<ServiceRegistration> {
        self.entries
    }
}

impl Default for DeclarationCatalog {
    fn default() -> Self {
        Self::new()
    }
}
