//! 图解析器抽象接口
//!
//! 提供依赖解析与实例化的能力

use autowire_common::{BoxedInstance, ResolutionError, ResolutionResult, ServiceId};

/// 图解析器 trait
///
/// 给定服务标识符, 递归构造该服务及其完整依赖图。没有结果缓存:
/// 同一标识符的两次解析, 或同一依赖在一张图中的两次出现, 都会
/// 产生独立构造的实例。
pub trait GraphResolver: Send + Sync {
    /// 解析指定标识符的服务
    fn resolve(&self, id: &ServiceId) -> ResolutionResult<BoxedInstance>;
}

/// 解析上下文
///
/// 每次顶层解析调用新建, 随递归传递, 不跨调用持久化。
/// 解析链记录正在构造中的标识符, 再次进入链上已有的标识符
/// 立即以循环依赖错误终止。
#[derive(Debug, Clone)]
pub struct ResolutionContext {
    /// 当前解析链, 按进入顺序
    pub chain: Vec<ServiceId>,
}

impl ResolutionContext {
    /// 创建新的解析上下文
    pub fn new() -> Self {
        Self { chain: Vec::new() }
    }

    /// 将标识符压入解析链
    pub fn push(&mut self, id: &ServiceId) -> ResolutionResult<()> {
        if self.chain.contains(id) {
            return Err(ResolutionError::CycleDetected {
                chain: self.chain_with(id),
            });
        }
        self.chain.push(id.clone());
        Ok(())
    }

    /// 从解析链中弹出最近的标识符
    pub fn pop(&mut self) {
        self.chain.pop();
    }

    /// 当前递归深度
    pub fn depth(&self) -> usize {
        self.chain.len()
    }

    /// 解析链的可读形式, 末尾附加指定标识符
    pub fn chain_with(&self, next: &ServiceId) -> String {
        let mut parts: Vec<&str> = self.chain.iter().map(ServiceId::as_str).collect();
        parts.push(next.as_str());
        parts.join(" -> ")
    }
}

impl Default for ResolutionContext {
    fn default() -> Self {
        Self::new()
    }
}
