//! 能力索引抽象接口

use autowire_common::ServiceId;

/// 能力索引 trait
///
/// 回答"哪些已注册的具体服务满足指定能力"。能力声明本身从不
/// 出现在结果中; 结果顺序与注册表的发现顺序一致。索引是冻结
/// 注册表的纯函数, 实现可以按能力做缓存。
pub trait CapabilityIndex: Send + Sync {
    /// 返回实现指定能力的全部具体服务, 按发现顺序
    ///
    /// 没有任何实现者时返回空序列, 这是合法结果而非错误。
    fn implementors_of(&self, capability: &ServiceId) -> Vec<ServiceId>;
}
