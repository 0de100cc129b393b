//! # 依赖注入容器实现
//!
//! 提供容器抽象层的具体实现:
//!
//! ## 核心组件
//!
//! - **RegistryBuilder / FrozenRegistry**: 注册期收集服务声明, 冻结
//!   后成为只读注册表
//! - **MemoizedCapabilityIndex**: 能力到实现者列表的惰性索引
//! - **GraphResolverImpl**: 递归图解析器, 按策略顺序解析构造参数
//! - **ServiceContainerImpl**: 对外的容器门面, 附带解析统计
//! - **validate_registrations**: 不构造实例的注册表静态校验
//!
//! ## 设计原则
//!
//! - 注册表冻结后不再变化, 解析阶段无锁读取
//! - 解析是同步的纯函数式过程, 没有实例缓存与全局状态
//! - 每种失败条件对应唯一的类型化错误

pub mod capability_index;
pub mod container;
pub mod registry;
pub mod resolver;
pub mod validation;

pub use capability_index::MemoizedCapabilityIndex;
pub use container::ServiceContainerImpl;
pub use registry::{FrozenRegistry, RegistryBuilder};
pub use resolver::GraphResolverImpl;
pub use validation::validate_registrations;
