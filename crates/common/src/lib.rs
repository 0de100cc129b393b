//! # Autowire Common
//!
//! 这个 crate 提供了 Autowire 容器各层共享的基础词汇与工具。
//!
//! ## 核心组件
//!
//! - [`ServiceId`] - 服务标识符
//! - [`ConstructorBlueprint`] - 构造器蓝图 (参数规格与能力收集标记)
//! - [`ResolvedValue`] / [`ResolvedArguments`] - 解析值模型
//! - [`ResolutionError`] / [`DiscoveryError`] - 错误分类
//! - [`TypeInfo`] / [`ServiceMetadata`] - 类型与服务元数据
//!
//! ## 设计原则
//!
//! - 注册表构建一次后冻结, 无进程级可变全局状态
//! - 每个失败条件对应唯一的类型化错误
//! - 解析同步完成, 实例归调用方独占所有

pub mod blueprint;
pub mod errors;
pub mod identifier;
pub mod metadata;
pub mod value;

pub use blueprint::*;
pub use errors::*;
pub use identifier::*;
pub use metadata::*;
pub use value::*;
