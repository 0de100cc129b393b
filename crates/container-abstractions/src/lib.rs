//! # Container Abstractions
//!
//! 容器抽象层, 定义服务注册与依赖解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`ServiceRegistry`] - 服务注册表接口
//! - [`CapabilityIndex`] - 能力索引接口
//! - [`DescriptorSource`] - 构造器蓝图来源接口
//! - [`GraphResolver`] - 图解析器接口
//! - [`ServiceContainer`] - 服务容器接口
//! - [`ServiceDeclaration`] - 服务声明构建器
//! - [`ManifestScanner`] - 清单扫描器接口

pub mod capability;
pub mod container;
pub mod declaration;
pub mod descriptor;
pub mod discovery;
pub mod registry;
pub mod resolver;
pub mod scanner;

pub use capability::*;
pub use container::*;
pub use declaration::*;
pub use descriptor::*;
pub use discovery::*;
pub use registry::*;
pub use resolver::*;
pub use scanner::*;
