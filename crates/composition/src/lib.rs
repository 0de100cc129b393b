//! # 容器组合层
//!
//! 这个 crate 是 Autowire 的组合层, 负责把声明目录、清单发现与
//! 容器实现组合成一个完整可用的运行时。
//!
//! ## 主要功能
//!
//! - **容器构建器**: 使用建造者模式组装声明、清单扫描与校验
//! - **清单发现**: 递归扫描清单树, 按标识符启用声明的服务
//! - **容器启动器**: 构建容器并解析唯一的入口服务
//! - **运行时门面**: 容器句柄、扫描报告与运行状况摘要
//!
//! ## 基本使用
//!
//! ```rust
//! use autowire_composition::ContainerBuilder;
//! use container_abstractions::ServiceDeclaration;
//!
//! struct AppConfig {
//!     name: String,
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 声明服务并构建运行时
//!     let runtime = ContainerBuilder::new()
//!         .declare(
//!             ServiceDeclaration::<AppConfig>::of("app.config")
//!                 .param_builtin("name", Some(serde_json::json!("演示应用")))
//!                 .constructed_by(|mut args| {
//!                     let name: String = args.take_builtin("name")?;
//!                     Ok(AppConfig { name })
//!                 }),
//!         )
//!         .build()?;
//!
//!     // 解析服务
//!     let config = runtime.get_as::<AppConfig>(&"app.config".into())?;
//!     println!("应用名称: {}", config.name);
//!     Ok(())
//! }
//! ```

pub mod bootstrapper;
pub mod builder;
pub mod manifest_scanner;
pub mod runtime;

// 重新导出主要类型
pub use bootstrapper::{BootstrapOutcome, Bootstrapper};
pub use builder::{ContainerBuilder, LoggingConfig};
pub use manifest_scanner::ManifestDiscovery;
pub use runtime::{AutowireRuntime, RuntimeSummary};

// 重新导出错误类型
pub use autowire_common::{ContainerError, ContainerResult};
