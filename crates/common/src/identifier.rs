//! 服务标识符

use serde::{Deserialize, Serialize};
use std::fmt;

/// 服务标识符
///
/// 具体类型在容器中的唯一稳定名称, 一经分配不再变化,
/// 在注册表、能力索引与解析图中都作为键使用。
/// 约定使用点分层级命名, 例如 `app.logging.file`。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
    /// 创建服务标识符
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// 以字符串切片形式访问标识符
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ServiceId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for ServiceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
