//! 解析值模型
//!
//! 描述一次解析调用在构造器边界上传递的值:
//! - [`BoxedInstance`]: 类型擦除的服务实例
//! - [`ResolvedValue`]: 单个实例、按标识符索引的集合或内建默认值
//! - [`ResolvedArguments`]: 构造函数收到的按声明顺序排列的具名参数
//!
//! 实例归调用方独占所有, 容器不缓存也不共享它们, 因此实例本身
//! 不要求 `Send`; 解析过程是同步的单线程递归。

use crate::errors::{ResolutionError, ResolutionResult};
use crate::identifier::ServiceId;
use serde::de::DeserializeOwned;
use std::any::Any;
use std::fmt;

/// 类型擦除的服务实例
pub type BoxedInstance = Box<dyn Any>;

/// 按标识符索引的服务实例集合
///
/// 保持实现者的发现顺序; 同一标识符不会出现两次。
pub struct ServiceCollection {
    members: Vec<(ServiceId, BoxedInstance)>,
}

impl ServiceCollection {
    /// 创建空集合
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// 追加一个成员, 保持插入顺序
    pub fn push(&mut self, id: ServiceId, instance: BoxedInstance) {
        self.members.push((id, instance));
    }

    /// 集合成员数量
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// 集合是否为空
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// 按发现顺序返回成员标识符
    pub fn ids(&self) -> Vec<&ServiceId> {
        self.members.iter().map(|(id, _)| id).collect()
    }

    /// 按标识符查找成员
    pub fn get(&self, id: &ServiceId) -> Option<&BoxedInstance> {
        self.members
            .iter()
            .find(|(member_id, _)| member_id == id)
            .map(|(_, instance)| instance)
    }

    /// 迭代成员
    pub fn iter(&self) -> impl Iterator<Item = (&ServiceId, &BoxedInstance)> {
        self.members.iter().map(|(id, instance)| (id, instance))
    }

    /// 消费集合, 取出全部成员
    pub fn into_members(self) -> Vec<(ServiceId, BoxedInstance)> {
        self.members
    }

    /// 集合恰有一个成员时将其取出
    pub fn into_single(self) -> Option<(ServiceId, BoxedInstance)> {
        if self.members.len() == 1 {
            self.members.into_iter().next()
        } else {
            None
        }
    }

    /// 应用唯一实现者坍缩规则
    ///
    /// 恰有一个成员时交出该成员本身 (标识符被丢弃), 其余情况
    /// (包括空集合) 原样交出集合。
    pub fn collapse(mut self) -> ResolvedValue {
        if self.members.len() == 1 {
            let (_, single) = self.members.remove(0);
            ResolvedValue::Instance(single)
        } else {
            ResolvedValue::Collection(self)
        }
    }
}

impl Default for ServiceCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ServiceCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.members.iter().map(|(id, _)| id))
            .finish()
    }
}

/// 一个构造参数最终解析出的值
///
/// 能力集合在恰有一个实现者时坍缩为 [`ResolvedValue::Instance`],
/// 两个及以上实现者时保持 [`ResolvedValue::Collection`]; 这一
/// 单个/集合的二义性是刻意保留的行为, 消费方需同时处理两种形态。
pub enum ResolvedValue {
    /// 单个服务实例
    Instance(BoxedInstance),
    /// 按标识符索引的实例集合
    Collection(ServiceCollection),
    /// 原样传递的内建默认值
    Builtin(serde_json::Value),
}

impl ResolvedValue {
    /// 是否为单个实例
    pub fn is_instance(&self) -> bool {
        matches!(self, Self::Instance(_))
    }

    /// 是否为实例集合
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(_))
    }

    /// 是否为内建值
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin(_))
    }

    /// 取出单个实例
    pub fn into_instance(self) -> Option<BoxedInstance> {
        match self {
            Self::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    /// 取出实例集合
    pub fn into_collection(self) -> Option<ServiceCollection> {
        match self {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    /// 访问内建值
    pub fn as_builtin(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Builtin(value) => Some(value),
            _ => None,
        }
    }

    /// 值形态的简短描述, 用于诊断信息
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Instance(_) => "单个实例",
            Self::Collection(_) => "实例集合",
            Self::Builtin(_) => "内建值",
        }
    }
}

impl fmt::Debug for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(_) => f.write_str("Instance(..)"),
            Self::Collection(collection) => f.debug_tuple("Collection").field(collection).finish(),
            Self::Builtin(value) => f.debug_tuple("Builtin").field(value).finish(),
        }
    }
}

/// 以能力 trait 对象形态交付的参数值
///
/// 能力参数的消费方通过 [`ResolvedArguments::take_capability`] 获得
/// 此枚举: 坍缩后的单个实现者为 `Single`, 多个实现者为按发现顺序
/// 排列、以标识符为键的 `Keyed` (坍缩时标识符不再可见)。
pub enum CapabilityValue<C: ?Sized> {
    /// 唯一实现者, 未包装
    Single(Box<C>),
    /// 多个实现者, 按标识符索引
    Keyed(Vec<(ServiceId, Box<C>)>),
}

impl<C: ?Sized> CapabilityValue<C> {
    /// 实现者数量
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Keyed(members) => members.len(),
        }
    }

    /// 是否没有任何实现者
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 是否为坍缩后的单个实现者
    pub fn is_single(&self) -> bool {
        matches!(self, Self::Single(_))
    }

    /// 丢弃标识符, 按发现顺序取出全部实现者
    pub fn into_vec(self) -> Vec<Box<C>> {
        match self {
            Self::Single(one) => vec![one],
            Self::Keyed(members) => members.into_iter().map(|(_, member)| member).collect(),
        }
    }
}

/// 构造函数收到的已解析参数
///
/// 参数按构造蓝图的声明顺序排列, 构造闭包用 `take_*` 系列方法
/// 按名称逐个取出; 每个参数只能取出一次。
pub struct ResolvedArguments {
    values: Vec<(String, ResolvedValue)>,
}

impl ResolvedArguments {
    /// 创建空参数表
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// 按声明顺序追加一个参数值
    pub fn push(&mut self, name: impl Into<String>, value: ResolvedValue) {
        self.values.push((name.into(), value));
    }

    /// 尚未取出的参数数量
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否已无剩余参数
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 尚未取出的参数名称, 按声明顺序
    pub fn names(&self) -> Vec<&str> {
        self.values.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// 按名称取出参数值
    pub fn take(&mut self, name: &str) -> ResolutionResult<ResolvedValue> {
        let position = self
            .values
            .iter()
            .position(|(value_name, _)| value_name == name)
            .ok_or_else(|| ResolutionError::argument_missing(name))?;
        Ok(self.values.remove(position).1)
    }

    /// 按名称取出单个实例并向下转型
    pub fn take_instance<T: 'static>(&mut self, name: &str) -> ResolutionResult<Box<T>> {
        match self.take(name)? {
            ResolvedValue::Instance(instance) => instance.downcast::<T>().map_err(|_| {
                ResolutionError::argument_mismatch(name, std::any::type_name::<T>())
            }),
            other => Err(ResolutionError::argument_mismatch(
                name,
                format!("单个实例, 实际为{}", other.shape()),
            )),
        }
    }

    /// 按名称取出内建值并反序列化
    pub fn take_builtin<T: DeserializeOwned>(&mut self, name: &str) -> ResolutionResult<T> {
        match self.take(name)? {
            ResolvedValue::Builtin(value) => serde_json::from_value(value).map_err(|_| {
                ResolutionError::argument_mismatch(name, std::any::type_name::<T>())
            }),
            other => Err(ResolutionError::argument_mismatch(
                name,
                format!("内建值, 实际为{}", other.shape()),
            )),
        }
    }

    /// 按名称取出能力参数
    ///
    /// 同时接受坍缩后的单个实现者与实现者集合, 成员以能力
    /// trait 对象形态交付。
    pub fn take_capability<C: ?Sized + 'static>(
        &mut self,
        name: &str,
    ) -> ResolutionResult<CapabilityValue<C>> {
        match self.take(name)? {
            ResolvedValue::Instance(instance) => instance
                .downcast::<Box<C>>()
                .map(|boxed| CapabilityValue::Single(*boxed))
                .map_err(|_| ResolutionError::argument_mismatch(name, "能力对象")),
            ResolvedValue::Collection(collection) => {
                let mut members = Vec::with_capacity(collection.len());
                for (id, instance) in collection.into_members() {
                    let member = instance
                        .downcast::<Box<C>>()
                        .map_err(|_| ResolutionError::argument_mismatch(name, "能力对象集合"))?;
                    members.push((id, *member));
                }
                Ok(CapabilityValue::Keyed(members))
            }
            ResolvedValue::Builtin(_) => Err(ResolutionError::argument_mismatch(
                name,
                "能力对象或其集合, 实际为内建值",
            )),
        }
    }
}

impl Default for ResolvedArguments {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ResolvedArguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.values.iter().map(|(name, _)| name))
            .finish()
    }
}
