//! 服务声明构建器
//!
//! 以静态检查的方式声明一个服务: 具体类型、构造参数规格、能力
//! 收集标记、能力适配闭包与构造闭包, 最终产出类型擦除的注册
//! 记录。这张显式声明表替代了原型系统中的运行时反射。

use crate::registry::{CapabilityAdapterFn, ServiceBuilderFn, ServiceRegistration};
use autowire_common::{
    BoxedInstance, CapabilityRequest, ConstructorBlueprint, ParameterSpec, ResolutionError,
    ResolutionResult, ResolvedArguments, ServiceId, TypeInfo,
};
use chrono::Utc;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// 服务声明构建器
///
/// 链式声明一个具体类型 `T` 的注册信息, 以 [`Self::constructed_by`]
/// 收尾并得到 [`ServiceRegistration`]。
///
/// ```
/// use container_abstractions::ServiceDeclaration;
///
/// trait Notifier {
///     fn notify(&self) -> String;
/// }
///
/// struct EmailNotifier;
///
/// impl Notifier for EmailNotifier {
///     fn notify(&self) -> String {
///         "email".to_string()
///     }
/// }
///
/// let registration = ServiceDeclaration::<EmailNotifier>::of("app.notify.email")
///     .with_capability("app.notifier", |n: EmailNotifier| {
///         Box::new(n) as Box<dyn Notifier>
///     })
///     .constructed_by(|_args| Ok(EmailNotifier));
///
/// assert!(registration.satisfies(&"app.notifier".into()));
/// ```
pub struct ServiceDeclaration<T: 'static> {
    id: ServiceId,
    parameters: Vec<ParameterSpec>,
    markers: Vec<CapabilityRequest>,
    capabilities: Vec<ServiceId>,
    adapters: HashMap<ServiceId, CapabilityAdapterFn>,
    _type: PhantomData<fn() -> T>,
}

impl<T: 'static> ServiceDeclaration<T> {
    /// 以指定标识符开始声明
    pub fn of(id: impl Into<ServiceId>) -> Self {
        Self {
            id: id.into(),
            parameters: Vec::new(),
            markers: Vec::new(),
            capabilities: Vec::new(),
            adapters: HashMap::new(),
            _type: PhantomData,
        }
    }

    /// 声明一个服务类型的构造参数
    pub fn param_service(
        mut self,
        name: impl Into<String>,
        dependency: impl Into<ServiceId>,
    ) -> Self {
        self.parameters.push(ParameterSpec::service(name, dependency));
        self
    }

    /// 声明一个带默认值的服务类型构造参数
    ///
    /// 依赖未注册时交付默认值, 而不是解析失败。
    pub fn param_service_or(
        mut self,
        name: impl Into<String>,
        dependency: impl Into<ServiceId>,
        default: serde_json::Value,
    ) -> Self {
        self.parameters
            .push(ParameterSpec::service(name, dependency).with_default(default));
        self
    }

    /// 声明一个内建类型的构造参数, 可附带默认值
    pub fn param_builtin(
        mut self,
        name: impl Into<String>,
        default: Option<serde_json::Value>,
    ) -> Self {
        self.parameters.push(ParameterSpec::builtin(name, default));
        self
    }

    /// 为指定参数声明能力收集标记
    ///
    /// 该参数在解析时接收指定能力的全部实现者, 而非单个依赖。
    /// 标记只是注解, 参数本身仍需用 `param_*` 方法声明; 指向未
    /// 声明参数的标记不起作用。
    pub fn collect_implementors(
        mut self,
        parameter: impl Into<String>,
        capability: impl Into<ServiceId>,
    ) -> Self {
        self.markers
            .push(CapabilityRequest::new(parameter, capability));
        self
    }

    /// 声明本服务满足指定能力
    ///
    /// `coerce` 把具体实例转换为能力 trait 对象, 能力收集参数的
    /// 成员以该形态交付。同一能力重复声明时, 后一次的适配闭包
    /// 生效。
    pub fn with_capability<C, F>(mut self, capability: impl Into<ServiceId>, coerce: F) -> Self
    where
        C: ?Sized + 'static,
        F: Fn(T) -> Box<C> + Send + Sync + 'static,
    {
        let capability = capability.into();
        let service = self.id.clone();
        let adapter: CapabilityAdapterFn = Arc::new(move |instance: BoxedInstance| {
            let concrete = instance.downcast::<T>().map_err(|_| {
                ResolutionError::descriptor(service.clone(), "能力适配函数收到非注册类型的实例")
            })?;
            Ok(Box::new(coerce(*concrete)) as BoxedInstance)
        });
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability.clone());
        }
        self.adapters.insert(capability, adapter);
        self
    }

    /// 提供构造闭包, 完成声明
    ///
    /// 闭包接收按声明顺序排列的已解析参数, 可以失败; 产出的
    /// 实例会与声明的具体类型做精确比对。
    pub fn constructed_by<F>(self, builder: F) -> ServiceRegistration
    where
        F: Fn(ResolvedArguments) -> ResolutionResult<T> + Send + Sync + 'static,
    {
        let builder_fn: ServiceBuilderFn =
            Arc::new(move |args| builder(args).map(|instance| Box::new(instance) as BoxedInstance));
        ServiceRegistration {
            id: self.id,
            type_info: TypeInfo::of::<T>(),
            blueprint: ConstructorBlueprint::new(self.parameters, self.markers),
            capabilities: self.capabilities,
            adapters: self.adapters,
            builder: builder_fn,
            registered_at: Utc::now(),
        }
    }
}
