//! 图解析器实现
//!
//! 核心算法: 给定服务标识符, 按声明顺序逐个解析构造参数, 递归
//! 构造完整依赖图, 最后调用注册的构造函数并做精确类型校验。
//!
//! 每个参数按固定优先级取第一个适用的策略, 策略之间互斥:
//!
//! 1. 能力收集标记 — 构造该能力的全部实现者, 实现者自身的收集
//!    标记被抑制 (标记只向下传播一层); 恰有一个实现者时坍缩为
//!    单个实例
//! 2. 直接依赖 — 参数声明类型是已注册的具体服务时完整递归,
//!    该服务自己的标记正常生效
//! 3. 默认值 — 声明的默认值原样交付
//! 4. 以上都不适用时, 以无法解析错误终止
//!
//! 没有结果缓存: 每次解析都会重新构造整个子图。

use crate::capability_index::MemoizedCapabilityIndex;
use crate::registry::FrozenRegistry;
use autowire_common::{
    BoxedInstance, CapabilityRequest, ConstructorBlueprint, ParameterKind, ParameterSpec,
    ResolutionError, ResolutionResult, ResolvedArguments, ResolvedValue, ServiceCollection,
    ServiceId,
};
use container_abstractions::{
    CapabilityIndex, DescriptorSource, GraphResolver, ResolutionContext, ServiceRegistry,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// 图解析器实现
pub struct GraphResolverImpl {
    registry: Arc<FrozenRegistry>,
    capabilities: Arc<MemoizedCapabilityIndex>,
}

impl GraphResolverImpl {
    /// 基于冻结注册表与能力索引创建解析器
    pub fn new(registry: Arc<FrozenRegistry>, capabilities: Arc<MemoizedCapabilityIndex>) -> Self {
        Self {
            registry,
            capabilities,
        }
    }

    /// 构造单个服务及其依赖子图
    ///
    /// `honor_markers` 为 `false` 时本服务构造器上的能力收集标记
    /// 被忽略, 只用于能力集合成员的构造。
    fn build_service(
        &self,
        id: &ServiceId,
        honor_markers: bool,
        context: &mut ResolutionContext,
    ) -> ResolutionResult<BoxedInstance> {
        context.push(id)?;
        let result = self.construct(id, honor_markers, context);
        context.pop();
        result
    }

    fn construct(
        &self,
        id: &ServiceId,
        honor_markers: bool,
        context: &mut ResolutionContext,
    ) -> ResolutionResult<BoxedInstance> {
        let registration = self
            .registry
            .registration(id)
            .ok_or_else(|| ResolutionError::descriptor(id.clone(), "注册表中缺少该服务的记录"))?;
        let blueprint = self.registry.describe(id)?;
        debug!(
            "解析服务 {} 的 {} 个构造参数 (深度 {})",
            id,
            blueprint.parameters.len(),
            context.depth()
        );

        let mut arguments = ResolvedArguments::new();
        for parameter in &blueprint.parameters {
            let value = self.resolve_parameter(id, &blueprint, parameter, honor_markers, context)?;
            arguments.push(parameter.name.clone(), value);
        }

        let instance = (registration.builder)(arguments)
            .map_err(|e| ResolutionError::construction_failed(id.clone(), e.to_string()))?;

        if instance.as_ref().type_id() != registration.type_info.id {
            return Err(ResolutionError::type_mismatch(
                id.clone(),
                registration.type_info.name.clone(),
            ));
        }
        Ok(instance)
    }

    /// 按策略优先级解析单个构造参数
    fn resolve_parameter(
        &self,
        owner: &ServiceId,
        blueprint: &ConstructorBlueprint,
        parameter: &ParameterSpec,
        honor_markers: bool,
        context: &mut ResolutionContext,
    ) -> ResolutionResult<ResolvedValue> {
        if honor_markers {
            if let Some(marker) = blueprint.marker_for(&parameter.name) {
                return self.resolve_collection(marker, context);
            }
        }

        if let ParameterKind::Service(dependency) = &parameter.kind {
            if self.registry.contains(dependency) {
                let instance = self.build_service(dependency, true, context)?;
                return Ok(ResolvedValue::Instance(instance));
            }
        }

        if let Some(default) = &parameter.default {
            debug!("服务 {} 的参数 {} 使用声明的默认值", owner, parameter.name);
            return Ok(ResolvedValue::Builtin(default.clone()));
        }

        Err(ResolutionError::unresolvable_parameter(
            owner.clone(),
            &parameter.name,
        ))
    }

    /// 解析能力收集参数
    ///
    /// 实现者按发现顺序构造并经能力适配函数转换, 以标识符为键
    /// 收入集合; 构造时抑制实现者自身的收集标记。
    fn resolve_collection(
        &self,
        marker: &CapabilityRequest,
        context: &mut ResolutionContext,
    ) -> ResolutionResult<ResolvedValue> {
        let implementors = self.capabilities.implementors_of(&marker.capability);
        if implementors.is_empty() {
            warn!(
                "能力 {} 没有任何实现者, 参数 {} 将收到空集合",
                marker.capability, marker.parameter
            );
        } else {
            debug!(
                "为参数 {} 收集能力 {} 的 {} 个实现者",
                marker.parameter,
                marker.capability,
                implementors.len()
            );
        }

        let mut collection = ServiceCollection::new();
        for implementor in &implementors {
            let raw = self.build_service(implementor, false, context)?;
            let registration = self.registry.registration(implementor).ok_or_else(|| {
                ResolutionError::descriptor(implementor.clone(), "注册表中缺少该服务的记录")
            })?;
            let adapter = registration.adapter_for(&marker.capability).ok_or_else(|| {
                ResolutionError::descriptor(
                    implementor.clone(),
                    format!("声明了能力 {} 但没有对应的适配函数", marker.capability),
                )
            })?;
            let adapted = adapter(raw)?;
            collection.push(implementor.clone(), adapted);
        }

        Ok(collection.collapse())
    }
}

impl GraphResolver for GraphResolverImpl {
    fn resolve(&self, id: &ServiceId) -> ResolutionResult<BoxedInstance> {
        if !self.registry.contains(id) {
            return Err(ResolutionError::service_not_found(id.clone()));
        }
        let mut context = ResolutionContext::new();
        self.build_service(id, true, &mut context)
    }
}
