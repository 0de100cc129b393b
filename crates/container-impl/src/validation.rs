//! 注册表静态校验
//!
//! 不构造任何实例, 按解析器的策略顺序走一遍全部服务的依赖图,
//! 收集所有会在运行时导致解析失败的问题: 无法解析的参数、循环
//! 依赖、缺失的能力适配函数。一次校验报告全部问题, 而不是在
//! 第一个问题处止步。

use crate::capability_index::MemoizedCapabilityIndex;
use crate::registry::FrozenRegistry;
use autowire_common::{ParameterKind, ResolutionError, ServiceId};
use container_abstractions::{CapabilityIndex, ServiceRegistry};
use std::collections::HashSet;
use tracing::debug;

/// 校验全部注册记录的可解析性
///
/// 同一个服务可能既被直接依赖, 又作为能力集合成员被构造, 两种
/// 情形下收集标记的生效与否不同, 因此按 (服务, 标记是否生效)
/// 两个维度分别检查。
pub fn validate_registrations(
    registry: &FrozenRegistry,
    capabilities: &MemoizedCapabilityIndex,
) -> Result<(), Vec<ResolutionError>> {
    let mut errors = Vec::new();
    let mut checked: HashSet<(ServiceId, bool)> = HashSet::new();

    for registration in registry.entries() {
        let mut visiting: Vec<ServiceId> = Vec::new();
        check_service(
            registry,
            capabilities,
            &registration.id,
            true,
            &mut visiting,
            &mut checked,
            &mut errors,
        );
    }

    debug!("注册表校验完成, 发现 {} 个问题", errors.len());
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_service(
    registry: &FrozenRegistry,
    capabilities: &MemoizedCapabilityIndex,
    id: &ServiceId,
    honor_markers: bool,
    visiting: &mut Vec<ServiceId>,
    checked: &mut HashSet<(ServiceId, bool)>,
    errors: &mut Vec<ResolutionError>,
) {
    if visiting.contains(id) {
        let mut chain: Vec<&str> = visiting.iter().map(ServiceId::as_str).collect();
        chain.push(id.as_str());
        errors.push(ResolutionError::CycleDetected {
            chain: chain.join(" -> "),
        });
        return;
    }
    if checked.contains(&(id.clone(), honor_markers)) {
        return;
    }

    let Some(registration) = registry.registration(id) else {
        errors.push(ResolutionError::descriptor(
            id.clone(),
            "注册表中缺少该服务的记录",
        ));
        return;
    };

    visiting.push(id.clone());
    for parameter in &registration.blueprint.parameters {
        if honor_markers {
            if let Some(marker) = registration.blueprint.marker_for(&parameter.name) {
                for implementor in capabilities.implementors_of(&marker.capability) {
                    if let Some(entry) = registry.registration(&implementor) {
                        if entry.adapter_for(&marker.capability).is_none() {
                            errors.push(ResolutionError::descriptor(
                                implementor.clone(),
                                format!("声明了能力 {} 但没有对应的适配函数", marker.capability),
                            ));
                        }
                    }
                    check_service(
                        registry,
                        capabilities,
                        &implementor,
                        false,
                        visiting,
                        checked,
                        errors,
                    );
                }
                continue;
            }
        }

        if let ParameterKind::Service(dependency) = &parameter.kind {
            if registry.contains(dependency) {
                check_service(
                    registry,
                    capabilities,
                    dependency,
                    true,
                    visiting,
                    checked,
                    errors,
                );
                continue;
            }
        }

        if parameter.default.is_none() {
            errors.push(ResolutionError::unresolvable_parameter(
                id.clone(),
                &parameter.name,
            ));
        }
    }
    visiting.pop();
    checked.insert((id.clone(), honor_markers));
}
