//! 依赖注入器实现

use crate::introspection::DescriptorSlots;
use di_abstractions::{
    ComponentRegistry, DependencyInjector, DependencySlot, SlotIntrospector, SlotState, WireReport,
};
use infrastructure_common::{Bean, ComponentType};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// 注入点的解析结果
enum Resolution {
    /// 找到唯一的候选实例
    Found(Bean),
    /// 没有候选实例
    Missing,
    /// 多个候选实例
    Ambiguous(Vec<&'static str>),
    /// 唯一候选无法转换为目标类型
    Unconvertible(&'static str),
}

/// 依赖注入器实现
///
/// 对注册表中的每个实例，按声明顺序解析其注入点：
/// 先找以目标类型直接注册的实例，找不到时再找唯一的真子类型实例。
/// 找不到或候选不唯一时跳过该注入点，不报错也不做任何优先级选择。
pub struct DependencyInjectorImpl {
    registry: Arc<dyn ComponentRegistry>,
    slots: Arc<dyn SlotIntrospector>,
}

impl DependencyInjectorImpl {
    /// 为注册表创建注入器
    pub fn new(registry: Arc<dyn ComponentRegistry>) -> Self {
        Self {
            registry,
            slots: Arc::new(DescriptorSlots::new()),
        }
    }

    /// 替换注入点发现器
    pub fn with_introspector(mut self, slots: impl SlotIntrospector + 'static) -> Self {
        self.slots = Arc::new(slots);
        self
    }

    /// 解析目标类型对应的实例
    fn resolve(&self, target: &ComponentType) -> Resolution {
        if let Some(bean) = self.registry.get_bean(target) {
            return Resolution::Found(bean);
        }

        let Some(candidates) = self.registry.get_classes_by_super(target) else {
            return Resolution::Missing;
        };
        if candidates.len() > 1 {
            let mut names: Vec<_> = candidates.iter().map(ComponentType::name).collect();
            names.sort_unstable();
            return Resolution::Ambiguous(names);
        }

        let Some(candidate) = candidates.into_iter().next() else {
            return Resolution::Missing;
        };
        self.registry
            .get_bean(&candidate)
            .and_then(|bean| candidate.upcast(target, &bean))
            .map_or(Resolution::Unconvertible(candidate.name()), Resolution::Found)
    }

    /// 解析并写入单个注入点
    fn bind(&self, slot: &DependencySlot, report: &mut WireReport) -> SlotState {
        let target = slot.declared_type();
        trace!("解析注入点 {} -> {} ({:?})", slot.qualified_name(), target, SlotState::Resolving);

        match self.resolve(target) {
            Resolution::Found(dependency) => match slot.assign(&dependency) {
                Ok(()) => {
                    debug!("注入 {} <- {}", slot.qualified_name(), dependency.type_name());
                    report.bound += 1;
                    SlotState::Bound
                }
                Err(e) => {
                    warn!("无法写入注入点 {}: {}", slot.qualified_name(), e);
                    report.rejected.push(slot.qualified_name());
                    SlotState::Unbound
                }
            },
            Resolution::Missing => {
                warn!("注入点 {} 没有可用的 {} 实例", slot.qualified_name(), target);
                report.missing.push(slot.qualified_name());
                SlotState::Unbound
            }
            Resolution::Ambiguous(candidates) => {
                warn!(
                    "注入点 {} 存在多个 {} 实例: {}",
                    slot.qualified_name(),
                    target,
                    candidates.join(", ")
                );
                report.ambiguous.push(slot.qualified_name());
                SlotState::Unbound
            }
            Resolution::Unconvertible(candidate) => {
                warn!(
                    "注入点 {} 的候选 {} 无法转换为 {}",
                    slot.qualified_name(),
                    candidate,
                    target
                );
                report.rejected.push(slot.qualified_name());
                SlotState::Unbound
            }
        }
    }
}

impl fmt::Debug for DependencyInjectorImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyInjectorImpl")
            .field("registry_size", &self.registry.size())
            .finish()
    }
}

impl DependencyInjector for DependencyInjectorImpl {
    fn wire(&self) -> WireReport {
        let mut report = WireReport::default();

        let mut classes: Vec<_> = self.registry.get_classes().into_iter().collect();
        if classes.is_empty() {
            warn!("组件注册表为空，跳过依赖注入");
            return report;
        }
        classes.sort();

        for component_type in classes {
            let Some(instance) = self.registry.get_bean(&component_type) else {
                continue;
            };
            for slot in self.slots.slots_of(&component_type, &instance) {
                let state = self.bind(&slot, &mut report);
                trace!("注入点 {} 状态: {:?}", slot.qualified_name(), state);
            }
        }

        info!(
            "依赖注入完成: 绑定 {} 个注入点，未绑定 {} 个",
            report.bound,
            report.unbound()
        );
        report
    }
}
