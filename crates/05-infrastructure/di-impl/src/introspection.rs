//! 基于类型描述的标记判定与注入点发现

use di_abstractions::{DependencySlot, MarkerPredicate, SlotIntrospector};
use infrastructure_common::{Bean, ComponentMarker, ComponentType};

/// 读取类型描述中标记的判定器
#[derive(Debug, Default, Clone, Copy)]
pub struct DescriptorMarkers;

impl DescriptorMarkers {
    /// 创建新的判定器
    pub const fn new() -> Self {
        Self
    }
}

impl MarkerPredicate for DescriptorMarkers {
    fn markers(&self) -> &[ComponentMarker] {
        &ComponentMarker::ALL
    }

    fn has_marker(&self, component_type: &ComponentType, marker: ComponentMarker) -> bool {
        component_type.has_marker(marker)
    }
}

/// 读取类型描述中注入点定义的发现器
#[derive(Debug, Default, Clone, Copy)]
pub struct DescriptorSlots;

impl DescriptorSlots {
    /// 创建新的发现器
    pub const fn new() -> Self {
        Self
    }
}

impl SlotIntrospector for DescriptorSlots {
    fn slots_of(&self, component_type: &ComponentType, instance: &Bean) -> Vec<DependencySlot> {
        component_type
            .slots()
            .iter()
            .map(|descriptor| DependencySlot::new(component_type.clone(), instance.clone(), descriptor))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure_common::Autowired;

    #[derive(Debug, Default)]
    struct Clock;

    #[derive(Debug, Default)]
    struct Scheduler {
        clock: Autowired<Clock>,
        fallback: Autowired<Clock>,
    }

    #[test]
    fn test_first_marker_follows_fixed_order() {
        let component_type = ComponentType::builder::<Clock>()
            .marker(ComponentMarker::Repository)
            .marker(ComponentMarker::Controller)
            .build();
        let markers = DescriptorMarkers::new();

        assert_eq!(
            markers.first_marker(&component_type),
            Some(ComponentMarker::Controller)
        );
        assert!(markers
            .first_marker(&ComponentType::of::<Clock>())
            .is_none());
    }

    #[test]
    fn test_slots_keep_declaration_order() {
        let component_type = ComponentType::builder::<Scheduler>()
            .autowired::<Clock>("clock", |s| &s.clock)
            .autowired::<Clock>("fallback", |s| &s.fallback)
            .default_constructor()
            .build();
        let instance = component_type.construct().unwrap();

        let slots = DescriptorSlots::new().slots_of(&component_type, &instance);
        let names: Vec<_> = slots.iter().map(DependencySlot::name).collect();
        assert_eq!(names, vec!["clock", "fallback"]);
        assert_eq!(slots[0].declared_type(), &ComponentType::of::<Clock>());
        assert_eq!(slots[0].qualified_name(), "Scheduler.clock");
    }
}
