//! 组件标记判定接口

use infrastructure_common::{ComponentMarker, ComponentType};

/// 标记判定 trait
///
/// 决定一个类型是否为需要托管的组件。
pub trait MarkerPredicate: Send + Sync {
    /// 识别的组件标记，按固定顺序遍历
    fn markers(&self) -> &[ComponentMarker];

    /// 类型是否携带指定标记
    fn has_marker(&self, component_type: &ComponentType, marker: ComponentMarker) -> bool;

    /// 类型携带的第一个可识别标记
    fn first_marker(&self, component_type: &ComponentType) -> Option<ComponentMarker> {
        self.markers()
            .iter()
            .copied()
            .find(|marker| self.has_marker(component_type, *marker))
    }
}
