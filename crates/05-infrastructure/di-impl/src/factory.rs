//! 组件构造器实现

use di_abstractions::ComponentConstructor;
use infrastructure_common::{Bean, ComponentType, DependencyError};
use tracing::{debug, error};

/// 基于类型描述的构造器
///
/// 调用类型在能力表中登记的构造函数。构造函数由类型自己提供，
/// 因此不受其可见性限制。
#[derive(Debug, Default, Clone, Copy)]
pub struct DescriptorConstructor;

impl DescriptorConstructor {
    /// 创建新的构造器
    pub const fn new() -> Self {
        Self
    }
}

impl ComponentConstructor for DescriptorConstructor {
    fn construct(&self, component_type: &ComponentType) -> Result<Bean, DependencyError> {
        debug!("构造组件实例: {}", component_type.name());
        component_type.construct().map_err(|e| {
            error!("构造组件实例失败: {} - {}", component_type.name(), e);
            e
        })
    }
}
