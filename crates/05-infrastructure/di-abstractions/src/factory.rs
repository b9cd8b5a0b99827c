//! 组件构造抽象接口

use infrastructure_common::{Bean, ComponentType, DependencyError};

/// 组件构造器 trait
///
/// 构造失败是致命错误，由调用方向上传播。
pub trait ComponentConstructor: Send + Sync {
    /// 构造指定类型的一个实例
    fn construct(&self, component_type: &ComponentType) -> Result<Bean, DependencyError>;
}
