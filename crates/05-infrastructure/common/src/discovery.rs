//! 组件发现机制
//!
//! 类型在程序启动时把自己的类型描述登记到全局类型目录中，
//! 扫描器按命名空间从目录里枚举候选类型。

use crate::metadata::ComponentType;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::BTreeSet;
use tracing::debug;

/// 全局类型目录
static GLOBAL_TYPE_CATALOG: Lazy<RwLock<Vec<ComponentType>>> = Lazy::new(|| RwLock::new(Vec::new()));

/// 可描述的组件 trait
///
/// 通常由 `#[derive(Component)]` 生成。
pub trait ComponentDescribe: Send + Sync + 'static {
    /// 获取类型描述
    fn component_type() -> ComponentType
    where
        Self: Sized;
}

/// 登记类型描述，同一类型重复登记时覆盖旧描述
pub fn register_component_type(component_type: ComponentType) {
    let mut catalog = GLOBAL_TYPE_CATALOG.write();
    if let Some(existing) = catalog.iter_mut().find(|t| **t == component_type) {
        *existing = component_type;
    } else {
        debug!("登记组件类型: {}", component_type.name());
        catalog.push(component_type);
    }
}

/// 目录中所有已登记的类型
pub fn catalog_types() -> Vec<ComponentType> {
    GLOBAL_TYPE_CATALOG.read().clone()
}

/// 按类型ID查找目录中登记的类型描述
pub fn catalog_type(id: TypeId) -> Option<ComponentType> {
    GLOBAL_TYPE_CATALOG
        .read()
        .iter()
        .find(|t| t.id() == id)
        .cloned()
}

/// 目录中位于指定命名空间下的类型
pub fn catalog_types_in(namespace: &str) -> BTreeSet<ComponentType> {
    GLOBAL_TYPE_CATALOG
        .read()
        .iter()
        .filter(|t| t.in_namespace(namespace))
        .cloned()
        .collect()
}
