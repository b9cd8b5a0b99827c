//! 组件扫描器实现

use di_abstractions::ComponentScanner;
use infrastructure_common::{catalog_types_in, is_valid_namespace, ComponentError, ComponentType};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// 全局类型目录扫描器
///
/// 枚举由 `#[derive(Component)]` 登记到全局目录、且模块路径位于命名空间之下的类型。
#[derive(Debug, Default, Clone, Copy)]
pub struct CatalogScanner;

impl CatalogScanner {
    /// 创建新的目录扫描器
    pub const fn new() -> Self {
        Self
    }
}

impl ComponentScanner for CatalogScanner {
    fn scan(&self, namespace: &str) -> Result<BTreeSet<ComponentType>, ComponentError> {
        if !is_valid_namespace(namespace) {
            return Err(ComponentError::InvalidNamespace {
                namespace: namespace.to_string(),
            });
        }

        let types = catalog_types_in(namespace);
        debug!("扫描命名空间 {} 完成，发现 {} 个类型", namespace, types.len());
        Ok(types)
    }

    fn name(&self) -> &str {
        "CatalogScanner"
    }
}

/// 静态扫描器
///
/// 命名空间到类型集合的显式映射，主要用于测试和手工装配。
#[derive(Debug, Default, Clone)]
pub struct StaticScanner {
    namespaces: HashMap<String, BTreeSet<ComponentType>>,
}

impl StaticScanner {
    /// 创建空的静态扫描器
    pub fn new() -> Self {
        Self::default()
    }

    /// 为命名空间添加类型
    pub fn with_namespace<I>(mut self, namespace: impl Into<String>, types: I) -> Self
    where
        I: IntoIterator<Item = ComponentType>,
    {
        self.namespaces
            .entry(namespace.into())
            .or_default()
            .extend(types);
        self
    }
}

impl ComponentScanner for StaticScanner {
    fn scan(&self, namespace: &str) -> Result<BTreeSet<ComponentType>, ComponentError> {
        self.namespaces.get(namespace).cloned().ok_or_else(|| {
            ComponentError::scan_error(format!("命名空间未注册: {namespace}"))
        })
    }

    fn name(&self) -> &str {
        "StaticScanner"
    }
}
