//! 组件注册表抽象接口

use infrastructure_common::{Bean, ComponentMarker, ComponentType, DependencyError};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// 加载结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// 本次加载注册了组件
    Loaded {
        /// 注册的组件数量
        registered: usize,
    },
    /// 注册表已经加载过，本次调用没有任何副作用
    AlreadyLoaded,
    /// 命名空间下没有可托管的组件，注册表保持未加载状态
    NothingFound,
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded { registered } => write!(f, "已加载 {registered} 个组件"),
            Self::AlreadyLoaded => f.write_str("已加载过"),
            Self::NothingFound => f.write_str("未发现组件"),
        }
    }
}

/// 组件注册表 trait
///
/// 类型到实例的映射，每个类型最多一个实例。`load` 只生效一次，
/// 其余增删查操作与加载守卫无关，可在任意时刻并发调用。
pub trait ComponentRegistry: Send + Sync {
    /// 扫描命名空间并实例化所有被标记的组件
    fn load(&self, namespace: &str) -> Result<LoadOutcome, DependencyError>;

    /// 是否已经加载
    fn is_loaded(&self) -> bool;

    /// 已注册的实例数量
    fn size(&self) -> usize;

    /// 添加或替换实例，返回之前的实例
    ///
    /// 以 [`ComponentType::of`] 裸句柄添加时，实现应使用该类型登记过的完整描述作为键。
    fn add_bean(&self, component_type: ComponentType, bean: Bean) -> Option<Bean>;

    /// 移除实例，返回被移除的实例
    fn remove_bean(&self, component_type: &ComponentType) -> Option<Bean>;

    /// 按类型直接查找实例
    fn get_bean(&self, component_type: &ComponentType) -> Option<Bean>;

    /// 所有已注册的类型
    fn get_classes(&self) -> HashSet<ComponentType>;

    /// 所有已注册的实例（同一实例只出现一次）
    fn get_beans(&self) -> HashSet<Bean>;

    /// 携带指定标记的已注册类型
    ///
    /// 注册表为空或没有匹配时返回 `None`，不会返回空集合。
    fn get_classes_by_marker(&self, marker: ComponentMarker) -> Option<HashSet<ComponentType>>;

    /// 指定父类型/接口的已注册真子类型（不含其本身）
    ///
    /// 注册表为空或没有匹配时返回 `None`，不会返回空集合。
    fn get_classes_by_super(&self, super_type: &ComponentType)
        -> Option<HashSet<ComponentType>>;
}

impl dyn ComponentRegistry {
    /// 按具体类型取出实例
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.get_bean(&ComponentType::of::<T>())
            .and_then(|bean| bean.get::<T>())
    }

    /// 是否注册了指定类型
    pub fn contains(&self, component_type: &ComponentType) -> bool {
        self.get_bean(component_type).is_some()
    }
}
