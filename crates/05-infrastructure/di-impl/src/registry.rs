//! 组件注册表实现

use crate::factory::DescriptorConstructor;
use crate::introspection::DescriptorMarkers;
use crate::scanner::CatalogScanner;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use di_abstractions::{
    ComponentConstructor, ComponentRegistry, ComponentScanner, LoadOutcome, MarkerPredicate,
};
use infrastructure_common::{
    catalog_type, Bean, ComponentMarker, ComponentType, DependencyError,
};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// 组件注册表实现
///
/// 存储使用分片并发映射，稳态读取不经过全局锁；`load` 由加载锁互斥。
/// 加载期间构造的实例先暂存，全部成功后才写入注册表，
/// 构造失败时注册表保持加载前的状态。
pub struct ComponentRegistryImpl {
    /// 类型到实例的映射
    beans: DashMap<ComponentType, Bean>,
    /// 是否已加载，一旦为 true 不再回退
    loaded: AtomicBool,
    /// 加载锁
    load_guard: Mutex<()>,
    scanner: Arc<dyn ComponentScanner>,
    markers: Arc<dyn MarkerPredicate>,
    constructor: Arc<dyn ComponentConstructor>,
}

impl ComponentRegistryImpl {
    /// 使用默认协作者创建注册表（全局目录扫描、描述标记、描述构造）
    pub fn new() -> Self {
        Self {
            beans: DashMap::new(),
            loaded: AtomicBool::new(false),
            load_guard: Mutex::new(()),
            scanner: Arc::new(CatalogScanner::new()),
            markers: Arc::new(DescriptorMarkers::new()),
            constructor: Arc::new(DescriptorConstructor::new()),
        }
    }

    /// 替换扫描器
    pub fn with_scanner(mut self, scanner: impl ComponentScanner + 'static) -> Self {
        self.scanner = Arc::new(scanner);
        self
    }

    /// 替换标记判定器
    pub fn with_marker_predicate(mut self, markers: impl MarkerPredicate + 'static) -> Self {
        self.markers = Arc::new(markers);
        self
    }

    /// 替换构造器
    pub fn with_constructor(mut self, constructor: impl ComponentConstructor + 'static) -> Self {
        self.constructor = Arc::new(constructor);
        self
    }

    /// 裸句柄换成目录中登记的完整类型描述
    fn described(component_type: ComponentType) -> ComponentType {
        if !component_type.is_bare() {
            return component_type;
        }
        catalog_type(component_type.id()).unwrap_or(component_type)
    }

    /// 实例化候选类型中被标记的组件，全部成功后才返回
    fn instantiate(
        &self,
        candidates: impl IntoIterator<Item = ComponentType>,
    ) -> Result<Vec<(ComponentType, Bean)>, DependencyError> {
        let mut staged = Vec::new();
        for component_type in candidates {
            let Some(marker) = self.markers.first_marker(&component_type) else {
                debug!("跳过未标记的类型: {}", component_type.name());
                continue;
            };

            debug!("实例化组件: {} (@{})", component_type.name(), marker);
            let bean = self.constructor.construct(&component_type)?;
            staged.push((component_type, bean));
        }
        Ok(staged)
    }
}

impl Default for ComponentRegistryImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ComponentRegistryImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistryImpl")
            .field("size", &self.beans.len())
            .field("loaded", &self.is_loaded())
            .field("scanner", &self.scanner.name())
            .finish()
    }
}

impl ComponentRegistry for ComponentRegistryImpl {
    fn load(&self, namespace: &str) -> Result<LoadOutcome, DependencyError> {
        let _guard = self.load_guard.lock();

        if self.is_loaded() {
            warn!("组件注册表已经加载过，忽略本次加载: {}", namespace);
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        let candidates = match self.scanner.scan(namespace) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!("无法扫描命名空间 {}: {}", namespace, e);
                return Ok(LoadOutcome::NothingFound);
            }
        };
        if candidates.is_empty() {
            warn!("命名空间 {} 下没有发现任何类型", namespace);
            return Ok(LoadOutcome::NothingFound);
        }

        let staged = self.instantiate(candidates).map_err(|e| {
            error!("加载命名空间 {} 失败，已回滚: {}", namespace, e);
            e
        })?;
        if staged.is_empty() {
            warn!("命名空间 {} 下没有被标记的组件", namespace);
            return Ok(LoadOutcome::NothingFound);
        }

        let registered = staged.len();
        for (component_type, bean) in staged {
            self.beans.insert(component_type, bean);
        }
        self.loaded.store(true, Ordering::Release);

        info!("加载命名空间 {} 完成，注册了 {} 个组件", namespace, registered);
        Ok(LoadOutcome::Loaded { registered })
    }

    fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::Acquire)
    }

    fn size(&self) -> usize {
        self.beans.len()
    }

    fn add_bean(&self, component_type: ComponentType, bean: Bean) -> Option<Bean> {
        let component_type = Self::described(component_type);
        debug!("添加组件实例: {}", component_type.name());
        match self.beans.entry(component_type) {
            // 已存的裸键换成带描述的键
            Entry::Occupied(entry) if entry.key().is_bare() => {
                Some(entry.replace_entry(bean).1)
            }
            Entry::Occupied(mut entry) => Some(entry.insert(bean)),
            Entry::Vacant(entry) => {
                entry.insert(bean);
                None
            }
        }
    }

    fn remove_bean(&self, component_type: &ComponentType) -> Option<Bean> {
        debug!("移除组件实例: {}", component_type.name());
        self.beans.remove(component_type).map(|(_, bean)| bean)
    }

    fn get_bean(&self, component_type: &ComponentType) -> Option<Bean> {
        self.beans
            .get(component_type)
            .map(|entry| entry.value().clone())
    }

    fn get_classes(&self) -> HashSet<ComponentType> {
        self.beans.iter().map(|entry| entry.key().clone()).collect()
    }

    fn get_beans(&self) -> HashSet<Bean> {
        self.beans
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    fn get_classes_by_marker(&self, marker: ComponentMarker) -> Option<HashSet<ComponentType>> {
        let classes = self.get_classes();
        if classes.is_empty() {
            warn!("组件注册表为空");
            return None;
        }

        let matched: HashSet<_> = classes
            .into_iter()
            .filter(|component_type| self.markers.has_marker(component_type, marker))
            .collect();
        (!matched.is_empty()).then_some(matched)
    }

    fn get_classes_by_super(
        &self,
        super_type: &ComponentType,
    ) -> Option<HashSet<ComponentType>> {
        let classes = self.get_classes();
        if classes.is_empty() {
            warn!("组件注册表为空");
            return None;
        }

        let matched: HashSet<_> = classes
            .into_iter()
            .filter(|component_type| component_type.is_proper_subtype_of(super_type))
            .collect();
        (!matched.is_empty()).then_some(matched)
    }
}
