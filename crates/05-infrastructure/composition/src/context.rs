//! 应用上下文

use di_abstractions::{
    ComponentRegistry, ContainerConfig, DependencyInjector, LoadOutcome, WireReport,
};
use infrastructure_common::{
    Bean, ComponentMarker, ComponentType, DependencyError, DependencyResult,
};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// 应用上下文
///
/// 持有启动完成的注册表和注入器，由调用方显式传递，不存在全局实例。
pub struct ApplicationContext {
    config: ContainerConfig,
    registry: Arc<dyn ComponentRegistry>,
    injector: Arc<dyn DependencyInjector>,
    load_outcome: LoadOutcome,
    /// 最近一次装配的结果
    wire_report: RwLock<WireReport>,
}

impl ApplicationContext {
    /// 创建应用上下文
    pub fn new(
        config: ContainerConfig,
        registry: Arc<dyn ComponentRegistry>,
        injector: Arc<dyn DependencyInjector>,
        load_outcome: LoadOutcome,
        wire_report: WireReport,
    ) -> Self {
        Self {
            config,
            registry,
            injector,
            load_outcome,
            wire_report: RwLock::new(wire_report),
        }
    }

    /// 启动时使用的配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 组件注册表
    pub fn registry(&self) -> &Arc<dyn ComponentRegistry> {
        &self.registry
    }

    /// 加载结果
    pub fn load_outcome(&self) -> LoadOutcome {
        self.load_outcome
    }

    /// 最近一次装配的结果
    pub fn wire_report(&self) -> WireReport {
        self.wire_report.read().clone()
    }

    /// 按具体类型取出组件
    pub fn get<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.registry.get::<T>()
    }

    /// 按具体类型取出组件，未注册时返回错误
    pub fn require<T: Send + Sync + 'static>(&self) -> DependencyResult<Arc<T>> {
        self.get::<T>()
            .ok_or_else(|| DependencyError::ComponentNotRegistered {
                type_name: std::any::type_name::<T>().to_string(),
            })
    }

    /// 按类型取出实例
    pub fn get_bean(&self, component_type: &ComponentType) -> Option<Bean> {
        self.registry.get_bean(component_type)
    }

    /// 携带指定标记的组件类型，按名称排序
    pub fn components_with(&self, marker: ComponentMarker) -> Vec<ComponentType> {
        let mut types: Vec<_> = self
            .registry
            .get_classes_by_marker(marker)
            .map(|types| types.into_iter().collect())
            .unwrap_or_default();
        types.sort();
        types
    }

    /// 重新装配依赖
    ///
    /// 手工增删组件后调用，已绑定的注入点会被覆盖。
    pub fn rewire(&self) -> WireReport {
        let report = self.injector.wire();
        *self.wire_report.write() = report.clone();
        report
    }
}

impl fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationContext")
            .field("config", &self.config)
            .field("size", &self.registry.size())
            .field("load_outcome", &self.load_outcome)
            .finish()
    }
}
