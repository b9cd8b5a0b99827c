//! 容器启动器

use crate::context::ApplicationContext;
use di_abstractions::{
    ComponentRegistry, ContainerConfig, DependencyInjector, LoadOutcome, WireReport,
};
use di_impl::DependencyInjectorImpl;
use infrastructure_common::{InfrastructureError, InfrastructureResult};
use std::sync::Arc;
use tracing::{error, info, warn};

/// 容器启动器
///
/// 负责协调启动顺序：先加载注册表，再按配置装配依赖。
pub struct ContainerBootstrapper {
    config: ContainerConfig,
    registry: Arc<dyn ComponentRegistry>,
}

impl ContainerBootstrapper {
    /// 创建新的容器启动器
    pub fn new(config: ContainerConfig, registry: Arc<dyn ComponentRegistry>) -> Self {
        Self { config, registry }
    }

    /// 启动容器
    pub fn bootstrap(self) -> InfrastructureResult<ApplicationContext> {
        info!("开始启动容器，扫描命名空间: {}", self.config.scan_namespace);

        // 第一步：加载组件
        let outcome = self.registry.load(&self.config.scan_namespace).map_err(|e| {
            error!("组件加载失败: {}", e);
            e
        })?;
        if outcome == LoadOutcome::NothingFound {
            warn!("命名空间 {} 下没有可托管的组件", self.config.scan_namespace);
        }

        // 第二步：装配依赖
        let injector: Arc<dyn DependencyInjector> =
            Arc::new(DependencyInjectorImpl::new(Arc::clone(&self.registry)));
        let report = if self.config.auto_wire {
            injector.wire()
        } else {
            info!("未启用自动装配，跳过依赖注入");
            WireReport::default()
        };

        if self.config.fail_on_unresolved && !report.is_complete() {
            let slots = report.unresolved_slots();
            error!("存在未解析的依赖: {}", slots.join(", "));
            return Err(InfrastructureError::UnresolvedDependencies { slots });
        }

        info!("容器启动完成: {}，共 {} 个组件", outcome, self.registry.size());
        Ok(ApplicationContext::new(
            self.config,
            self.registry,
            injector,
            outcome,
            report,
        ))
    }
}
