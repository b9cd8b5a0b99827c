//! 依赖注入实现的集成测试

use di_abstractions::{ComponentRegistry, DependencyInjector, LoadOutcome};
use di_impl::{ComponentRegistryImpl, DependencyInjectorImpl, StaticScanner};
use infrastructure_common::{Autowired, Bean, ComponentMarker, ComponentType};
use std::sync::Arc;

trait OrderRepository: Send + Sync {
    fn find(&self, id: u32) -> Option<String>;
}

trait OrderService: Send + Sync {
    fn describe(&self, id: u32) -> String;
}

#[derive(Debug, Default)]
struct InMemoryOrderRepository;

impl OrderRepository for InMemoryOrderRepository {
    fn find(&self, id: u32) -> Option<String> {
        (id == 1).then(|| "键盘".to_string())
    }
}

#[derive(Debug, Default)]
struct DefaultOrderService {
    repository: Autowired<dyn OrderRepository>,
}

impl OrderService for DefaultOrderService {
    fn describe(&self, id: u32) -> String {
        self.repository
            .get()
            .and_then(|repository| repository.find(id))
            .unwrap_or_else(|| "未知订单".to_string())
    }
}

#[derive(Debug, Default)]
struct OrderController {
    service: Autowired<dyn OrderService>,
}

impl OrderController {
    fn show(&self, id: u32) -> Option<String> {
        self.service.get().map(|service| service.describe(id))
    }
}

fn component_types() -> Vec<ComponentType> {
    vec![
        ComponentType::builder::<OrderController>()
            .module_path("shop::web")
            .marker(ComponentMarker::Controller)
            .autowired::<dyn OrderService>("service", |c| &c.service)
            .default_constructor()
            .build(),
        ComponentType::builder::<DefaultOrderService>()
            .module_path("shop::service")
            .marker(ComponentMarker::Service)
            .provides::<dyn OrderService>(|c| c as Arc<dyn OrderService>)
            .autowired::<dyn OrderRepository>("repository", |c| &c.repository)
            .default_constructor()
            .build(),
        ComponentType::builder::<InMemoryOrderRepository>()
            .module_path("shop::persistence")
            .marker(ComponentMarker::Repository)
            .provides::<dyn OrderRepository>(|c| c as Arc<dyn OrderRepository>)
            .default_constructor()
            .build(),
    ]
}

fn registry() -> Arc<dyn ComponentRegistry> {
    Arc::new(
        ComponentRegistryImpl::new()
            .with_scanner(StaticScanner::new().with_namespace("shop", component_types())),
    )
}

#[test]
fn test_load_and_wire_layered_components() {
    let registry = registry();
    assert_eq!(
        registry.load("shop").unwrap(),
        LoadOutcome::Loaded { registered: 3 }
    );

    let report = DependencyInjectorImpl::new(Arc::clone(&registry)).wire();
    assert_eq!(report.bound, 2);
    assert!(report.is_complete());

    let controller = registry.get::<OrderController>().unwrap();
    assert_eq!(controller.show(1).as_deref(), Some("键盘"));
    assert_eq!(controller.show(2).as_deref(), Some("未知订单"));
}

#[test]
fn test_marker_queries_after_load() {
    let registry = registry();
    registry.load("shop").unwrap();

    for marker in [
        ComponentMarker::Controller,
        ComponentMarker::Service,
        ComponentMarker::Repository,
    ] {
        assert_eq!(registry.get_classes_by_marker(marker).unwrap().len(), 1);
    }
    assert!(registry
        .get_classes_by_marker(ComponentMarker::Component)
        .is_none());

    let services = registry
        .get_classes_by_super(&ComponentType::of::<dyn OrderService>())
        .unwrap();
    assert!(services.contains(&ComponentType::of::<DefaultOrderService>()));
}

#[test]
fn test_manual_replacement_then_rewire() {
    #[derive(Debug, Default)]
    struct ArchivedOrderRepository;

    impl OrderRepository for ArchivedOrderRepository {
        fn find(&self, _id: u32) -> Option<String> {
            Some("归档订单".to_string())
        }
    }

    let registry = registry();
    registry.load("shop").unwrap();
    let injector = DependencyInjectorImpl::new(Arc::clone(&registry));
    injector.wire();

    // 直接以接口类型注册的实例优先于实现类
    let archived: Arc<dyn OrderRepository> = Arc::new(ArchivedOrderRepository);
    registry.add_bean(
        ComponentType::of::<dyn OrderRepository>(),
        Bean::from_arc(archived),
    );
    let report = injector.wire();
    assert!(report.is_complete());

    let controller = registry.get::<OrderController>().unwrap();
    assert_eq!(controller.show(1).as_deref(), Some("归档订单"));
}

#[test]
fn test_removed_implementation_leaves_slot_unresolved() {
    let registry = registry();
    registry.load("shop").unwrap();
    registry
        .remove_bean(&ComponentType::of::<InMemoryOrderRepository>())
        .unwrap();

    let report = DependencyInjectorImpl::new(Arc::clone(&registry)).wire();
    assert_eq!(report.missing, vec!["DefaultOrderService.repository"]);
    assert_eq!(report.bound, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_registry_shared_across_tasks() {
    let registry = registry();
    registry.load("shop").unwrap();
    DependencyInjectorImpl::new(Arc::clone(&registry)).wire();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                registry
                    .get::<OrderController>()
                    .and_then(|controller| controller.show(1))
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().as_deref(), Some("键盘"));
    }
}
