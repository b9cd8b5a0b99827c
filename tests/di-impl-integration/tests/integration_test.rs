//! 基于派生宏登记的组件的端到端测试
//!
//! 每个子模块是一个独立的命名空间，组件在测试进程启动时登记到全局类型目录。

use di_abstractions::{ComponentRegistry, DependencyInjector, LoadOutcome};
use di_impl::{ComponentRegistryImpl, DependencyInjectorImpl};
use infrastructure_common::{
    Bean, ComponentDescribe, ComponentMarker, ComponentType, DependencyError,
};
use infrastructure_composition::ContainerBuilder;
use std::sync::Arc;

mod scenario_a {
    use component_macros::Component;
    use infrastructure_common::Autowired;

    pub trait MainService: Send + Sync {
        fn home_page(&self) -> String;
    }

    #[derive(Debug, Default, Component)]
    #[component(service, provides(dyn MainService))]
    pub struct MainServiceImpl;

    impl MainService for MainServiceImpl {
        fn home_page(&self) -> String {
            "首页".to_string()
        }
    }

    #[derive(Debug, Default, Component)]
    #[component(controller)]
    pub struct MainPageController {
        #[autowired]
        pub main_service: Autowired<dyn MainService>,
        pub title: String,
    }

    impl MainPageController {
        pub fn render(&self) -> Option<String> {
            self.main_service.get().map(|service| service.home_page())
        }
    }
}

mod scenario_b {
    use component_macros::Component;

    /// 没有任何标记，不会被容器托管
    #[derive(Debug, Default, Component)]
    pub struct PlainHelper;

    #[derive(Debug, Default, Component)]
    pub struct AnotherHelper;
}

mod scenario_c {
    use component_macros::Component;
    use infrastructure_common::Autowired;

    pub trait MainService: Send + Sync {}

    #[derive(Debug, Default, Component)]
    #[component(service, provides(dyn MainService))]
    pub struct PrimaryService;

    impl MainService for PrimaryService {}

    #[derive(Debug, Default, Component)]
    #[component(service, provides(dyn MainService))]
    pub struct SecondaryService;

    impl MainService for SecondaryService {}

    #[derive(Debug, Default, Component)]
    #[component(controller)]
    pub struct MainPageController {
        #[autowired]
        pub main_service: Autowired<dyn MainService>,
    }
}

mod scenario_layers {
    use component_macros::Component;
    use infrastructure_common::{Autowired, DependencyError};

    pub trait UserRepository: Send + Sync {
        fn name_of(&self, id: u32) -> Option<String>;
    }

    #[derive(Debug, Component)]
    #[component(repository, provides(dyn UserRepository), constructor = Self::connect)]
    pub struct MemoryUserRepository {
        users: Vec<String>,
    }

    impl MemoryUserRepository {
        fn connect() -> Result<Self, DependencyError> {
            Ok(Self {
                users: vec!["张三".to_string(), "李四".to_string()],
            })
        }
    }

    impl UserRepository for MemoryUserRepository {
        fn name_of(&self, id: u32) -> Option<String> {
            self.users.get(id as usize).cloned()
        }
    }

    #[derive(Debug, Default, Component)]
    #[component(service, component)]
    pub struct UserService {
        #[autowired]
        pub repository: Autowired<dyn UserRepository>,
    }

    #[derive(Debug, Default, Component)]
    #[component(controller)]
    pub struct UserController {
        #[autowired]
        pub service: Autowired<UserService>,
    }

    impl UserController {
        pub fn show(&self, id: u32) -> Option<String> {
            self.service
                .get()
                .and_then(|service| service.repository.get())
                .and_then(|repository| repository.name_of(id))
        }
    }
}

mod scenario_rollback {
    use component_macros::Component;
    use infrastructure_common::DependencyError;

    #[derive(Debug, Default, Component)]
    #[component(service)]
    pub struct HealthyService;

    #[derive(Debug, Component)]
    #[component(repository, constructor = Self::open)]
    pub struct UnavailableRepository;

    impl UnavailableRepository {
        fn open() -> Result<Self, DependencyError> {
            Err(DependencyError::creation_failed(
                "UnavailableRepository",
                "数据库连接被拒绝",
            ))
        }
    }
}

fn loaded(namespace: &str) -> Arc<dyn ComponentRegistry> {
    let registry: Arc<dyn ComponentRegistry> = Arc::new(ComponentRegistryImpl::new());
    registry.load(namespace).unwrap();
    registry
}

#[test]
fn test_derive_generates_capability_table() {
    let component_type = scenario_a::MainServiceImpl::component_type();
    assert_eq!(component_type.module_path(), "integration_test::scenario_a");
    assert_eq!(component_type.markers(), &[ComponentMarker::Service]);
    assert!(component_type
        .is_proper_subtype_of(&ComponentType::of::<dyn scenario_a::MainService>()));

    let controller = scenario_a::MainPageController::component_type();
    let slots: Vec<_> = controller.slots().iter().map(|slot| slot.name()).collect();
    assert_eq!(slots, vec!["main_service"]);
}

#[test]
fn test_scenario_a_single_implementation_is_injected() {
    let registry = loaded("integration_test::scenario_a");
    assert!(registry.is_loaded());
    assert_eq!(registry.size(), 2);

    let report = DependencyInjectorImpl::new(Arc::clone(&registry)).wire();
    assert!(report.is_complete());

    let controller = registry.get::<scenario_a::MainPageController>().unwrap();
    assert_eq!(controller.render().as_deref(), Some("首页"));
    assert!(controller.title.is_empty());

    let service = registry.get::<scenario_a::MainServiceImpl>().unwrap();
    let injected = controller.main_service.get().unwrap();
    assert_eq!(
        Arc::as_ptr(&injected).cast::<()>(),
        Arc::as_ptr(&service).cast::<()>()
    );
}

#[test]
fn test_manual_seeding_with_bare_handles_is_wired() {
    let registry: Arc<dyn ComponentRegistry> = Arc::new(ComponentRegistryImpl::new());
    registry.add_bean(
        ComponentType::of::<scenario_a::MainServiceImpl>(),
        Bean::new(scenario_a::MainServiceImpl),
    );
    registry.add_bean(
        ComponentType::of::<scenario_a::MainPageController>(),
        Bean::new(scenario_a::MainPageController::default()),
    );
    assert!(!registry.is_loaded());

    let services = registry
        .get_classes_by_marker(ComponentMarker::Service)
        .unwrap();
    assert!(services.contains(&ComponentType::of::<scenario_a::MainServiceImpl>()));
    assert!(registry
        .get_classes_by_super(&ComponentType::of::<dyn scenario_a::MainService>())
        .is_some());

    let report = DependencyInjectorImpl::new(Arc::clone(&registry)).wire();
    assert_eq!(report.bound, 1);
    let controller = registry.get::<scenario_a::MainPageController>().unwrap();
    assert_eq!(controller.render().as_deref(), Some("首页"));
}

#[test]
fn test_scenario_b_unmarked_types_are_not_managed() {
    let registry: Arc<dyn ComponentRegistry> = Arc::new(ComponentRegistryImpl::new());
    assert_eq!(
        registry.load("integration_test::scenario_b").unwrap(),
        LoadOutcome::NothingFound
    );
    assert_eq!(registry.size(), 0);
    assert!(!registry.is_loaded());

    assert_eq!(
        registry.load("integration_test::no_such_module").unwrap(),
        LoadOutcome::NothingFound
    );
    assert!(registry
        .get_classes_by_marker(ComponentMarker::Component)
        .is_none());
}

#[test]
fn test_scenario_c_ambiguous_implementations_stay_unbound() {
    let registry = loaded("integration_test::scenario_c");
    assert_eq!(registry.size(), 3);

    let report = DependencyInjectorImpl::new(Arc::clone(&registry)).wire();
    assert_eq!(report.ambiguous, vec!["MainPageController.main_service"]);

    let controller = registry.get::<scenario_c::MainPageController>().unwrap();
    assert!(!controller.main_service.is_bound());

    let services = registry
        .get_classes_by_marker(ComponentMarker::Service)
        .unwrap();
    assert_eq!(services.len(), 2);
}

#[test]
fn test_layered_components_through_container_builder() {
    let context = ContainerBuilder::new()
        .without_env()
        .scan_namespace("integration_test::scenario_layers")
        .fail_on_unresolved(true)
        .build()
        .unwrap();

    assert_eq!(context.load_outcome(), LoadOutcome::Loaded { registered: 3 });
    assert_eq!(context.wire_report().bound, 2);

    let controller = context.get::<scenario_layers::UserController>().unwrap();
    assert_eq!(controller.show(1).as_deref(), Some("李四"));
    assert_eq!(controller.show(9), None);

    // 同时携带两个标记的组件在两种查询中都能找到
    let user_service = ComponentType::of::<scenario_layers::UserService>();
    assert!(context
        .components_with(ComponentMarker::Service)
        .contains(&user_service));
    assert!(context
        .components_with(ComponentMarker::Component)
        .contains(&user_service));
}

#[test]
fn test_construction_failure_rolls_back_whole_load() {
    let registry: Arc<dyn ComponentRegistry> = Arc::new(ComponentRegistryImpl::new());
    let result = registry.load("integration_test::scenario_rollback");

    assert!(matches!(
        result,
        Err(DependencyError::ComponentCreationFailed { .. })
    ));
    assert_eq!(registry.size(), 0);
    assert!(!registry.is_loaded());
    assert!(registry
        .get::<scenario_rollback::HealthyService>()
        .is_none());

    // 命名空间包含子模块，整个测试 crate 也会因为同一个组件失败
    let registry: Arc<dyn ComponentRegistry> = Arc::new(ComponentRegistryImpl::new());
    assert!(registry.load("integration_test").is_err());
    assert_eq!(registry.size(), 0);
}

#[test]
fn test_load_is_idempotent_across_namespaces() {
    let registry = loaded("integration_test::scenario_a");
    let before = registry.get_classes();

    assert_eq!(
        registry.load("integration_test::scenario_c").unwrap(),
        LoadOutcome::AlreadyLoaded
    );
    assert_eq!(registry.get_classes(), before);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_load() {
    let registry: Arc<dyn ComponentRegistry> = Arc::new(ComponentRegistryImpl::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            tokio::task::spawn_blocking(move || {
                registry.load("integration_test::scenario_a").unwrap()
            })
        })
        .collect();

    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.unwrap());
    }

    assert_eq!(
        outcomes
            .iter()
            .filter(|outcome| matches!(outcome, LoadOutcome::Loaded { .. }))
            .count(),
        1
    );
    assert_eq!(registry.size(), 2);

    let injector = DependencyInjectorImpl::new(Arc::clone(&registry));
    assert!(injector.wire().is_complete());
}
