use component_macros::Component;
use infrastructure_common::{Autowired, DependencyError};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// 订单
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: u32,
    pub item: String,
    pub quantity: u32,
    pub unit_price: f64,
}

/// 订单仓储
pub trait OrderRepository: Send + Sync {
    fn find(&self, id: u32) -> Option<Order>;
    fn all(&self) -> Vec<Order>;
}

/// 订单服务
pub trait OrderService: Send + Sync {
    fn summary(&self, id: u32) -> Option<String>;
    fn list(&self) -> Vec<String>;
}

#[derive(Debug, Component)]
#[component(repository, provides(dyn OrderRepository), constructor = Self::seeded)]
pub struct InMemoryOrderRepository {
    orders: BTreeMap<u32, Order>,
}

impl InMemoryOrderRepository {
    fn seeded() -> Result<Self, DependencyError> {
        let orders = [
            (1, "机械键盘", 1, 399.0),
            (2, "显示器", 2, 1299.0),
            (3, "鼠标垫", 5, 29.9),
        ]
        .into_iter()
        .map(|(id, item, quantity, unit_price)| {
            (
                id,
                Order {
                    id,
                    item: item.to_string(),
                    quantity,
                    unit_price,
                },
            )
        })
        .collect();
        Ok(Self { orders })
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn find(&self, id: u32) -> Option<Order> {
        self.orders.get(&id).cloned()
    }

    fn all(&self) -> Vec<Order> {
        self.orders.values().cloned().collect()
    }
}

/// 价格计算
#[derive(Debug, Default, Component)]
#[component]
pub struct PricingService;

impl PricingService {
    pub fn total(&self, order: &Order) -> f64 {
        f64::from(order.quantity) * order.unit_price
    }
}

#[derive(Debug, Default, Component)]
#[component(service, provides(dyn OrderService))]
pub struct StandardOrderService {
    #[autowired]
    repository: Autowired<dyn OrderRepository>,
    #[autowired]
    pricing: Autowired<PricingService>,
}

impl StandardOrderService {
    fn describe(&self, order: &Order) -> String {
        let total = self
            .pricing
            .get()
            .map_or(0.0, |pricing| pricing.total(order));
        format!(
            "#{} {} x{} 合计 {:.2}",
            order.id, order.item, order.quantity, total
        )
    }
}

impl OrderService for StandardOrderService {
    fn summary(&self, id: u32) -> Option<String> {
        let repository = self.repository.get()?;
        debug!("查询订单: {}", id);
        repository.find(id).map(|order| self.describe(&order))
    }

    fn list(&self) -> Vec<String> {
        self.repository
            .get()
            .map(|repository| {
                repository
                    .all()
                    .iter()
                    .map(|order| self.describe(order))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Component)]
#[component(controller)]
pub struct OrderController {
    #[autowired]
    service: Autowired<dyn OrderService>,
}

impl OrderController {
    /// 显示单个订单
    pub fn show(&self, id: u32) -> String {
        info!("处理订单查询请求: {}", id);
        match self.service.get() {
            Some(service) => service
                .summary(id)
                .unwrap_or_else(|| format!("订单 {id} 不存在")),
            None => "订单服务未注入".to_string(),
        }
    }

    /// 列出全部订单
    pub fn index(&self) -> Vec<String> {
        self.service
            .get()
            .map(|service| service.list())
            .unwrap_or_default()
    }
}
