//! 示例组件
//!
//! 控制器依赖服务接口，服务依赖仓储接口，容器按接口把唯一的实现注入进去。

mod order;

pub use order::{
    InMemoryOrderRepository, Order, OrderController, OrderRepository, OrderService,
    PricingService, StandardOrderService,
};
