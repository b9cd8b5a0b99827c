//! # 依赖注入具体实现
//!
//! 提供组件注册表、依赖注入器以及它们使用的扫描、构造和注入点发现实现。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use di_abstractions::{ComponentRegistry, DependencyInjector};
//! use di_impl::{ComponentRegistryImpl, DependencyInjectorImpl};
//! use std::sync::Arc;
//!
//! let registry: Arc<dyn ComponentRegistry> = Arc::new(ComponentRegistryImpl::new());
//! registry.load("my_app::components")?;
//! let report = DependencyInjectorImpl::new(Arc::clone(&registry)).wire();
//! ```

pub mod factory;
pub mod injector;
pub mod introspection;
pub mod registry;
pub mod scanner;

pub use factory::DescriptorConstructor;
pub use injector::DependencyInjectorImpl;
pub use introspection::{DescriptorMarkers, DescriptorSlots};
pub use registry::ComponentRegistryImpl;
pub use scanner::{CatalogScanner, StaticScanner};
