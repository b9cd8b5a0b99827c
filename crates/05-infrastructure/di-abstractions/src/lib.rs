//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义组件注册和依赖装配的核心接口。
//!
//! ## 核心接口
//!
//! - [`ComponentRegistry`] - 组件注册表接口
//! - [`DependencyInjector`] - 依赖注入器接口
//! - [`ComponentScanner`] - 组件扫描器接口
//! - [`MarkerPredicate`] - 组件标记判定接口
//! - [`ComponentConstructor`] - 组件构造器接口
//! - [`SlotIntrospector`] - 注入点发现接口

pub mod container;
pub mod discovery;
pub mod factory;
pub mod registry;
pub mod resolver;
pub mod scanner;

pub use container::*;
pub use discovery::*;
pub use factory::*;
pub use registry::*;
pub use resolver::*;
pub use scanner::*;
