//! # Infrastructure Common
//!
//! 这个 crate 提供了 IoC 容器各层共享的基础类型。
//!
//! ## 核心类型
//!
//! - [`ComponentType`] - 组件类型描述（标记、接口、构造函数、注入点）
//! - [`ComponentMarker`] - 组件标记
//! - [`Bean`] - 组件实例句柄
//! - [`Autowired`] - 可注入的依赖点
//!
//! ## 设计原则
//!
//! - 类型能力在启动时静态声明，不依赖运行时反射
//! - 组件通过注入点暴露的设置能力接收依赖，不直接写私有字段

pub mod component;
pub mod discovery;
pub mod errors;
pub mod metadata;

pub use component::*;
pub use discovery::*;
pub use errors::*;
pub use metadata::*;

// 供 `#[derive(Component)]` 生成的代码使用
#[doc(hidden)]
pub use once_cell;
