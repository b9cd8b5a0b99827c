//! # Component Macros
//!
//! 这个 crate 提供了为组件生成能力表并在启动时自动登记的派生宏。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::Component;
//! use infrastructure_common::Autowired;
//!
//! pub trait MainService: Send + Sync {}
//!
//! #[derive(Default, Component)]
//! #[component(service, provides(dyn MainService))]
//! pub struct MainServiceImpl;
//!
//! impl MainService for MainServiceImpl {}
//!
//! #[derive(Default, Component)]
//! #[component(controller)]
//! pub struct MainPageController {
//!     #[autowired]
//!     main_service: Autowired<dyn MainService>,
//! }
//! ```
//!
//! 使用该宏的 crate 需要依赖 `infrastructure-common` 和 `ctor`。

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod component;
mod utils;

/// 组件派生宏
///
/// 为结构体实现 `ComponentDescribe`，并在程序启动时把能力表登记到全局类型目录。
///
/// # 参数
///
/// - `component` / `controller` / `service` / `repository` - 组件标记，可以组合
/// - `provides(dyn Trait, ...)` - 满足的接口，注入时可以按接口查找
/// - `constructor = path` - 构造函数 `fn() -> Result<Self, DependencyError>`，默认使用 `Default`
///
/// 字段上的 `#[autowired]` 声明一个注入点，字段类型必须是 `Autowired<T>`。
/// 没有 `#[component]` 属性的结构体只登记能力表，不会被容器托管。
#[proc_macro_derive(Component, attributes(component, autowired))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    component::derive_component_impl(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
