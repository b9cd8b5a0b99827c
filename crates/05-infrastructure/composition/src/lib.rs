//! # 容器组合层
//!
//! 负责把配置、日志、组件注册表和依赖注入器组合成一个可用的应用上下文。
//!
//! ## 主要功能
//!
//! - **容器构建器**: 合并配置文件、环境变量和显式设置，初始化日志
//! - **容器启动器**: 按顺序加载组件并装配依赖
//! - **应用上下文**: 启动完成后的组件访问入口
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use infrastructure_composition::{ContainerBuilder, LoggingConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let context = ContainerBuilder::new()
//!         .with_logging(LoggingConfig::development())
//!         .scan_namespace("my_app::components")
//!         .build()?;
//!
//!     println!("已加载 {} 个组件", context.registry().size());
//!     Ok(())
//! }
//! ```

pub mod bootstrapper;
pub mod builder;
pub mod context;


// 重新导出主要类型
pub use bootstrapper::ContainerBootstrapper;
pub use builder::{ContainerBuilder, LoggingConfig, DEFAULT_ENV_PREFIX};
pub use context::ApplicationContext;

// 重新导出错误类型
pub use infrastructure_common::InfrastructureError;
