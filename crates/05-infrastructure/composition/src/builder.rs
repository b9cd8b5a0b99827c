//! 容器构建器

use crate::bootstrapper::ContainerBootstrapper;
use crate::context::ApplicationContext;
use di_abstractions::{ComponentRegistry, ContainerConfig};
use di_impl::ComponentRegistryImpl;
use infrastructure_common::{ConfigError, ConfigResult, InfrastructureError, InfrastructureResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::filter::LevelFilter;

/// 默认的环境变量前缀
pub const DEFAULT_ENV_PREFIX: &str = "IOC";

/// 容器构建器
///
/// 使用建造者模式收集配置来源、日志设置和注册表，构建 [`ApplicationContext`]。
/// 配置按以下顺序合并，后者覆盖前者：配置文件、环境变量、代码中的显式设置。
pub struct ContainerBuilder {
    /// 配置文件路径
    config_file: Option<PathBuf>,
    /// 环境变量前缀，`None` 表示不读取环境变量
    env_prefix: Option<String>,
    /// 显式指定的扫描命名空间
    scan_namespace: Option<String>,
    /// 显式指定的自动装配开关
    auto_wire: Option<bool>,
    /// 显式指定的未解析依赖策略
    fail_on_unresolved: Option<bool>,
    /// 自定义注册表
    registry: Option<Arc<dyn ComponentRegistry>>,
    /// 是否启用日志初始化
    logging_enabled: bool,
    /// 日志配置
    logging_config: LoggingConfig,
}

impl ContainerBuilder {
    /// 创建新的容器构建器
    pub fn new() -> Self {
        Self {
            config_file: None,
            env_prefix: Some(DEFAULT_ENV_PREFIX.to_string()),
            scan_namespace: None,
            auto_wire: None,
            fail_on_unresolved: None,
            registry: None,
            logging_enabled: false, // 默认不启用日志初始化
            logging_config: LoggingConfig::default(),
        }
    }

    /// 添加配置文件，格式按扩展名识别（toml/json/yaml）
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        info!("添加配置文件: {}", path.display());
        self.config_file = Some(path.to_path_buf());
        Ok(self)
    }

    /// 设置环境变量前缀，变量形如 `{PREFIX}__SCAN_NAMESPACE`
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        let prefix = prefix.into();
        debug!("环境变量配置前缀: {}", prefix);
        self.env_prefix = Some(prefix);
        self
    }

    /// 不读取环境变量
    pub fn without_env(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    /// 设置扫描的命名空间
    pub fn scan_namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.scan_namespace = Some(namespace.into());
        self
    }

    /// 设置是否在加载后自动装配
    pub fn auto_wire(mut self, enabled: bool) -> Self {
        self.auto_wire = Some(enabled);
        self
    }

    /// 设置存在未解析依赖时是否启动失败
    pub fn fail_on_unresolved(mut self, enabled: bool) -> Self {
        self.fail_on_unresolved = Some(enabled);
        self
    }

    /// 使用自定义注册表
    pub fn with_registry(mut self, registry: Arc<dyn ComponentRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = config;
        self.logging_enabled = true; // 启用日志初始化
        self
    }

    /// 合并所有配置来源并验证
    pub fn load_config(&self) -> ConfigResult<ContainerConfig> {
        let mut builder = config::Config::builder();

        if let Some(path) = &self.config_file {
            builder = builder.add_source(config::File::from(path.as_path()).required(true));
        }
        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        }
        if let Some(namespace) = &self.scan_namespace {
            builder = builder
                .set_override("scan_namespace", namespace.as_str())
                .map_err(parse_error)?;
        }
        if let Some(auto_wire) = self.auto_wire {
            builder = builder
                .set_override("auto_wire", auto_wire)
                .map_err(parse_error)?;
        }
        if let Some(fail_on_unresolved) = self.fail_on_unresolved {
            builder = builder
                .set_override("fail_on_unresolved", fail_on_unresolved)
                .map_err(parse_error)?;
        }

        let config: ContainerConfig = builder
            .build()
            .and_then(|settings| settings.try_deserialize::<ContainerConfig>())
            .map_err(|e| {
                error!("容器配置加载失败: {}", e);
                parse_error(e)
            })?;

        config.validate()?;
        debug!("容器配置: {:?}", config);
        Ok(config)
    }

    /// 构建应用上下文
    pub fn build(self) -> InfrastructureResult<ApplicationContext> {
        // 只有在明确配置了日志时才初始化日志
        if self.logging_enabled {
            self.logging_config.init()?;
        }

        info!("开始构建容器");
        let config = self.load_config()?;
        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(ComponentRegistryImpl::new()));

        ContainerBootstrapper::new(config, registry).bootstrap()
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_error(e: config::ConfigError) -> ConfigError {
    ConfigError::ParseError {
        source: Box::new(e),
    }
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: tracing::Level,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }

    /// 初始化全局日志订阅者
    ///
    /// `RUST_LOG` 存在时优先使用其过滤规则。
    pub fn init(&self) -> InfrastructureResult<()> {
        let filter = tracing_subscriber::EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(self.level).into())
            .from_env_lossy();

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(self.show_target)
            .with_thread_ids(self.show_thread_ids)
            .with_file(self.show_file)
            .with_line_number(self.show_line_number);

        if self.json_format {
            subscriber.json().try_init()
        } else {
            subscriber.try_init()
        }
        .map_err(|e| InfrastructureError::BootstrapFailed {
            message: format!("日志初始化失败: {}", e),
        })?;

        info!("日志系统初始化完成");
        Ok(())
    }
}
