//! 容器配置

use infrastructure_common::{is_valid_namespace, ConfigError};
use serde::{Deserialize, Serialize};

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 加载时扫描的命名空间（`::` 分隔的模块路径）
    pub scan_namespace: String,
    /// 加载后是否自动装配依赖
    pub auto_wire: bool,
    /// 存在未解析的注入点时是否让启动失败
    pub fail_on_unresolved: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            scan_namespace: String::new(),
            auto_wire: true,
            fail_on_unresolved: false,
        }
    }
}

impl ContainerConfig {
    /// 创建扫描指定命名空间的配置
    pub fn for_namespace(namespace: impl Into<String>) -> Self {
        Self {
            scan_namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// 验证配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan_namespace.trim().is_empty() {
            return Err(ConfigError::validation("scan_namespace 不能为空"));
        }
        if !is_valid_namespace(&self.scan_namespace) {
            return Err(ConfigError::validation(format!(
                "scan_namespace 不是合法的模块路径: {}",
                self.scan_namespace
            )));
        }
        Ok(())
    }
}
