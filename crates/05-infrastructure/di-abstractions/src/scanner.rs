//! 组件扫描器抽象接口
//!
//! 提供按命名空间枚举候选组件类型的能力

use infrastructure_common::{ComponentError, ComponentType};
use std::collections::BTreeSet;

/// 组件扫描器 trait
///
/// 同一命名空间的扫描结果必须是确定的；可以为空。
pub trait ComponentScanner: Send + Sync {
    /// 枚举命名空间下的所有候选类型
    fn scan(&self, namespace: &str) -> Result<BTreeSet<ComponentType>, ComponentError>;

    /// 获取扫描器名称
    fn name(&self) -> &str;
}
