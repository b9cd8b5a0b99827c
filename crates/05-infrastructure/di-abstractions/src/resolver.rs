//! 依赖注入抽象接口
//!
//! 提供注入点发现与依赖装配的能力

use infrastructure_common::{Bean, ComponentType, DependencyError, SlotDescriptor, SlotSetterFn};
use std::fmt;

/// 依赖注入点
///
/// 只在一次装配过程中存在，每次装配重新计算。
#[derive(Clone)]
pub struct DependencySlot {
    owner_type: ComponentType,
    owner: Bean,
    name: &'static str,
    target: ComponentType,
    setter: SlotSetterFn,
}

impl DependencySlot {
    /// 根据注入点定义创建
    pub fn new(owner_type: ComponentType, owner: Bean, descriptor: &SlotDescriptor) -> Self {
        Self {
            owner_type,
            owner,
            name: descriptor.name(),
            target: descriptor.target().clone(),
            setter: descriptor.setter().clone(),
        }
    }

    /// 所属组件类型
    pub const fn owner_type(&self) -> &ComponentType {
        &self.owner_type
    }

    /// 所属实例
    pub const fn owner(&self) -> &Bean {
        &self.owner
    }

    /// 注入点名称
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// 声明的目标类型
    pub const fn declared_type(&self) -> &ComponentType {
        &self.target
    }

    /// 把依赖写入注入点
    pub fn assign(&self, dependency: &Bean) -> Result<(), DependencyError> {
        (self.setter)(&self.owner, dependency)
    }

    /// `Owner.slot` 形式的标识
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.owner_type.short_name(), self.name)
    }
}

impl fmt::Debug for DependencySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencySlot")
            .field("owner", &self.owner_type.name())
            .field("name", &self.name)
            .field("target", &self.target.name())
            .finish()
    }
}

/// 注入点发现 trait
pub trait SlotIntrospector: Send + Sync {
    /// 枚举实例上的所有可注入依赖点，顺序固定
    fn slots_of(&self, component_type: &ComponentType, instance: &Bean) -> Vec<DependencySlot>;
}

/// 注入点状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// 未绑定
    Unbound,
    /// 解析中
    Resolving,
    /// 已绑定
    Bound,
}

/// 一次装配的结果统计
///
/// 未解析的注入点不是错误，这里只用于日志和诊断。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireReport {
    /// 已绑定的注入点数量
    pub bound: usize,
    /// 没有候选实例的注入点
    pub missing: Vec<String>,
    /// 存在多个候选实例的注入点
    pub ambiguous: Vec<String>,
    /// 候选实例无法写入的注入点
    pub rejected: Vec<String>,
}

impl WireReport {
    /// 未绑定的注入点数量
    pub fn unbound(&self) -> usize {
        self.missing.len() + self.ambiguous.len() + self.rejected.len()
    }

    /// 是否所有注入点都已绑定
    pub fn is_complete(&self) -> bool {
        self.unbound() == 0
    }

    /// 所有未绑定的注入点
    pub fn unresolved_slots(&self) -> Vec<String> {
        self.missing
            .iter()
            .chain(&self.ambiguous)
            .chain(&self.rejected)
            .cloned()
            .collect()
    }
}

/// 依赖注入器 trait
pub trait DependencyInjector: Send + Sync {
    /// 为注册表中所有实例装配依赖
    ///
    /// 必须在注册表加载完成后调用，且不能与自身或加载并发执行。
    fn wire(&self) -> WireReport;
}
