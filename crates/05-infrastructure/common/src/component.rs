//! 组件基础类型定义
//!
//! 提供组件标记、组件实例句柄以及注入点单元

use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// 组件标记
///
/// 被标记的类型会在加载时由注册表自动实例化。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentMarker {
    /// 通用组件
    Component,
    /// 控制器
    Controller,
    /// 服务
    Service,
    /// 仓储
    Repository,
}

impl ComponentMarker {
    /// 按固定顺序排列的全部标记
    pub const ALL: [Self; 4] = [
        Self::Component,
        Self::Controller,
        Self::Service,
        Self::Repository,
    ];

    /// 标记名称
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Controller => "controller",
            Self::Service => "service",
            Self::Repository => "repository",
        }
    }
}

impl fmt::Display for ComponentMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// 组件实例句柄
///
/// 对一个已构造实例的共享、类型擦除的引用。内部总是保存一个 `Arc<T>`，
/// 因此具体类型与 trait object（`dyn Trait`）都可以统一地存取。
/// 相等性与哈希基于实例地址：同一个对象的不同视图被视为同一个实例。
#[derive(Clone)]
pub struct Bean {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
    address: usize,
}

impl Bean {
    /// 包装一个新值
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// 包装一个已共享的值（可以是 trait object）
    pub fn from_arc<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Self {
        let address = Arc::as_ptr(&value).cast::<()>() as usize;
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
            address,
        }
    }

    /// 以指定类型取出实例
    pub fn get<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.inner.downcast_ref::<Arc<T>>().cloned()
    }

    /// 检查实例是否以指定类型保存
    pub fn is<T: ?Sized + Send + Sync + 'static>(&self) -> bool {
        self.inner.is::<Arc<T>>()
    }

    /// 保存时的类型名称
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// 是否指向同一个对象
    pub const fn same_instance(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl PartialEq for Bean {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other)
    }
}

impl Eq for Bean {}

impl Hash for Bean {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
    }
}

impl fmt::Debug for Bean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bean")
            .field("type_name", &self.type_name)
            .field("address", &format_args!("{:#x}", self.address))
            .finish()
    }
}

/// 注入点单元
///
/// 组件用它声明一个可由容器注入的依赖。构造时为空，
/// 由注入器通过 [`Autowired::set`] 赋值。
pub struct Autowired<T: ?Sized> {
    slot: RwLock<Option<Arc<T>>>,
}

impl<T: ?Sized> Autowired<T> {
    /// 创建未绑定的注入点
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// 获取已注入的依赖
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.read().clone()
    }

    /// 设置依赖，返回之前的值
    pub fn set(&self, value: Arc<T>) -> Option<Arc<T>> {
        self.slot.write().replace(value)
    }

    /// 是否已绑定
    pub fn is_bound(&self) -> bool {
        self.slot.read().is_some()
    }
}

impl<T: ?Sized> Default for Autowired<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Autowired<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autowired")
            .field("target", &std::any::type_name::<T>())
            .field("bound", &self.is_bound())
            .finish()
    }
}
