//! 组件类型元数据
//!
//! 每个可注册类型在启动时声明自己的能力表：携带的标记、满足的接口、
//! 构造函数以及可注入的依赖点。容器只查询这张表，不依赖运行时反射。

use crate::component::{Autowired, Bean, ComponentMarker};
use crate::errors::DependencyError;
use std::any::{Any, TypeId};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

/// 构造函数
pub type ConstructorFn = Arc<dyn Fn() -> Result<Bean, DependencyError> + Send + Sync>;

/// 向上转型函数：把具体类型的实例转换为接口视图
pub type UpcastFn = Arc<dyn Fn(&Bean) -> Option<Bean> + Send + Sync>;

/// 注入点设置函数：`(owner, dependency)`
pub type SlotSetterFn = Arc<dyn Fn(&Bean, &Bean) -> Result<(), DependencyError> + Send + Sync>;

/// 组件类型
///
/// 不透明的类型标识，指向一份不可变的类型描述。相等、哈希基于 `TypeId`，
/// 因此 `ComponentType::of::<T>()` 得到的裸句柄与完整描述的句柄是同一个键。
#[derive(Clone)]
pub struct ComponentType(Arc<TypeDescriptor>);

struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
    module_path: &'static str,
    markers: Vec<ComponentMarker>,
    supertypes: Vec<SupertypeDescriptor>,
    constructor: Option<ConstructorFn>,
    slots: Vec<SlotDescriptor>,
}

/// 类型满足的父类型/接口
#[derive(Clone)]
pub struct SupertypeDescriptor {
    target: ComponentType,
    upcast: UpcastFn,
}

impl SupertypeDescriptor {
    /// 父类型
    pub const fn target(&self) -> &ComponentType {
        &self.target
    }
}

/// 可注入依赖点的定义
#[derive(Clone)]
pub struct SlotDescriptor {
    name: &'static str,
    target: ComponentType,
    setter: SlotSetterFn,
}

impl SlotDescriptor {
    /// 注入点名称
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// 声明的目标类型
    pub const fn target(&self) -> &ComponentType {
        &self.target
    }

    /// 设置函数
    pub const fn setter(&self) -> &SlotSetterFn {
        &self.setter
    }
}

impl fmt::Debug for SlotDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotDescriptor")
            .field("name", &self.name)
            .field("target", &self.target.name())
            .finish()
    }
}

impl ComponentType {
    /// 指定类型的裸句柄（没有标记、接口和构造函数）
    pub fn of<T: ?Sized + 'static>() -> Self {
        let name = std::any::type_name::<T>();
        Self(Arc::new(TypeDescriptor {
            id: TypeId::of::<T>(),
            name,
            module_path: module_path_of(name),
            markers: Vec::new(),
            supertypes: Vec::new(),
            constructor: None,
            slots: Vec::new(),
        }))
    }

    /// 创建类型描述构建器
    pub fn builder<T: Any + Send + Sync>() -> ComponentTypeBuilder<T> {
        ComponentTypeBuilder::new()
    }

    /// 类型ID
    pub fn id(&self) -> TypeId {
        self.0.id
    }

    /// 完整类型名称
    pub fn name(&self) -> &'static str {
        self.0.name
    }

    /// 简短类型名称（不含模块路径）
    pub fn short_name(&self) -> &'static str {
        short_name_of(self.0.name)
    }

    /// 所在模块路径，即类型所属的命名空间
    pub fn module_path(&self) -> &'static str {
        self.0.module_path
    }

    /// 是否位于指定命名空间（含子命名空间）之下
    pub fn in_namespace(&self, namespace: &str) -> bool {
        let path = self.0.module_path;
        !namespace.is_empty()
            && path.starts_with(namespace)
            && (path.len() == namespace.len() || path[namespace.len()..].starts_with("::"))
    }

    /// 携带的标记
    pub fn markers(&self) -> &[ComponentMarker] {
        &self.0.markers
    }

    /// 是否携带指定标记
    pub fn has_marker(&self, marker: ComponentMarker) -> bool {
        self.0.markers.contains(&marker)
    }

    /// 满足的父类型/接口
    pub fn supertypes(&self) -> impl Iterator<Item = &ComponentType> + '_ {
        self.0.supertypes.iter().map(SupertypeDescriptor::target)
    }

    /// 是否可以赋值给 `other`（相同类型或声明为其子类型）
    pub fn is_assignable_to(&self, other: &Self) -> bool {
        self == other || self.supertypes().any(|s| s == other)
    }

    /// 是否为 `other` 的真子类型（可赋值且不是其本身）
    pub fn is_proper_subtype_of(&self, other: &Self) -> bool {
        self != other && self.is_assignable_to(other)
    }

    /// 把本类型的实例转换为 `target` 视图
    pub fn upcast(&self, target: &Self, bean: &Bean) -> Option<Bean> {
        if self == target {
            return Some(bean.clone());
        }
        self.0
            .supertypes
            .iter()
            .find(|s| &s.target == target)
            .and_then(|s| (s.upcast)(bean))
    }

    /// 是否注册了构造函数
    pub fn is_constructible(&self) -> bool {
        self.0.constructor.is_some()
    }

    /// 构造一个新实例
    pub fn construct(&self) -> Result<Bean, DependencyError> {
        match &self.0.constructor {
            Some(constructor) => constructor(),
            None => Err(DependencyError::ConstructorMissing {
                type_name: self.0.name.to_string(),
            }),
        }
    }

    /// 可注入依赖点
    pub fn slots(&self) -> &[SlotDescriptor] {
        &self.0.slots
    }

    /// 是否为裸句柄（没有标记、接口、构造函数和注入点）
    pub fn is_bare(&self) -> bool {
        self.0.markers.is_empty()
            && self.0.supertypes.is_empty()
            && self.0.constructor.is_none()
            && self.0.slots.is_empty()
    }
}

impl PartialEq for ComponentType {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for ComponentType {}

impl Hash for ComponentType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl PartialOrd for ComponentType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ComponentType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .name
            .cmp(other.0.name)
            .then_with(|| self.0.id.cmp(&other.0.id))
    }
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentType")
            .field("name", &self.0.name)
            .field("markers", &self.0.markers)
            .field(
                "supertypes",
                &self.supertypes().map(Self::name).collect::<Vec<_>>(),
            )
            .field("slots", &self.0.slots)
            .finish()
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name)
    }
}

/// 类型描述构建器
pub struct ComponentTypeBuilder<T> {
    descriptor: TypeDescriptor,
    _component: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> ComponentTypeBuilder<T> {
    /// 创建新的构建器
    pub fn new() -> Self {
        let name = std::any::type_name::<T>();
        Self {
            descriptor: TypeDescriptor {
                id: TypeId::of::<T>(),
                name,
                module_path: module_path_of(name),
                markers: Vec::new(),
                supertypes: Vec::new(),
                constructor: None,
                slots: Vec::new(),
            },
            _component: PhantomData,
        }
    }

    /// 覆盖模块路径
    pub fn module_path(mut self, module_path: &'static str) -> Self {
        self.descriptor.module_path = module_path;
        self
    }

    /// 添加标记
    pub fn marker(mut self, marker: ComponentMarker) -> Self {
        if !self.descriptor.markers.contains(&marker) {
            self.descriptor.markers.push(marker);
        }
        self
    }

    /// 声明满足的接口
    ///
    /// `upcast` 一般写作 `|c| c as Arc<dyn Trait>`。
    pub fn provides<I>(mut self, upcast: fn(Arc<T>) -> Arc<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let target = ComponentType::of::<I>();
        if self.descriptor.supertypes.iter().any(|s| s.target == target) {
            return self;
        }
        let upcast: UpcastFn =
            Arc::new(move |bean: &Bean| bean.get::<T>().map(|c| Bean::from_arc(upcast(c))));
        self.descriptor
            .supertypes
            .push(SupertypeDescriptor { target, upcast });
        self
    }

    /// 设置构造函数
    pub fn constructor<F>(mut self, constructor: F) -> Self
    where
        F: Fn() -> Result<T, DependencyError> + Send + Sync + 'static,
    {
        self.descriptor.constructor = Some(Arc::new(move || constructor().map(Bean::new)));
        self
    }

    /// 使用 `Default` 作为构造函数
    pub fn default_constructor(self) -> Self
    where
        T: Default,
    {
        self.constructor(|| Ok(T::default()))
    }

    /// 声明一个可注入的依赖点
    pub fn autowired<I>(mut self, name: &'static str, accessor: fn(&T) -> &Autowired<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let setter: SlotSetterFn = Arc::new(move |owner: &Bean, dependency: &Bean| {
            let owner = owner
                .get::<T>()
                .ok_or_else(|| DependencyError::SlotTypeMismatch {
                    slot: name.to_string(),
                    expected: std::any::type_name::<T>().to_string(),
                    actual: owner.type_name().to_string(),
                })?;
            let dependency =
                dependency
                    .get::<I>()
                    .ok_or_else(|| DependencyError::SlotTypeMismatch {
                        slot: name.to_string(),
                        expected: std::any::type_name::<I>().to_string(),
                        actual: dependency.type_name().to_string(),
                    })?;
            accessor(owner.as_ref()).set(dependency);
            Ok(())
        });
        self.descriptor.slots.push(SlotDescriptor {
            name,
            target: ComponentType::of::<I>(),
            setter,
        });
        self
    }

    /// 构建类型描述
    pub fn build(self) -> ComponentType {
        ComponentType(Arc::new(self.descriptor))
    }
}

impl<T: Any + Send + Sync> Default for ComponentTypeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// 检查命名空间是否为合法的 `::` 分隔路径
pub fn is_valid_namespace(namespace: &str) -> bool {
    !namespace.is_empty() && namespace.split("::").all(is_valid_identifier)
}

fn is_valid_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|ch| ch.is_alphanumeric() || ch == '_')
        }
        _ => false,
    }
}

fn module_path_of(type_name: &'static str) -> &'static str {
    let path = type_name.strip_prefix("dyn ").unwrap_or(type_name);
    // 泛型参数里的路径不属于模块路径
    let path = path.split('<').next().unwrap_or(path);
    path.rsplit_once("::").map_or("", |(module, _)| module)
}

fn short_name_of(type_name: &'static str) -> &'static str {
    let name = type_name.strip_prefix("dyn ").unwrap_or(type_name);
    let name = name.split('<').next().unwrap_or(name);
    name.rsplit("::").next().unwrap_or(name)
}
