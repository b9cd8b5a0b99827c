//! 组件派生宏实现

use crate::utils::{extract_generic_type, field_has_attribute, is_autowired_type, to_snake_case};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::{ParseStream, Parser};
use syn::punctuated::Punctuated;
use syn::{
    parenthesized, Data, DeriveInput, Error, Fields, Ident, Meta, Path, Result, Token, Type,
};

/// 组件配置参数
#[derive(Default)]
pub struct ComponentArgs {
    /// 标记，按声明顺序去重
    pub markers: Vec<Ident>,
    /// 满足的接口类型
    pub provides: Vec<Type>,
    /// 自定义构造函数
    pub constructor: Option<Path>,
}

impl ComponentArgs {
    const MARKERS: [(&'static str, &'static str); 4] = [
        ("component", "Component"),
        ("controller", "Controller"),
        ("service", "Service"),
        ("repository", "Repository"),
    ];

    /// 从结构体上的 `#[component(...)]` 属性解析参数
    pub fn from_attrs(input: &DeriveInput) -> Result<Self> {
        let mut args = Self::default();

        for attr in &input.attrs {
            if !attr.path().is_ident("component") {
                continue;
            }
            match &attr.meta {
                // 不带参数的 #[component] 等价于 #[component(component)]
                Meta::Path(_) => args.push_marker("Component"),
                Meta::List(list) => {
                    let parser = |stream: ParseStream<'_>| args.parse_list(stream);
                    parser.parse2(list.tokens.clone())?;
                }
                Meta::NameValue(nv) => {
                    return Err(Error::new_spanned(nv, "应写作 #[component(...)]"));
                }
            }
        }

        Ok(args)
    }

    fn parse_list(&mut self, input: ParseStream<'_>) -> Result<()> {
        while !input.is_empty() {
            let key: Ident = input.parse()?;

            if let Some((_, variant)) = Self::MARKERS.iter().find(|(keyword, _)| key == keyword) {
                self.push_marker(variant);
            } else if key == "provides" {
                let content;
                parenthesized!(content in input);
                self.provides
                    .extend(Punctuated::<Type, Token![,]>::parse_terminated(&content)?);
            } else if key == "constructor" {
                input.parse::<Token![=]>()?;
                self.constructor = Some(input.parse()?);
            } else {
                return Err(Error::new(
                    key.span(),
                    "不支持的组件参数，可用: component, controller, service, repository, provides(..), constructor = path",
                ));
            }

            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }
        Ok(())
    }

    fn push_marker(&mut self, variant: &str) {
        if !self.markers.iter().any(|marker| marker == variant) {
            self.markers.push(Ident::new(variant, Span::call_site()));
        }
    }
}

/// 标记为 `#[autowired]` 的字段
struct AutowiredField {
    ident: Ident,
    inner: Type,
}

fn autowired_fields(input: &DeriveInput) -> Result<Vec<AutowiredField>> {
    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(
            &input.ident,
            "#[derive(Component)] 只能用于结构体",
        ));
    };

    let mut fields = Vec::new();
    for field in &data.fields {
        if !field_has_attribute(field, "autowired") {
            continue;
        }

        let Some(ident) = field.ident.clone() else {
            return Err(Error::new_spanned(field, "#[autowired] 只能用于具名字段"));
        };
        let inner = is_autowired_type(&field.ty)
            .then(|| extract_generic_type(&field.ty))
            .flatten()
            .ok_or_else(|| {
                Error::new_spanned(&field.ty, "#[autowired] 字段的类型必须是 Autowired<T>")
            })?;

        fields.push(AutowiredField {
            ident,
            inner: inner.clone(),
        });
    }

    if matches!(data.fields, Fields::Unnamed(_)) && !fields.is_empty() {
        return Err(Error::new_spanned(&input.ident, "元组结构体不支持 #[autowired]"));
    }
    Ok(fields)
}

/// 实现 `#[derive(Component)]`
pub fn derive_component_impl(input: &DeriveInput) -> Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "#[derive(Component)] 不支持泛型结构体",
        ));
    }

    let args = ComponentArgs::from_attrs(input)?;
    let fields = autowired_fields(input)?;
    let struct_name = &input.ident;

    let markers = &args.markers;
    let provides = &args.provides;
    let provides_views = &args.provides;
    let slot_names = fields.iter().map(|f| f.ident.to_string());
    let slot_fields = fields.iter().map(|f| &f.ident);
    let slot_types = fields.iter().map(|f| &f.inner);
    let constructor = match &args.constructor {
        Some(path) => quote! { .constructor(#path) },
        None => quote! { .default_constructor() },
    };

    let describe_impl = quote! {
        impl ::infrastructure_common::ComponentDescribe for #struct_name {
            fn component_type() -> ::infrastructure_common::ComponentType {
                static COMPONENT_TYPE: ::infrastructure_common::once_cell::sync::OnceCell<
                    ::infrastructure_common::ComponentType,
                > = ::infrastructure_common::once_cell::sync::OnceCell::new();

                COMPONENT_TYPE
                    .get_or_init(|| {
                        ::infrastructure_common::ComponentType::builder::<Self>()
                            .module_path(::core::module_path!())
                            #(.marker(::infrastructure_common::ComponentMarker::#markers))*
                            #(.provides::<#provides>(|c| c as ::std::sync::Arc<#provides_views>))*
                            #(.autowired::<#slot_types>(#slot_names, |c| &c.#slot_fields))*
                            #constructor
                            .build()
                    })
                    .clone()
            }
        }
    };

    let registration_code = generate_registration_code(struct_name);

    Ok(quote! {
        #describe_impl

        #registration_code
    })
}

/// 生成启动时登记到全局类型目录的代码
fn generate_registration_code(struct_name: &Ident) -> TokenStream {
    let registration_fn_name = Ident::new(
        &format!(
            "__register_component_{}",
            to_snake_case(&struct_name.to_string())
        ),
        Span::call_site(),
    );

    quote! {
        #[ctor::ctor]
        fn #registration_fn_name() {
            ::infrastructure_common::register_component_type(
                <#struct_name as ::infrastructure_common::ComponentDescribe>::component_type(),
            );
        }
    }
}
