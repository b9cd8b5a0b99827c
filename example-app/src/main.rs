//! # 示例应用程序
//!
//! 演示如何使用容器扫描、实例化并装配一组分层组件

mod components;

use anyhow::Context;
use clap::{Parser, Subcommand};
use components::OrderController;
use infrastructure_common::ComponentMarker;
use infrastructure_composition::{ApplicationContext, ContainerBuilder, LoggingConfig};
use std::path::Path;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "example-app")]
#[command(about = "Lorn IoC 示例应用")]
struct Args {
    /// 配置文件路径
    #[arg(short, long, default_value = "config/app.toml")]
    config: String,

    /// 扫描的命名空间，覆盖配置文件
    #[arg(short, long)]
    namespace: Option<String>,

    /// 存在未解析的依赖时启动失败
    #[arg(long)]
    strict: bool,

    /// 使用生产环境日志格式（JSON）
    #[arg(long)]
    production: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 按标记列出已注册的组件
    Components,
    /// 查询订单
    Order {
        /// 订单编号，不指定时列出全部订单
        id: Option<u32>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let context = build_context(&args)?;
    info!("示例应用启动完成: {:?}", context);

    match args.command.unwrap_or(Command::Components) {
        Command::Components => list_components(&context),
        Command::Order { id } => show_orders(&context, id)?,
    }

    Ok(())
}

/// 构建应用上下文
fn build_context(args: &Args) -> anyhow::Result<ApplicationContext> {
    let logging = if args.production {
        LoggingConfig::production()
    } else {
        LoggingConfig::development()
    };
    let mut builder = ContainerBuilder::new().with_logging(logging);

    // 添加配置文件（如果存在）
    if Path::new(&args.config).exists() {
        builder = builder.with_config_file(&args.config)?;
    } else {
        info!("配置文件不存在，将使用默认配置和环境变量");
        builder = builder.scan_namespace(concat!(module_path!(), "::components"));
    }

    if let Some(namespace) = &args.namespace {
        builder = builder.scan_namespace(namespace.as_str());
    }
    if args.strict {
        builder = builder.fail_on_unresolved(true);
    }

    builder.build().context("容器启动失败")
}

/// 按标记列出组件
fn list_components(context: &ApplicationContext) {
    println!("已注册 {} 个组件", context.registry().size());
    for marker in ComponentMarker::ALL {
        for component_type in context.components_with(marker) {
            println!("  @{:<10} {}", marker, component_type.name());
        }
    }

    let report = context.wire_report();
    println!("注入点: 已绑定 {}，未绑定 {}", report.bound, report.unbound());
    for slot in report.unresolved_slots() {
        println!("  未绑定: {}", slot);
    }
}

/// 通过控制器查询订单
fn show_orders(context: &ApplicationContext, id: Option<u32>) -> anyhow::Result<()> {
    let controller = context
        .require::<OrderController>()
        .context("请检查扫描的命名空间")?;

    match id {
        Some(id) => println!("{}", controller.show(id)),
        None => {
            for line in controller.index() {
                println!("{}", line);
            }
        }
    }
    Ok(())
}
