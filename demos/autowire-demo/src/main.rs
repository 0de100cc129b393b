//! # 示例应用程序
//!
//! 演示如何使用 Autowire 自动装配依赖注入容器

use autowire_common::CapabilityValue;
use autowire_composition::{AutowireRuntime, ContainerBuilder, LoggingConfig};
use clap::Parser;
use container_abstractions::{DeclarationCatalog, ServiceDeclaration};
use tracing::{error, info};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "autowire-demo")]
#[command(about = "Autowire 示例应用")]
struct Args {
    /// 清单根目录, 不指定时启用目录中全部声明
    #[arg(short, long)]
    manifests: Option<String>,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let runtime = build_runtime(&args)?;

    info!("启动 Autowire 示例应用");

    demonstrate_registry(&runtime);
    demonstrate_collection_dispatch(&runtime)?;
    demonstrate_single_collapse(&runtime)?;
    demonstrate_resolution_failures(&runtime);
    print_summary(&runtime)?;

    info!("示例应用结束");
    Ok(())
}

/// 构建容器运行时
fn build_runtime(args: &Args) -> anyhow::Result<AutowireRuntime> {
    let logging = LoggingConfig {
        level: parse_log_level(&args.log_level),
        ..LoggingConfig::default()
    };

    let mut builder = ContainerBuilder::new()
        .with_logging(logging)
        .with_catalog(demo_catalog());

    if let Some(root) = &args.manifests {
        builder = builder.add_manifest_root(root)?;
    }

    Ok(builder.build()?)
}

/// 演示注册表元数据
fn demonstrate_registry(runtime: &AutowireRuntime) {
    info!("已注册的服务:");
    for service in runtime.registered_services() {
        info!(
            "  - {} ({}, {} 个构造参数)",
            service.id, service.type_name, service.parameter_count
        );
    }
}

/// 演示能力集合注入: 两个通知渠道都被注入调度器
fn demonstrate_collection_dispatch(runtime: &AutowireRuntime) -> anyhow::Result<()> {
    info!("演示能力集合注入");

    let dispatcher = runtime.get_as::<Dispatcher>(&"app.dispatcher".into())?;
    for line in dispatcher.dispatch("容器已上线") {
        info!("{}", line);
    }
    Ok(())
}

/// 演示唯一实现者坍缩: 单个审计接收者不经集合包装直接注入
fn demonstrate_single_collapse(runtime: &AutowireRuntime) -> anyhow::Result<()> {
    info!("演示唯一实现者坍缩");

    let audit = runtime.get_as::<AuditLog>(&"app.audit_log".into())?;
    match &audit.sink {
        CapabilityValue::Single(_) => info!("审计能力坍缩为单个实例"),
        CapabilityValue::Keyed(members) => info!("审计能力保持集合, {} 个成员", members.len()),
    }
    for line in audit.record("示例审计记录") {
        info!("{}", line);
    }
    Ok(())
}

/// 演示解析失败场景
fn demonstrate_resolution_failures(runtime: &AutowireRuntime) {
    info!("演示解析失败场景");

    if let Err(e) = runtime.get(&"app.ghost".into()) {
        info!("未注册服务按预期失败: {}", e);
    }

    let broken = ContainerBuilder::new()
        .declare(
            ServiceDeclaration::<Threshold>::of("app.threshold")
                .param_builtin("value", None)
                .constructed_by(|_| Ok(Threshold)),
        )
        .build();
    match broken {
        Err(e) => info!("构建期校验按预期失败: {}", e),
        Ok(_) => error!("校验未发现缺少解析策略的参数"),
    }
}

/// 打印运行状况摘要
fn print_summary(runtime: &AutowireRuntime) -> anyhow::Result<()> {
    let summary = serde_json::to_string_pretty(&runtime.summary())?;
    info!("运行状况摘要:\n{}", summary);
    Ok(())
}

/// 解析日志级别
fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}

/// 组装示例服务声明
fn demo_catalog() -> DeclarationCatalog {
    DeclarationCatalog::new()
        .declare(
            ServiceDeclaration::<EmailNotifier>::of("app.notifier.email")
                .param_builtin("sender", Some(serde_json::json!("noreply@autowire-rs.dev")))
                .with_capability("app.notifier", |n: EmailNotifier| {
                    Box::new(n) as Box<dyn Notifier>
                })
                .constructed_by(|mut args| {
                    let sender: String = args.take_builtin("sender")?;
                    Ok(EmailNotifier { sender })
                }),
        )
        .declare(
            ServiceDeclaration::<SmsNotifier>::of("app.notifier.sms")
                .with_capability("app.notifier", |n: SmsNotifier| {
                    Box::new(n) as Box<dyn Notifier>
                })
                .constructed_by(|_| Ok(SmsNotifier)),
        )
        .declare(
            ServiceDeclaration::<Dispatcher>::of("app.dispatcher")
                .param_builtin("channels", None)
                .collect_implementors("channels", "app.notifier")
                .constructed_by(|mut args| {
                    let channels = args.take_capability::<dyn Notifier>("channels")?;
                    Ok(Dispatcher { channels })
                }),
        )
        .declare(
            ServiceDeclaration::<FileAuditSink>::of("app.audit.file")
                .param_builtin("path", Some(serde_json::json!("/var/log/autowire-demo.log")))
                .with_capability("app.audit", |s: FileAuditSink| {
                    Box::new(s) as Box<dyn AuditSink>
                })
                .constructed_by(|mut args| {
                    let path: String = args.take_builtin("path")?;
                    Ok(FileAuditSink { path })
                }),
        )
        .declare(
            ServiceDeclaration::<AuditLog>::of("app.audit_log")
                .param_builtin("sink", None)
                .collect_implementors("sink", "app.audit")
                .constructed_by(|mut args| {
                    let sink = args.take_capability::<dyn AuditSink>("sink")?;
                    Ok(AuditLog { sink })
                }),
        )
}

// 示例领域类型

/// 通知渠道能力
trait Notifier {
    /// 生成一条发送记录
    fn notify(&self, message: &str) -> String;
}

/// 邮件通知渠道
struct EmailNotifier {
    sender: String,
}

impl Notifier for EmailNotifier {
    fn notify(&self, message: &str) -> String {
        format!("邮件[{}]: {}", self.sender, message)
    }
}

/// 短信通知渠道
struct SmsNotifier;

impl Notifier for SmsNotifier {
    fn notify(&self, message: &str) -> String {
        format!("短信: {}", message)
    }
}

/// 通知调度器, 向全部渠道广播
struct Dispatcher {
    channels: CapabilityValue<dyn Notifier>,
}

impl Dispatcher {
    fn dispatch(&self, message: &str) -> Vec<String> {
        match &self.channels {
            CapabilityValue::Single(channel) => vec![channel.notify(message)],
            CapabilityValue::Keyed(members) => members
                .iter()
                .map(|(id, channel)| format!("[{}] {}", id, channel.notify(message)))
                .collect(),
        }
    }
}

/// 审计接收者能力
trait AuditSink {
    /// 生成一条落盘记录
    fn record(&self, line: &str) -> String;
}

/// 文件审计接收者
struct FileAuditSink {
    path: String,
}

impl AuditSink for FileAuditSink {
    fn record(&self, line: &str) -> String {
        format!("{} <- {}", self.path, line)
    }
}

/// 审计日志, 持有唯一的审计接收者
struct AuditLog {
    sink: CapabilityValue<dyn AuditSink>,
}

impl AuditLog {
    fn record(&self, line: &str) -> Vec<String> {
        match &self.sink {
            CapabilityValue::Single(sink) => vec![sink.record(line)],
            CapabilityValue::Keyed(members) => {
                members.iter().map(|(_, sink)| sink.record(line)).collect()
            }
        }
    }
}

/// 用于演示校验失败的声明
struct Threshold;
