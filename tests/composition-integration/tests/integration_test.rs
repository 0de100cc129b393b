//! Centralized integration tests for the autowire-composition crate
use autowire_common::{CapabilityValue, ContainerError, DiscoveryError, ResolutionError};
use autowire_composition::{Bootstrapper, ContainerBuilder, LoggingConfig};
use container_abstractions::{DeclarationCatalog, ServiceContainer, ServiceDeclaration};
use std::path::Path;

/// 请求处理能力
trait Handler {
    fn route(&self) -> &'static str;
}

/// 静态文件处理器
struct StaticHandler;

impl Handler for StaticHandler {
    fn route(&self) -> &'static str {
        "/static"
    }
}

/// 健康检查处理器
struct HealthHandler;

impl Handler for HealthHandler {
    fn route(&self) -> &'static str {
        "/health"
    }
}

/// 顶层服务器对象, 启动时唯一被请求的入口
struct Server {
    port: u16,
    handlers: CapabilityValue<dyn Handler>,
}

impl Server {
    fn routes(&self) -> Vec<&'static str> {
        match &self.handlers {
            CapabilityValue::Single(handler) => vec![handler.route()],
            CapabilityValue::Keyed(members) => {
                members.iter().map(|(_, handler)| handler.route()).collect()
            }
        }
    }
}

/// 组装一份完整的服务器声明目录
fn server_catalog() -> DeclarationCatalog {
    DeclarationCatalog::new()
        .declare(
            ServiceDeclaration::<StaticHandler>::of("http.handler.static")
                .with_capability("http.handler", |h: StaticHandler| {
                    Box::new(h) as Box<dyn Handler>
                })
                .constructed_by(|_| Ok(StaticHandler)),
        )
        .declare(
            ServiceDeclaration::<HealthHandler>::of("http.handler.health")
                .with_capability("http.handler", |h: HealthHandler| {
                    Box::new(h) as Box<dyn Handler>
                })
                .constructed_by(|_| Ok(HealthHandler)),
        )
        .declare(
            ServiceDeclaration::<Server>::of("http.server")
                .param_builtin("port", Some(serde_json::json!(8080)))
                .param_builtin("handlers", None)
                .collect_implementors("handlers", "http.handler")
                .constructed_by(|mut args| {
                    let port: u16 = args.take_builtin("port")?;
                    let handlers = args.take_capability::<dyn Handler>("handlers")?;
                    Ok(Server { port, handlers })
                }),
        )
}

fn write_manifest(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_bootstrap_resolves_the_entry_service() {
    let builder = ContainerBuilder::new().with_catalog(server_catalog());
    let outcome = Bootstrapper::new(builder, "http.server").bootstrap().unwrap();

    let (server, runtime) = outcome.entry_as::<Server>().unwrap();
    assert_eq!(server.port, 8080);
    assert_eq!(server.routes(), vec!["/static", "/health"]);

    let summary = runtime.summary();
    assert_eq!(summary.registered_services, 3);
    assert_eq!(summary.resolutions_succeeded, 1);
}

#[test]
fn test_manifest_tree_selects_enabled_services() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("handlers")).unwrap();
    write_manifest(
        dir.path(),
        "core.toml",
        "description = \"核心服务\"\nservices = [\"http.server\"]\n",
    );
    write_manifest(
        &dir.path().join("handlers"),
        "static.toml",
        "services = [\"http.handler.static\"]\n",
    );

    let runtime = ContainerBuilder::new()
        .with_catalog(server_catalog())
        .add_manifest_root(dir.path())
        .unwrap()
        .build()
        .unwrap();

    // 清单没有启用健康检查处理器
    assert!(runtime.container().contains(&"http.server".into()));
    assert!(runtime.container().contains(&"http.handler.static".into()));
    assert!(!runtime.container().contains(&"http.handler.health".into()));

    // 唯一启用的处理器坍缩为单个实例
    let server = runtime.get_as::<Server>(&"http.server".into()).unwrap();
    assert_eq!(server.routes(), vec!["/static"]);

    let report = &runtime.scan_reports()[0];
    assert_eq!(report.manifests_read, 2);
    assert_eq!(report.services_enabled.len(), 2);
}

#[test]
fn test_scan_order_is_deterministic_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "b.toml", "services = [\"http.handler.health\"]\n");
    write_manifest(dir.path(), "a.toml", "services = [\"http.handler.static\"]\n");

    let scan = || {
        ContainerBuilder::new()
            .with_catalog(server_catalog())
            .add_manifest_root(dir.path())
            .unwrap()
            .build()
            .unwrap()
            .scan_reports()[0]
            .services_enabled
            .clone()
    };

    let first = scan();
    let second = scan();
    assert_eq!(first, second);
    // 同一目录内按路径排序: a.toml 先于 b.toml
    assert_eq!(first[0].as_str(), "http.handler.static");
    assert_eq!(first[1].as_str(), "http.handler.health");
}

#[test]
fn test_manifest_referencing_unknown_service_aborts_build() {
    let dir = tempfile::tempdir().unwrap();
    write_manifest(dir.path(), "bad.toml", "services = [\"http.ghost\"]\n");

    let err = ContainerBuilder::new()
        .with_catalog(server_catalog())
        .add_manifest_root(dir.path())
        .unwrap()
        .build()
        .unwrap_err();
    match err {
        ContainerError::Discovery {
            source: DiscoveryError::UnknownService { service, .. },
        } => assert_eq!(service.as_str(), "http.ghost"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_validation_failure_lists_problem_count() {
    struct Orphan;
    let catalog = DeclarationCatalog::new()
        .declare(
            ServiceDeclaration::<Orphan>::of("app.orphan.one")
                .param_builtin("secret", None)
                .constructed_by(|_| Ok(Orphan)),
        )
        .declare(
            ServiceDeclaration::<Orphan>::of("app.orphan.two")
                .param_service("dep", "app.nowhere")
                .constructed_by(|_| Ok(Orphan)),
        );

    let err = ContainerBuilder::new().with_catalog(catalog).build().unwrap_err();
    match err {
        ContainerError::ValidationFailed { count } => assert_eq!(count, 2),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_bootstrap_of_missing_entry_constructs_nothing() {
    let builder = ContainerBuilder::new().with_catalog(server_catalog());
    let err = Bootstrapper::new(builder, "http.ghost").bootstrap().unwrap_err();
    assert!(matches!(
        err,
        ContainerError::Resolution {
            source: ResolutionError::ServiceNotFound { .. }
        }
    ));
}

#[test]
fn test_logging_presets_differ_by_environment() {
    let development = LoggingConfig::development();
    assert_eq!(development.level, tracing::Level::DEBUG);
    assert!(!development.json_format);
    assert!(development.show_line_number);

    let production = LoggingConfig::production();
    assert_eq!(production.level, tracing::Level::INFO);
    assert!(production.json_format);
    assert!(!production.show_target);
}
