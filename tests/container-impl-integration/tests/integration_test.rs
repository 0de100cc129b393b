//! Centralized integration tests for the container-impl crate
use autowire_common::{
    BoxedInstance, CapabilityValue, ConstructorBlueprint, ResolutionError, ResolvedValue,
    ServiceId, TypeInfo,
};
use container_abstractions::{
    ContainerExt, ServiceContainer, ServiceDeclaration, ServiceRegistration,
};
use container_impl::ServiceContainerImpl;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 日志接收能力
trait LogSink {
    fn kind(&self) -> &'static str;
}

/// 文件日志
struct FileLogger;

impl LogSink for FileLogger {
    fn kind(&self) -> &'static str {
        "file"
    }
}

/// 控制台日志
struct ConsoleLogger;

impl LogSink for ConsoleLogger {
    fn kind(&self) -> &'static str {
        "console"
    }
}

/// 顶层应用, 收集全部日志实现
struct App {
    loggers: CapabilityValue<dyn LogSink>,
}

fn file_logger_declaration() -> ServiceRegistration {
    ServiceDeclaration::<FileLogger>::of("log.file")
        .with_capability("log.sink", |l: FileLogger| Box::new(l) as Box<dyn LogSink>)
        .constructed_by(|_| Ok(FileLogger))
}

fn console_logger_declaration() -> ServiceRegistration {
    ServiceDeclaration::<ConsoleLogger>::of("log.console")
        .with_capability("log.sink", |l: ConsoleLogger| Box::new(l) as Box<dyn LogSink>)
        .constructed_by(|_| Ok(ConsoleLogger))
}

fn app_declaration() -> ServiceRegistration {
    ServiceDeclaration::<App>::of("app.main")
        .param_builtin("loggers", None)
        .collect_implementors("loggers", "log.sink")
        .constructed_by(|mut args| {
            let loggers = args.take_capability::<dyn LogSink>("loggers")?;
            Ok(App { loggers })
        })
}

#[test]
fn test_trivial_constructor_resolves() {
    let container = ServiceContainerImpl::from_declarations(vec![file_logger_declaration()]);
    let logger = container.get_as::<FileLogger>(&"log.file".into()).unwrap();
    assert_eq!(logger.kind(), "file");
}

#[test]
fn test_implementors_follow_registration_order() {
    let container = ServiceContainerImpl::from_declarations(vec![
        file_logger_declaration(),
        console_logger_declaration(),
        app_declaration(),
    ]);

    let implementors: Vec<String> = container
        .implementors_of(&"log.sink".into())
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(implementors, vec!["log.file", "log.console"]);
    assert!(container.implementors_of(&"log.unknown".into()).is_empty());
}

#[test]
fn test_collection_with_two_implementors_is_keyed() {
    let container = ServiceContainerImpl::from_declarations(vec![
        file_logger_declaration(),
        console_logger_declaration(),
        app_declaration(),
    ]);

    let app = container.get_as::<App>(&"app.main".into()).unwrap();
    match app.loggers {
        CapabilityValue::Keyed(members) => {
            assert_eq!(members.len(), 2);
            assert_eq!(members[0].0.as_str(), "log.file");
            assert_eq!(members[0].1.kind(), "file");
            assert_eq!(members[1].0.as_str(), "log.console");
            assert_eq!(members[1].1.kind(), "console");
        }
        CapabilityValue::Single(_) => panic!("两个实现者不应坍缩"),
    }
}

#[test]
fn test_sole_implementor_collapses_to_single() {
    let container = ServiceContainerImpl::from_declarations(vec![
        file_logger_declaration(),
        app_declaration(),
    ]);

    let app = container.get_as::<App>(&"app.main".into()).unwrap();
    match app.loggers {
        CapabilityValue::Single(logger) => assert_eq!(logger.kind(), "file"),
        CapabilityValue::Keyed(_) => panic!("唯一实现者应坍缩为单个实例"),
    }
}

#[test]
fn test_capability_without_implementors_yields_empty_collection() {
    let container = ServiceContainerImpl::from_declarations(vec![app_declaration()]);

    let app = container.get_as::<App>(&"app.main".into()).unwrap();
    match app.loggers {
        CapabilityValue::Keyed(members) => assert!(members.is_empty()),
        CapabilityValue::Single(_) => panic!("没有实现者时应得到空集合"),
    }
}

/// 探针服务, 中继服务收集的能力实现者
struct Probe;

trait Probing {
    fn ping(&self) -> &'static str;
}

impl Probing for Probe {
    fn ping(&self) -> &'static str {
        "pong"
    }
}

/// 中继服务: 既收集探针能力, 自身又是枢纽能力的实现者
struct Relay {
    upstream_count: usize,
}

trait HubMember {
    fn upstreams(&self) -> usize;
}

impl HubMember for Relay {
    fn upstreams(&self) -> usize {
        self.upstream_count
    }
}

/// 枢纽服务, 收集全部中继
struct Hub {
    members: CapabilityValue<dyn HubMember>,
}

fn relay_registry() -> ServiceContainerImpl {
    ServiceContainerImpl::from_declarations(vec![
        ServiceDeclaration::<Probe>::of("net.probe")
            .with_capability("net.probing", |p: Probe| Box::new(p) as Box<dyn Probing>)
            .constructed_by(|_| Ok(Probe)),
        ServiceDeclaration::<Relay>::of("net.relay")
            .param_builtin("upstream", Some(serde_json::json!(null)))
            .collect_implementors("upstream", "net.probing")
            .with_capability("net.hub_member", |r: Relay| Box::new(r) as Box<dyn HubMember>)
            .constructed_by(|mut args| match args.take("upstream")? {
                ResolvedValue::Builtin(_) => Ok(Relay { upstream_count: 0 }),
                ResolvedValue::Instance(_) => Ok(Relay { upstream_count: 1 }),
                ResolvedValue::Collection(c) => Ok(Relay {
                    upstream_count: c.len(),
                }),
            }),
        ServiceDeclaration::<Hub>::of("net.hub")
            .param_builtin("members", None)
            .collect_implementors("members", "net.hub_member")
            .constructed_by(|mut args| {
                let members = args.take_capability::<dyn HubMember>("members")?;
                Ok(Hub { members })
            }),
    ])
}

#[test]
fn test_markers_do_not_cascade_past_one_level() {
    let container = relay_registry();

    // 直接解析中继: 自身的收集标记生效, 收到唯一的探针实现
    let relay = container.get_as::<Relay>(&"net.relay".into()).unwrap();
    assert_eq!(relay.upstream_count, 1);

    // 经由枢纽的集合解析中继: 标记被抑制, 退回默认值
    let hub = container.get_as::<Hub>(&"net.hub".into()).unwrap();
    match hub.members {
        CapabilityValue::Single(member) => assert_eq!(member.upstreams(), 0),
        CapabilityValue::Keyed(_) => panic!("唯一的中继应坍缩为单个实例"),
    }
}

#[test]
fn test_unregistered_service_fails_and_constructs_nothing() {
    let constructions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&constructions);
    let container = ServiceContainerImpl::from_declarations(vec![ServiceDeclaration::<
        FileLogger,
    >::of("log.file")
    .constructed_by(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(FileLogger)
    })]);

    let err = container.get(&"app.ghost".into()).unwrap_err();
    match err {
        ResolutionError::ServiceNotFound { service } => {
            assert_eq!(service.as_str(), "app.ghost");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(constructions.load(Ordering::SeqCst), 0);
}

#[test]
fn test_builtin_without_default_is_unresolvable() {
    struct Mailer;
    let container = ServiceContainerImpl::from_declarations(vec![ServiceDeclaration::<Mailer>::of(
        "app.mailer",
    )
    .param_builtin("smtp_host", None)
    .constructed_by(|_| Ok(Mailer))]);

    let err = container.get(&"app.mailer".into()).unwrap_err();
    match err {
        ResolutionError::UnresolvableParameter { service, parameter } => {
            assert_eq!(service.as_str(), "app.mailer");
            assert_eq!(parameter, "smtp_host");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_dependency_cycle_fails_fast() {
    struct Ping;
    struct Pong;
    let constructions = Arc::new(AtomicUsize::new(0));
    let ping_counter = Arc::clone(&constructions);
    let pong_counter = Arc::clone(&constructions);

    let container = ServiceContainerImpl::from_declarations(vec![
        ServiceDeclaration::<Ping>::of("game.ping")
            .param_service("other", "game.pong")
            .constructed_by(move |_| {
                ping_counter.fetch_add(1, Ordering::SeqCst);
                Ok(Ping)
            }),
        ServiceDeclaration::<Pong>::of("game.pong")
            .param_service("other", "game.ping")
            .constructed_by(move |_| {
                pong_counter.fetch_add(1, Ordering::SeqCst);
                Ok(Pong)
            }),
    ]);

    let err = container.get(&"game.ping".into()).unwrap_err();
    match err {
        ResolutionError::CycleDetected { chain } => {
            assert_eq!(chain, "game.ping -> game.pong -> game.ping");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(constructions.load(Ordering::SeqCst), 0);
}

#[test]
fn test_no_caching_across_and_within_resolutions() {
    struct Leaf;
    struct Twice;
    let leaf_constructions = Arc::new(AtomicUsize::new(0));
    let leaf_counter = Arc::clone(&leaf_constructions);

    let container = ServiceContainerImpl::from_declarations(vec![
        ServiceDeclaration::<Leaf>::of("tree.leaf").constructed_by(move |_| {
            leaf_counter.fetch_add(1, Ordering::SeqCst);
            Ok(Leaf)
        }),
        ServiceDeclaration::<Twice>::of("tree.twice")
            .param_service("left", "tree.leaf")
            .param_service("right", "tree.leaf")
            .constructed_by(|mut args| {
                let _left = args.take_instance::<Leaf>("left")?;
                let _right = args.take_instance::<Leaf>("right")?;
                Ok(Twice)
            }),
    ]);

    // 同一图内同一依赖出现两次, 构造两次
    let _ = container.get(&"tree.twice".into()).unwrap();
    assert_eq!(leaf_constructions.load(Ordering::SeqCst), 2);

    // 两次独立解析不共享实例
    let _ = container.get(&"tree.leaf".into()).unwrap();
    let _ = container.get(&"tree.leaf".into()).unwrap();
    assert_eq!(leaf_constructions.load(Ordering::SeqCst), 4);
}

#[test]
fn test_duplicate_identifier_keeps_first_registration() {
    struct First;
    struct Second;
    let container = ServiceContainerImpl::from_declarations(vec![
        ServiceDeclaration::<First>::of("app.dup").constructed_by(|_| Ok(First)),
        ServiceDeclaration::<Second>::of("app.dup").constructed_by(|_| Ok(Second)),
    ]);

    assert_eq!(container.registered_services().len(), 1);
    let instance = container.get_as::<First>(&"app.dup".into());
    assert!(instance.is_ok());
}

#[test]
fn test_default_value_is_passed_verbatim() {
    struct Settings {
        raw: serde_json::Value,
    }
    let default = serde_json::json!({"retries": 3, "hosts": ["a", "b"]});
    let expected = default.clone();

    let container = ServiceContainerImpl::from_declarations(vec![ServiceDeclaration::<
        Settings,
    >::of("app.settings")
    .param_builtin("options", Some(default))
    .constructed_by(|mut args| {
        let raw: serde_json::Value = args.take_builtin("options")?;
        Ok(Settings { raw })
    })]);

    let settings = container.get_as::<Settings>(&"app.settings".into()).unwrap();
    assert_eq!(settings.raw, expected);
}

#[test]
fn test_type_mismatch_is_detected_after_construction() {
    let registration = ServiceRegistration {
        id: ServiceId::new("app.liar"),
        type_info: TypeInfo::of::<FileLogger>(),
        blueprint: ConstructorBlueprint::empty(),
        capabilities: Vec::new(),
        adapters: HashMap::new(),
        builder: Arc::new(|_| Ok(Box::new(42u32) as BoxedInstance)),
        registered_at: chrono::Utc::now(),
    };
    let container = ServiceContainerImpl::from_declarations(vec![registration]);

    let err = container.get(&"app.liar".into()).unwrap_err();
    match err {
        ResolutionError::TypeMismatch { service, expected } => {
            assert_eq!(service.as_str(), "app.liar");
            assert!(expected.contains("FileLogger"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_builder_failure_is_reported_as_construction_error() {
    struct Flaky;
    let container = ServiceContainerImpl::from_declarations(vec![ServiceDeclaration::<Flaky>::of(
        "app.flaky",
    )
    .constructed_by(|_| -> Result<Flaky, ResolutionError> {
        Err(ResolutionError::construction_failed(
            "app.flaky",
            "模拟的构造失败",
        ))
    })]);

    let err = container.get(&"app.flaky".into()).unwrap_err();
    match err {
        ResolutionError::ConstructionFailed { service, message } => {
            assert_eq!(service.as_str(), "app.flaky");
            assert!(message.contains("模拟的构造失败"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_validation_reports_every_problem() {
    struct Broken;
    struct AlsoBroken;
    let container = ServiceContainerImpl::from_declarations(vec![
        ServiceDeclaration::<Broken>::of("app.broken")
            .param_builtin("missing", None)
            .constructed_by(|_| Ok(Broken)),
        ServiceDeclaration::<AlsoBroken>::of("app.also_broken")
            .param_service("dep", "app.nowhere")
            .constructed_by(|_| Ok(AlsoBroken)),
        file_logger_declaration(),
    ]);

    let errors = container.validate().unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|e| matches!(e, ResolutionError::UnresolvableParameter { .. })));
}

#[test]
fn test_nested_direct_dependencies_resolve_recursively() {
    struct Config {
        limit: u64,
    }
    struct Repository {
        config: Box<Config>,
    }
    struct Service {
        repository: Box<Repository>,
    }

    let container = ServiceContainerImpl::from_declarations(vec![
        ServiceDeclaration::<Config>::of("app.config")
            .param_builtin("limit", Some(serde_json::json!(16)))
            .constructed_by(|mut args| {
                let limit: u64 = args.take_builtin("limit")?;
                Ok(Config { limit })
            }),
        ServiceDeclaration::<Repository>::of("app.repository")
            .param_service("config", "app.config")
            .constructed_by(|mut args| {
                let config = args.take_instance::<Config>("config")?;
                Ok(Repository { config })
            }),
        ServiceDeclaration::<Service>::of("app.service")
            .param_service("repository", "app.repository")
            .constructed_by(|mut args| {
                let repository = args.take_instance::<Repository>("repository")?;
                Ok(Service { repository })
            }),
    ]);

    let service = container.get_as::<Service>(&"app.service".into()).unwrap();
    assert_eq!(service.repository.config.limit, 16);
}
