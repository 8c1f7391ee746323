//! 실행 컨텍스트 — 스캔 한 번에 대한 불변 상태
//!
//! [`Context`]는 호출당 한 번 조립되며, 검사들은 이를 읽기 전용으로만
//! 소비합니다. 내부에 공유 가변 상태가 없으므로 `Send + Sync`이며,
//! 향후 검사 병렬화를 도입해도 러너 외에는 동기화가 필요 없습니다.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::PreflightConfig;
use crate::types::{ServiceDeclaration, Stack};

/// 스캔 실행 컨텍스트
///
/// 루트 디렉토리, 병합된 스택/서비스 분류, 사용자 설정, HTTP 클라이언트,
/// 상세 출력 플래그를 담습니다. 생성 후 변경되지 않습니다.
#[derive(Debug, Clone)]
pub struct Context {
    /// 스캔 대상 프로젝트 루트
    pub root_dir: PathBuf,
    /// 추론된 스택 레이블
    pub stack: Stack,
    /// 서비스 선언 판정 (설정 오버라이드 병합 완료)
    pub services: BTreeMap<String, ServiceDeclaration>,
    /// 사용자 설정
    pub config: PreflightConfig,
    /// 공유 HTTP 클라이언트 (타임아웃 설정 포함)
    pub client: reqwest::Client,
    /// 상세 출력 여부
    pub verbose: bool,
}

impl Context {
    /// 빌더를 생성합니다.
    pub fn builder(root_dir: impl Into<PathBuf>) -> ContextBuilder {
        ContextBuilder::new(root_dir)
    }

    /// 서비스가 선언되었는지 확인합니다.
    ///
    /// 알려지지 않은 서비스명은 선언되지 않은 것으로 취급합니다.
    pub fn service_declared(&self, name: &str) -> bool {
        self.services.get(name).is_some_and(|decl| decl.declared)
    }
}

/// [`Context`] 빌더
///
/// 분류기 출력과 설정을 받아 컨텍스트를 조립합니다.
/// `build()`에서 설정의 `services` 오버라이드 맵을 분류 결과에 병합합니다.
pub struct ContextBuilder {
    root_dir: PathBuf,
    stack: Stack,
    services: BTreeMap<String, ServiceDeclaration>,
    config: PreflightConfig,
    client: Option<reqwest::Client>,
    verbose: bool,
}

impl ContextBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            stack: Stack::Unknown,
            services: BTreeMap::new(),
            config: PreflightConfig::default(),
            client: None,
            verbose: false,
        }
    }

    /// 추론된 스택을 지정합니다.
    pub fn stack(mut self, stack: Stack) -> Self {
        self.stack = stack;
        self
    }

    /// 분류기가 산출한 서비스 판정을 지정합니다.
    pub fn services(mut self, services: BTreeMap<String, ServiceDeclaration>) -> Self {
        self.services = services;
        self
    }

    /// 사용자 설정을 지정합니다.
    pub fn config(mut self, config: PreflightConfig) -> Self {
        self.config = config;
        self
    }

    /// HTTP 클라이언트를 지정합니다.
    ///
    /// 지정하지 않으면 기본 클라이언트를 생성합니다 (테스트 편의용).
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// 상세 출력 여부를 지정합니다.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// 컨텍스트를 조립합니다.
    ///
    /// 설정의 `services` 맵에 있는 항목은 분류 결과와 무관하게
    /// 선언 여부를 강제하며, 오버라이드 출처가 근거로 기록됩니다.
    pub fn build(self) -> Context {
        let mut services = self.services;

        for (name, declared) in &self.config.services {
            services
                .entry(name.clone())
                .or_insert_with(ServiceDeclaration::undeclared)
                .apply_override(*declared, "preflight.yml");
        }

        Context {
            root_dir: self.root_dir,
            stack: self.stack,
            services,
            config: self.config,
            client: self.client.unwrap_or_default(),
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classified_services() -> BTreeMap<String, ServiceDeclaration> {
        let mut services = BTreeMap::new();
        let mut stripe = ServiceDeclaration::undeclared();
        stripe.add_evidence("package.json", "stripe");
        services.insert("stripe".to_owned(), stripe);
        services.insert("sentry".to_owned(), ServiceDeclaration::undeclared());
        services
    }

    #[test]
    fn build_without_overrides_keeps_classification() {
        let ctx = Context::builder("/tmp/project")
            .services(classified_services())
            .build();
        assert!(ctx.service_declared("stripe"));
        assert!(!ctx.service_declared("sentry"));
    }

    #[test]
    fn build_applies_true_override() {
        let mut config = PreflightConfig::default();
        config.services.insert("sentry".to_owned(), true);

        let ctx = Context::builder("/tmp/project")
            .services(classified_services())
            .config(config)
            .build();

        assert!(ctx.service_declared("sentry"));
        let decl = ctx.services.get("sentry").unwrap();
        assert_eq!(decl.evidence[0].file, "preflight.yml");
    }

    #[test]
    fn build_applies_false_override_over_evidence() {
        let mut config = PreflightConfig::default();
        config.services.insert("stripe".to_owned(), false);

        let ctx = Context::builder("/tmp/project")
            .services(classified_services())
            .config(config)
            .build();

        assert!(!ctx.service_declared("stripe"));
        assert!(ctx.services.get("stripe").unwrap().evidence.is_empty());
    }

    #[test]
    fn build_inserts_unknown_override_key() {
        let mut config = PreflightConfig::default();
        config.services.insert("postmark".to_owned(), true);

        let ctx = Context::builder("/tmp/project").config(config).build();
        assert!(ctx.service_declared("postmark"));
    }

    #[test]
    fn unknown_service_is_undeclared() {
        let ctx = Context::builder("/tmp/project").build();
        assert!(!ctx.service_declared("nonexistent"));
    }

    #[test]
    fn default_stack_is_unknown() {
        let ctx = Context::builder("/tmp/project").build();
        assert_eq!(ctx.stack, Stack::Unknown);
        assert!(!ctx.verbose);
    }
}
