//! 헬스 엔드포인트 검사
//!
//! 설정된 경로가 있으면 그 경로만 확인하고, 없으면 관례적인 헬스
//! 경로들을 차례로 시도한 뒤 루트 URL로 대체합니다. URL이 하나도
//! 설정되지 않았으면 확인할 것이 없으므로 통과입니다.

use async_trait::async_trait;

use preflight_core::check::Check;
use preflight_core::context::Context;
use preflight_core::error::CheckError;
use preflight_core::types::CheckResult;

use crate::probe;

/// 자동 탐지 시 시도하는 관례적 헬스 경로
const COMMON_PATHS: &[&str] = &["/health", "/healthz", "/api/health", "/_health", "/status"];

/// 헬스 엔드포인트 검사
pub struct HealthEndpointCheck;

#[async_trait]
impl Check for HealthEndpointCheck {
    fn id(&self) -> &'static str {
        "healthEndpoint"
    }

    fn title(&self) -> &'static str {
        "Health endpoint"
    }

    async fn run(&self, ctx: &Context) -> Result<CheckResult, CheckError> {
        let mut base_urls: Vec<&str> = Vec::new();
        if let Some(staging) = ctx.config.urls.staging.as_deref() {
            base_urls.push(staging);
        }
        if let Some(production) = ctx.config.urls.production.as_deref() {
            base_urls.push(production);
        }

        if base_urls.is_empty() {
            return Ok(CheckResult::pass(
                self.id(),
                self.title(),
                "No URLs configured to check",
            ));
        }

        let configured_path = ctx
            .config
            .checks
            .health_endpoint
            .as_ref()
            .and_then(|opts| opts.path.as_deref());

        // 설정된 경로가 있으면 그것만 확인
        if let Some(path) = configured_path {
            return Ok(self.probe_path(ctx, &base_urls, path, true).await);
        }

        // 관례적 경로 자동 탐지: 성공한 경우에만 보고
        for path in COMMON_PATHS {
            let result = self.probe_path(ctx, &base_urls, path, false).await;
            if result.passed {
                return Ok(result);
            }
        }

        // 대체: 루트 URL이 200을 반환하는지 확인
        Ok(self.probe_path(ctx, &base_urls, "/", false).await)
    }
}

impl HealthEndpointCheck {
    /// 모든 base URL에 대해 경로 하나를 프로브합니다.
    async fn probe_path(
        &self,
        ctx: &Context,
        base_urls: &[&str],
        path: &str,
        configured: bool,
    ) -> CheckResult {
        let mut last_error = String::new();

        for base in base_urls {
            let url = probe::join_url(base, path);
            match probe::get_status(&ctx.client, &url).await {
                Ok(status) if status.as_u16() == 200 => {
                    let message = if path == "/" {
                        format!("Site reachable at {url} (200 OK)")
                    } else {
                        format!("Health endpoint at {url} returned 200 OK")
                    };
                    let mut result = CheckResult::pass(self.id(), self.title(), message);
                    if ctx.verbose && !configured && path != "/" {
                        result = result.with_details(["Auto-detected health endpoint"]);
                    }
                    return result;
                }
                Ok(status) => {
                    last_error = format!("returned status {}", status.as_u16());
                }
                Err(e) => {
                    last_error = e.to_string();
                }
            }
        }

        // 자동 탐지 프로브의 실패는 보고하지 않고 다음 경로로 넘어감
        if !configured && path != "/" {
            return CheckResult::warn(self.id(), self.title(), String::new());
        }

        let mut suggestions = vec!["Ensure your site is accessible".to_owned()];
        if configured {
            suggestions.push("Check that the health path is correct in preflight.yml".to_owned());
        } else {
            suggestions
                .push("Consider adding a /health endpoint for better monitoring".to_owned());
        }

        CheckResult::warn(
            self.id(),
            self.title(),
            format!("Site unreachable: {last_error}"),
        )
        .with_suggestions(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use preflight_core::config::PreflightConfig;
    use preflight_core::types::Severity;

    #[tokio::test]
    async fn no_urls_configured_passes() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::builder(dir.path()).build();
        let result = HealthEndpointCheck.run(&ctx).await.unwrap();
        assert!(result.passed);
        assert!(result.message.contains("No URLs configured"));
    }

    #[tokio::test]
    async fn unreachable_url_warns() {
        // 연결 불가능한 로컬 포트 -> 환경적 실패는 Warn
        let dir = tempfile::tempdir().unwrap();
        let mut config = PreflightConfig::default();
        config.urls.production = Some("http://127.0.0.1:1".to_owned());
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(500))
            .build()
            .unwrap();
        let ctx = Context::builder(dir.path())
            .config(config)
            .client(client)
            .build();

        let result = HealthEndpointCheck.run(&ctx).await.unwrap();
        assert_eq!(result.severity, Severity::Warn);
        assert!(!result.passed);
        assert!(result.message.contains("Site unreachable"));
    }
}
