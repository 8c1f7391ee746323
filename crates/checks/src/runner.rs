//! 러너 — 직렬 검사 오케스트레이터
//!
//! 레지스트리 순서대로 검사를 하나씩 실행합니다. 무시 목록의 검사는
//! 리포트에서 완전히 제외하며(통과 표시가 아님), 개별 검사의
//! 프레임워크 수준 실패나 타임아웃은 Warn 결과로 합성하여 격리합니다.
//! 한 검사의 실패가 나머지 검사 실행을 막지 않습니다.
//!
//! 호출 간 내부 상태가 없으며, 각 호출은 독립적입니다.

use std::time::Duration;

use tracing::{debug, warn};

use preflight_core::check::Check;
use preflight_core::config::PreflightConfig;
use preflight_core::context::Context;
use preflight_core::types::{CheckResult, Report};

/// 직렬 검사 러너
pub struct Runner {
    /// 검사별 벽시계 타임아웃
    timeout: Duration,
}

impl Runner {
    /// 타임아웃을 지정하여 러너를 생성합니다.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// 설정의 타임아웃 값으로 러너를 생성합니다.
    pub fn from_config(config: &PreflightConfig) -> Self {
        Self::new(Duration::from_secs(config.effective_timeout_secs()))
    }

    /// 무시되지 않은 모든 검사를 실행하고 리포트를 생성합니다.
    ///
    /// 무시 목록은 컨텍스트 설정에서 읽으며, 검사 ID의 정확한 일치로만
    /// 매칭합니다. 결과 순서는 레지스트리 순서를 그대로 보존합니다.
    pub async fn run(&self, ctx: &Context, checks: &[Box<dyn Check>]) -> Report {
        let mut results = Vec::with_capacity(checks.len());

        for check in checks {
            if ctx.config.is_ignored(check.id()) {
                debug!(check = check.id(), "check ignored, excluded from report");
                continue;
            }

            debug!(check = check.id(), "running check");
            let result = match tokio::time::timeout(self.timeout, check.run(ctx)).await {
                Ok(Ok(result)) => result,
                Ok(Err(e)) => {
                    // 프레임워크 수준 실패: 격리하여 Warn으로 보고
                    warn!(check = check.id(), error = %e, "check failed internally");
                    CheckResult::warn(
                        check.id(),
                        check.title(),
                        format!("Check failed internally: {e}"),
                    )
                    .with_suggestions([
                        "Re-run with --log-level debug for details",
                        "Report this if it persists",
                    ])
                }
                Err(_) => {
                    warn!(check = check.id(), timeout_secs = self.timeout.as_secs(), "check timed out");
                    CheckResult::warn(
                        check.id(),
                        check.title(),
                        format!("Check timed out after {}s", self.timeout.as_secs()),
                    )
                    .with_suggestions(["Increase timeoutSecs in preflight.yml"])
                }
            };
            results.push(result);
        }

        Report::new(results)
    }
}
