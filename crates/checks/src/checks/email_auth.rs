//! 이메일 인증 검사 — SPF/DMARC TXT 레코드
//!
//! 프로덕션 도메인의 apex에서 SPF를, `_dmarc.` 서브도메인에서 DMARC를
//! 조회합니다. 레코드 부재와 조회 실패(타임아웃 등)는 다른 결과입니다:
//! 부재는 "Missing" 경고, 실패는 조회 실패를 명시한 경고로 보고하며
//! 부재로 오인 보고하지 않습니다.

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::error::ResolveErrorKind;
use tracing::debug;

use preflight_core::check::Check;
use preflight_core::context::Context;
use preflight_core::error::CheckError;
use preflight_core::types::CheckResult;

use crate::probe;
use crate::walk;

/// TXT 레코드 표시 최대 길이
const RECORD_DISPLAY_MAX: usize = 60;

/// TXT 조회 결과
enum TxtProbe {
    /// 기대한 접두사의 레코드 발견
    Found(String),
    /// 조회는 성공했으나 해당 레코드 없음
    Absent,
    /// 조회 자체가 실패 (타임아웃, 서버 오류 등)
    Failed(String),
}

/// 이메일 인증 검사
pub struct EmailAuthCheck;

#[async_trait]
impl Check for EmailAuthCheck {
    fn id(&self) -> &'static str {
        "email_auth"
    }

    fn title(&self) -> &'static str {
        "Email authentication (SPF/DMARC)"
    }

    async fn run(&self, ctx: &Context) -> Result<CheckResult, CheckError> {
        let Some(production) = ctx.config.urls.production.as_deref() else {
            return Ok(CheckResult::pass(
                self.id(),
                self.title(),
                "Skipped (no production URL)",
            ));
        };

        let Some(domain) = probe::extract_domain(production) else {
            return Ok(CheckResult::pass(
                self.id(),
                self.title(),
                "Skipped (could not parse domain)",
            ));
        };

        // 시스템 리졸버 설정 사용. 기본 조회 타임아웃(5초)이 적용됩니다.
        let resolver = match TokioAsyncResolver::tokio_from_system_conf() {
            Ok(resolver) => resolver,
            Err(e) => {
                return Ok(CheckResult::warn(
                    self.id(),
                    self.title(),
                    format!("DNS resolver unavailable: {e}"),
                )
                .with_suggestions(["Check your system DNS configuration"]));
            }
        };

        let spf = lookup_txt(&resolver, &domain, "v=spf1").await;
        let dmarc = lookup_txt(&resolver, &format!("_dmarc.{domain}"), "v=dmarc1").await;

        // 조회 실패는 레코드 부재와 구분하여 보고
        if let TxtProbe::Failed(reason) = &spf {
            return Ok(lookup_failure(self, &domain, "SPF", reason));
        }
        if let TxtProbe::Failed(reason) = &dmarc {
            return Ok(lookup_failure(self, &domain, "DMARC", reason));
        }

        let mut missing = Vec::new();
        if matches!(spf, TxtProbe::Absent) {
            missing.push("SPF");
        }
        if matches!(dmarc, TxtProbe::Absent) {
            missing.push("DMARC");
        }

        if missing.is_empty() {
            return Ok(CheckResult::pass(
                self.id(),
                self.title(),
                format!("SPF and DMARC configured for {domain}"),
            ));
        }

        let mut suggestions = Vec::new();
        match &spf {
            TxtProbe::Found(record) => {
                suggestions.push(format!("SPF: {}", walk::truncate(record, RECORD_DISPLAY_MAX)));
            }
            _ => suggestions.push("Add SPF record: v=spf1 include:... ~all".to_owned()),
        }
        match &dmarc {
            TxtProbe::Found(record) => {
                suggestions.push(format!(
                    "DMARC: {}",
                    walk::truncate(record, RECORD_DISPLAY_MAX)
                ));
            }
            _ => suggestions.push(format!("Add DMARC record at _dmarc.{domain}")),
        }

        Ok(CheckResult::warn(
            self.id(),
            self.title(),
            format!("Missing: {}", missing.join(", ")),
        )
        .with_suggestions(suggestions))
    }
}

/// TXT 레코드를 조회하고 접두사로 필터링합니다.
async fn lookup_txt(resolver: &TokioAsyncResolver, name: &str, prefix: &str) -> TxtProbe {
    match resolver.txt_lookup(name.to_owned()).await {
        Ok(lookup) => {
            let records: Vec<String> = lookup.iter().map(|txt| txt.to_string()).collect();
            match find_record(&records, prefix) {
                Some(record) => TxtProbe::Found(record),
                None => TxtProbe::Absent,
            }
        }
        Err(e) => match e.kind() {
            // 레코드 부재는 실패가 아닌 음성 판정
            ResolveErrorKind::NoRecordsFound { .. } => TxtProbe::Absent,
            ResolveErrorKind::Timeout => TxtProbe::Failed("lookup timed out".to_owned()),
            _ => {
                debug!(name, error = %e, "txt lookup failed");
                TxtProbe::Failed(e.to_string())
            }
        },
    }
}

/// 접두사로 시작하는 첫 레코드를 찾습니다 (대소문자 무시).
fn find_record(records: &[String], prefix: &str) -> Option<String> {
    records
        .iter()
        .find(|record| record.to_lowercase().starts_with(prefix))
        .cloned()
}

/// 조회 실패 결과를 생성합니다.
fn lookup_failure(check: &EmailAuthCheck, domain: &str, kind: &str, reason: &str) -> CheckResult {
    CheckResult::warn(
        check.id(),
        check.title(),
        format!("{kind} lookup failed for {domain}: {reason}"),
    )
    .with_suggestions([
        "Re-run once your network/DNS is reachable".to_owned(),
        format!("Verify {kind} records manually with: dig TXT {domain}"),
    ])
}
