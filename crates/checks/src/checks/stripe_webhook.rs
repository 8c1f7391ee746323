//! Stripe 웹훅 엔드포인트 검사
//!
//! 설정된 웹훅 URL이 실제로 도달 가능한지 확인합니다.
//! Stripe 웹훅은 서명 없는 요청에 400을 반환할 수 있으므로
//! 5xx 미만의 모든 응답을 도달 가능으로 간주합니다.

use async_trait::async_trait;
use reqwest::Url;

use preflight_core::check::Check;
use preflight_core::context::Context;
use preflight_core::error::CheckError;
use preflight_core::types::CheckResult;

use crate::probe;

/// Stripe 웹훅 엔드포인트 검사
pub struct StripeWebhookCheck;

#[async_trait]
impl Check for StripeWebhookCheck {
    fn id(&self) -> &'static str {
        "stripeWebhook"
    }

    fn title(&self) -> &'static str {
        "Stripe webhook endpoint is reachable"
    }

    async fn run(&self, ctx: &Context) -> Result<CheckResult, CheckError> {
        if !ctx.service_declared("stripe") {
            return Ok(CheckResult::pass(
                self.id(),
                self.title(),
                "Stripe not declared, skipping",
            ));
        }

        let Some(url) = ctx
            .config
            .checks
            .stripe_webhook
            .as_ref()
            .and_then(|opts| opts.url.as_deref())
        else {
            return Ok(CheckResult::warn(
                self.id(),
                self.title(),
                "Stripe webhook URL not configured",
            )
            .with_suggestions(["Add stripeWebhook.url to preflight.yml"]));
        };

        if let Err(e) = Url::parse(url) {
            return Ok(CheckResult::warn(
                self.id(),
                self.title(),
                format!("Invalid webhook URL: {e}"),
            ));
        }

        let status = match probe::head_or_get_status(&ctx.client, url).await {
            Ok(status) => status,
            Err(e) => {
                return Ok(CheckResult::warn(
                    self.id(),
                    self.title(),
                    format!("Webhook endpoint unreachable: {e}"),
                )
                .with_suggestions([
                    "Ensure your Stripe webhook endpoint is accessible",
                    "Check that the URL is correct in preflight.yml",
                ]));
            }
        };

        // 서명 검증 전의 4xx도 엔드포인트 존재의 증거
        if status.is_success() || status.is_redirection() || status.is_client_error() {
            return Ok(CheckResult::pass(
                self.id(),
                self.title(),
                format!("Webhook endpoint reachable at {url}"),
            ));
        }

        Ok(CheckResult::warn(
            self.id(),
            self.title(),
            format!("Webhook endpoint returned {}", status.as_u16()),
        )
        .with_suggestions(["Check your webhook endpoint configuration"]))
    }
}
