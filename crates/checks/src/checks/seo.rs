//! SEO 메타데이터 검사
//!
//! 설정된 메인 레이아웃 파일에서 필수 메타 태그의 존재를 확인합니다.
//! 프레임워크별 대체 표기(JSX metadata, openGraph 객체 등)도 인정합니다.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use preflight_core::check::Check;
use preflight_core::context::Context;
use preflight_core::error::CheckError;
use preflight_core::types::CheckResult;

/// 필수 SEO 요소 하나의 패턴 집합
struct SeoPattern {
    name: &'static str,
    /// HTML 표준 표기
    primary: Regex,
    /// 프레임워크별 대체 표기
    alternates: Vec<Regex>,
}

static SEO_PATTERNS: LazyLock<Vec<SeoPattern>> = LazyLock::new(|| {
    let re = |s: &str| Regex::new(s).expect("static seo pattern must compile");
    vec![
        SeoPattern {
            name: "title",
            primary: re(r"<title[^>]*>"),
            alternates: vec![re(r"\btitle\s*[:=]"), re(r"<Title>")],
        },
        SeoPattern {
            name: "description",
            primary: re(r#"<meta[^>]+name=["']description["'][^>]*>"#),
            alternates: vec![
                re(r#"name:\s*["']description["']"#),
                re(r#"<meta\s+name="description""#),
            ],
        },
        SeoPattern {
            name: "og:title",
            primary: re(r#"<meta[^>]+property=["']og:title["'][^>]*>"#),
            alternates: vec![re(r#"property:\s*["']og:title["']"#), re(r"openGraph.*title")],
        },
        SeoPattern {
            name: "og:description",
            primary: re(r#"<meta[^>]+property=["']og:description["'][^>]*>"#),
            alternates: vec![
                re(r#"property:\s*["']og:description["']"#),
                re(r"openGraph.*description"),
            ],
        },
    ]
});

/// SEO 메타데이터 검사
pub struct SeoMetaCheck;

#[async_trait]
impl Check for SeoMetaCheck {
    fn id(&self) -> &'static str {
        "seoMeta"
    }

    fn title(&self) -> &'static str {
        "SEO metadata"
    }

    async fn run(&self, ctx: &Context) -> Result<CheckResult, CheckError> {
        let Some(layout) = ctx
            .config
            .checks
            .seo_meta
            .as_ref()
            .and_then(|opts| opts.main_layout.as_deref())
        else {
            return Ok(CheckResult::pass(
                self.id(),
                self.title(),
                "Check not configured",
            ));
        };

        let layout_path = ctx.root_dir.join(layout);
        let content = match tokio::fs::read_to_string(&layout_path).await {
            Ok(content) => content,
            Err(_) => {
                return Ok(CheckResult::warn(
                    self.id(),
                    self.title(),
                    format!("Could not read layout file: {layout}"),
                )
                .with_suggestions([
                    "Check that the mainLayout path is correct in preflight.yml",
                ]));
            }
        };

        let missing: Vec<&str> = SEO_PATTERNS
            .iter()
            .filter(|pattern| {
                !pattern.primary.is_match(&content)
                    && !pattern.alternates.iter().any(|alt| alt.is_match(&content))
            })
            .map(|pattern| pattern.name)
            .collect();

        if missing.is_empty() {
            return Ok(CheckResult::pass(
                self.id(),
                self.title(),
                "All required SEO metadata present",
            ));
        }

        Ok(CheckResult::warn(
            self.id(),
            self.title(),
            format!("Missing SEO metadata: {}", missing.join(", ")),
        )
        .with_suggestions([
            "Add missing meta tags to your layout",
            "Consider using a SEO component or helper",
        ]))
    }
}
