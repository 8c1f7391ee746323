//! 파비콘/앱 아이콘 검사
//!
//! 파비콘, 애플 터치 아이콘, 웹 매니페스트를 프레임워크별 웹 루트와
//! 모노레포 App Router 변형까지 탐색합니다. 정적 파일이 없으면
//! 동적 아이콘 소스(icon.tsx 등)와 HTML 내 링크 선언도 인정합니다.
//!
//! 파비콘 자체가 없으면 Error, 파비콘은 있으나 부속물이 빠지면 Warn입니다.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use preflight_core::check::Check;
use preflight_core::context::Context;
use preflight_core::error::CheckError;
use preflight_core::types::CheckResult;

use preflight_detect::paths;

use crate::walk;

/// 파비콘 파일명 후보
const FAVICON_FILES: &[&str] = &[
    "favicon.ico",
    "favicon.png",
    "favicon.svg",
    "favicon.webp",
    "icon.png",
    "icon.svg",
];

/// 애플 터치 아이콘 파일명 후보
const APPLE_ICON_FILES: &[&str] = &[
    "apple-touch-icon.png",
    "apple-touch-icon.webp",
    "apple-touch-icon.jpg",
    "apple-touch-icon.svg",
    "apple-icon.png",
    "apple-icon.webp",
    "apple-icon.jpg",
    "apple-icon.svg",
];

/// 웹 매니페스트 파일명 후보
const MANIFEST_FILES: &[&str] = &[
    "manifest.json",
    "site.webmanifest",
    "manifest.ts",
    "manifest.js",
];

/// 애플 아이콘 링크를 찾아볼 템플릿 위치
const TEMPLATE_PATHS: &[&str] = &[
    "templates/_layout.twig",
    "templates/_layout.html",
    "templates/_head.twig",
    "templates/_head.html",
    "templates/_partials/head.twig",
    "templates/_partials/header.twig",
    "app/views/layouts/application.html.erb",
    "resources/views/layouts/app.blade.php",
    "_includes/head.html",
    "layouts/_default/baseof.html",
    "src/layouts/Layout.astro",
];

/// Next.js App Router 레이아웃 위치 (단일 앱)
const NEXT_LAYOUT_PATHS: &[&str] = &[
    "app/layout.tsx",
    "app/layout.js",
    "src/app/layout.tsx",
    "src/app/layout.js",
];

/// 동적 아이콘 소스를 탐색할 디렉토리
const DYNAMIC_DIRS: &[&str] = &["app", "src/app"];

/// 동적 탐색 파일 크기 상한 (존재만 보므로 넉넉히)
const MAX_WALK_FILE_SIZE: u64 = 10 * 1024 * 1024;

static APPLE_TOUCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)apple-touch-icon").expect("static pattern must compile"));

/// Next.js metadata API의 icons.apple 선언
static NEXT_ICONS_APPLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)icons\s*[:=]\s*\{[^}]*apple\s*:").expect("static pattern must compile")
});

/// 파비콘/앱 아이콘 검사
pub struct FaviconCheck;

#[async_trait]
impl Check for FaviconCheck {
    fn id(&self) -> &'static str {
        "favicon"
    }

    fn title(&self) -> &'static str {
        "Favicon and app icons"
    }

    async fn run(&self, ctx: &Context) -> Result<CheckResult, CheckError> {
        let root = &ctx.root_dir;
        let mut found: Vec<String> = Vec::new();
        let mut missing: Vec<&str> = Vec::new();

        // --- 파비콘 ---
        let favicon = find_first(root, FAVICON_FILES)
            .or_else(|| find_dynamic_source(root, &is_dynamic_favicon));
        match favicon {
            Some(path) => found.push(path.display().to_string()),
            None => missing.push("favicon"),
        }
        let has_favicon = missing.is_empty();

        // --- 애플 터치 아이콘 ---
        let apple = find_first(root, APPLE_ICON_FILES)
            .map(|p| p.display().to_string())
            .or_else(|| find_apple_icon_in_markup(ctx))
            .or_else(|| {
                find_dynamic_source(root, &is_dynamic_apple_icon).map(|p| p.display().to_string())
            });
        match apple {
            Some(path) => found.push(path),
            None => missing.push("apple-touch-icon"),
        }

        // --- 웹 매니페스트 ---
        let manifest = find_first(root, MANIFEST_FILES)
            .or_else(|| find_dynamic_source(root, &is_dynamic_manifest));
        match manifest {
            Some(path) => found.push(path.display().to_string()),
            None => missing.push("web manifest"),
        }

        if missing.is_empty() {
            return Ok(CheckResult::pass(
                self.id(),
                self.title(),
                "All icons and manifest present",
            )
            .with_details(found));
        }

        if has_favicon {
            // 파비콘은 있으나 부속물이 빠진 경우
            return Ok(CheckResult::warn(
                self.id(),
                self.title(),
                format!("Missing: {}", missing.join(", ")),
            )
            .with_suggestions([
                "Add apple-touch-icon.png (180x180px) for iOS",
                "Add manifest.json for PWA support",
            ])
            .with_details(found));
        }

        Ok(CheckResult::error(self.id(), self.title(), "Missing favicon")
            .with_suggestions([
                "Add favicon.ico or favicon.png to public/",
                "Use https://realfavicongenerator.net for complete icon set",
            ]))
    }
}

/// 파일명 후보들을 순서대로 해석하여 첫 존재 경로를 반환합니다.
fn find_first(root: &Path, filenames: &[&str]) -> Option<PathBuf> {
    for filename in filenames {
        let candidates = paths::candidate_paths(root, filename);
        if let Some(found) = paths::first_existing(root, &candidates) {
            return Some(found);
        }
    }
    None
}

/// app/ 트리에서 동적 소스 파일(icon.tsx 등)을 탐색합니다.
fn find_dynamic_source(root: &Path, matches: &dyn Fn(&str) -> bool) -> Option<PathBuf> {
    for dir in DYNAMIC_DIRS {
        let dir_path = root.join(dir);
        if !dir_path.is_dir() {
            continue;
        }
        for path in walk::walk_files(&dir_path, &["node_modules", ".git"], MAX_WALK_FILE_SIZE) {
            let name_lower = path
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            if matches(&name_lower) {
                return Some(PathBuf::from(walk::relative_display(root, &path)));
            }
        }
    }
    None
}

fn is_dynamic_favicon(name: &str) -> bool {
    matches!(
        name,
        "icon.tsx"
            | "icon.ts"
            | "icon.jsx"
            | "icon.js"
            | "favicon.tsx"
            | "favicon.ts"
            | "favicon.jsx"
            | "favicon.js"
    )
}

fn is_dynamic_apple_icon(name: &str) -> bool {
    name.starts_with("apple-icon.")
        && (name.ends_with(".tsx")
            || name.ends_with(".ts")
            || name.ends_with(".jsx")
            || name.ends_with(".js"))
}

fn is_dynamic_manifest(name: &str) -> bool {
    matches!(
        name,
        "manifest.ts" | "manifest.tsx" | "manifest.js" | "manifest.jsx"
    )
}

/// 템플릿/레이아웃에서 애플 아이콘 선언을 찾습니다.
fn find_apple_icon_in_markup(ctx: &Context) -> Option<String> {
    let root = &ctx.root_dir;

    // 설정된 메인 레이아웃 우선
    if let Some(layout) = ctx
        .config
        .checks
        .seo_meta
        .as_ref()
        .and_then(|opts| opts.main_layout.as_deref())
    {
        if let Ok(content) = std::fs::read_to_string(root.join(layout)) {
            if APPLE_TOUCH_RE.is_match(&content) {
                return Some("apple-touch-icon (in HTML)".to_owned());
            }
        }
    }

    // 공통 템플릿 위치
    for template in TEMPLATE_PATHS {
        if let Ok(content) = std::fs::read_to_string(root.join(template)) {
            if APPLE_TOUCH_RE.is_match(&content) {
                return Some("apple-touch-icon (in HTML)".to_owned());
            }
        }
    }

    // Next.js metadata icons API (단일 앱 + 모노레포 레이아웃)
    let mut layout_paths: Vec<PathBuf> = NEXT_LAYOUT_PATHS.iter().map(PathBuf::from).collect();
    layout_paths.extend(paths::monorepo_app_candidates(root, "layout.tsx"));
    layout_paths.extend(paths::monorepo_app_candidates(root, "layout.js"));

    for layout in layout_paths {
        if let Ok(content) = std::fs::read_to_string(root.join(&layout)) {
            if NEXT_ICONS_APPLE_RE.is_match(&content) {
                return Some("apple-touch-icon (in Next.js metadata)".to_owned());
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use preflight_core::types::Severity;

    fn ctx(dir: &tempfile::TempDir) -> Context {
        Context::builder(dir.path()).build()
    }

    fn write(dir: &tempfile::TempDir, relative: &str, content: &str) {
        let path = dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn missing_favicon_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FaviconCheck.run(&ctx(&dir)).await.unwrap();
        assert_eq!(result.severity, Severity::Error);
        assert_eq!(result.message, "Missing favicon");
    }

    #[tokio::test]
    async fn favicon_only_warns_about_companions() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "public/favicon.ico", "icon");

        let result = FaviconCheck.run(&ctx(&dir)).await.unwrap();
        assert_eq!(result.severity, Severity::Warn);
        assert!(result.message.contains("apple-touch-icon"));
        assert!(result.message.contains("web manifest"));
    }

    #[tokio::test]
    async fn complete_icon_set_passes() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "public/favicon.ico", "icon");
        write(&dir, "public/apple-touch-icon.png", "icon");
        write(&dir, "public/site.webmanifest", "{}");

        let result = FaviconCheck.run(&ctx(&dir)).await.unwrap();
        assert!(result.passed);
        assert!(result.message.contains("All icons and manifest present"));
    }

    #[tokio::test]
    async fn favicon_in_asset_subdir_is_found() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "public/assets/images/favicon.png", "icon");

        let result = FaviconCheck.run(&ctx(&dir)).await.unwrap();
        assert_ne!(result.severity, Severity::Error);
    }

    #[tokio::test]
    async fn monorepo_app_router_icon_is_found() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "apps/web/src/app/icon.png", "icon");

        let result = FaviconCheck.run(&ctx(&dir)).await.unwrap();
        assert_ne!(result.severity, Severity::Error);
        assert!(result
            .details
            .iter()
            .any(|d| d.contains("apps/web/src/app/icon.png")));
    }

    #[tokio::test]
    async fn dynamic_icon_source_is_found() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "src/app/marketing/icon.tsx", "export default function Icon() {}");

        let result = FaviconCheck.run(&ctx(&dir)).await.unwrap();
        assert_ne!(result.severity, Severity::Error);
    }

    #[tokio::test]
    async fn apple_icon_link_in_template_counts() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "public/favicon.ico", "icon");
        write(&dir, "public/manifest.json", "{}");
        write(
            &dir,
            "app/views/layouts/application.html.erb",
            r#"<link rel="apple-touch-icon" href="/apple-touch-icon.png">"#,
        );

        let result = FaviconCheck.run(&ctx(&dir)).await.unwrap();
        assert!(result.passed, "got: {}", result.message);
        assert!(result.details.iter().any(|d| d.contains("in HTML")));
    }

    #[tokio::test]
    async fn next_metadata_icons_apple_counts() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "public/favicon.ico", "icon");
        write(&dir, "public/manifest.json", "{}");
        write(
            &dir,
            "app/layout.tsx",
            r#"export const metadata = { icons: { icon: "/icon.png", apple: "/apple.png" } }"#,
        );

        let result = FaviconCheck.run(&ctx(&dir)).await.unwrap();
        assert!(result.passed, "got: {}", result.message);
        assert!(result.details.iter().any(|d| d.contains("Next.js metadata")));
    }

    #[tokio::test]
    async fn single_app_favicon_precedes_monorepo() {
        // public/favicon.ico가 탐색 순서상 먼저 보고됨
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "public/favicon.ico", "icon");
        write(&dir, "apps/web/src/app/icon.png", "icon");

        let result = FaviconCheck.run(&ctx(&dir)).await.unwrap();
        assert!(result
            .details
            .iter()
            .any(|d| d.contains("public/favicon.ico")));
    }
}
