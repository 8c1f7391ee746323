//! 증거 수집 — 해석 없는 원시 파일시스템 신호
//!
//! [`Evidence`]는 분류기가 소비하는 원시 신호만 수집하며, 어떤 의미
//! 추론도 하지 않습니다. 파일 부재는 증거의 부재일 뿐 에러가 아니고,
//! 읽을 수 없거나 과대한 파일은 조용히 건너뜁니다 (debug 로그만 남김).
//!
//! 같은 디렉토리 트리에 대해 두 번 수집하면 바이트 단위로 동일한
//! 증거가 나옵니다 (BTree 컬렉션으로 순서 고정).

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::paths;

/// 증거 파일 최대 크기 (바이트) — 이를 넘는 파일은 수집에서 제외
pub const MAX_EVIDENCE_FILE_SIZE: u64 = 1024 * 1024;

/// 존재 여부만 확인하는 마커 파일 목록
const MARKER_PATHS: &[&str] = &[
    "Gemfile",
    "config/routes.rb",
    "next.config.js",
    "next.config.mjs",
    "next.config.ts",
    "artisan",
    "composer.json",
    "package.json",
    "index.html",
];

/// 내용을 수집하는 의존성 매니페스트 목록
const MANIFEST_PATHS: &[&str] = &["package.json", "Gemfile", "composer.json"];

/// 원시 라인을 수집하는 환경 파일 목록
const ENV_FILES: &[&str] = &[".env", ".env.example", ".env.local"];

/// 내용을 수집하는 마크업/템플릿 파일 목록 (단일 앱 관례 위치)
const MARKUP_PATHS: &[&str] = &[
    "index.html",
    "public/index.html",
    "src/index.html",
    "app/views/layouts/application.html.erb",
    "resources/views/layouts/app.blade.php",
    "app/layout.tsx",
    "app/layout.js",
    "src/app/layout.tsx",
    "src/app/layout.js",
];

/// 모노레포 변형까지 수집하는 레이아웃 파일명
const MONOREPO_LAYOUT_FILES: &[&str] = &["layout.tsx", "layout.js"];

/// 환경 파일의 원시 라인 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvLine {
    /// 출처 파일명 (예: `.env.example`)
    pub file: String,
    /// 원시 라인 (trim하지 않음)
    pub line: String,
}

/// 프로젝트 루트에서 수집한 원시 증거
///
/// 모든 소비자는 이 증거에 자신의 패턴 규칙을 독립적으로 적용합니다.
#[derive(Debug, Clone, Default)]
pub struct Evidence {
    root: PathBuf,
    markers: BTreeSet<String>,
    manifests: BTreeMap<String, String>,
    env_lines: Vec<EnvLine>,
    markup: BTreeMap<String, String>,
}

impl Evidence {
    /// 루트 디렉토리에서 증거를 수집합니다.
    ///
    /// 실패하지 않습니다. 루트가 없으면 빈 증거를 반환합니다.
    pub fn collect(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let mut evidence = Self {
            root: root.clone(),
            ..Self::default()
        };

        for marker in MARKER_PATHS {
            if root.join(marker).is_file() {
                evidence.markers.insert((*marker).to_owned());
            }
        }

        for manifest in MANIFEST_PATHS {
            if let Some(content) = read_capped(&root.join(manifest)) {
                evidence.manifests.insert((*manifest).to_owned(), content);
            }
        }

        for env_file in ENV_FILES {
            let Some(content) = read_capped(&root.join(env_file)) else {
                continue;
            };
            for line in content.lines() {
                evidence.env_lines.push(EnvLine {
                    file: (*env_file).to_owned(),
                    line: line.to_owned(),
                });
            }
        }

        let mut markup_candidates: Vec<PathBuf> =
            MARKUP_PATHS.iter().map(PathBuf::from).collect();
        for layout in MONOREPO_LAYOUT_FILES {
            markup_candidates.extend(paths::monorepo_app_candidates(&root, layout));
        }
        for candidate in markup_candidates {
            if let Some(content) = read_capped(&root.join(&candidate)) {
                evidence
                    .markup
                    .insert(candidate.to_string_lossy().into_owned(), content);
            }
        }

        evidence
    }

    /// 수집 대상 루트 디렉토리를 반환합니다.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 마커 파일이 존재하는지 확인합니다.
    pub fn has_marker(&self, relative_path: &str) -> bool {
        self.markers.contains(relative_path)
    }

    /// 매니페스트 내용을 반환합니다 (수집되지 않았으면 None).
    pub fn manifest(&self, relative_path: &str) -> Option<&str> {
        self.manifests.get(relative_path).map(String::as_str)
    }

    /// 수집된 매니페스트 (경로, 내용) 쌍을 순회합니다.
    pub fn manifests(&self) -> impl Iterator<Item = (&str, &str)> {
        self.manifests
            .iter()
            .map(|(path, content)| (path.as_str(), content.as_str()))
    }

    /// 환경 파일 원시 라인 목록을 반환합니다.
    pub fn env_lines(&self) -> &[EnvLine] {
        &self.env_lines
    }

    /// 수집된 마크업 (경로, 내용) 쌍을 순회합니다.
    pub fn markup(&self) -> impl Iterator<Item = (&str, &str)> {
        self.markup
            .iter()
            .map(|(path, content)| (path.as_str(), content.as_str()))
    }
}

/// 크기 상한을 적용하여 파일을 읽습니다.
///
/// 부재/과대/비UTF-8/읽기 실패는 모두 None이며 수집을 중단시키지 않습니다.
fn read_capped(path: &Path) -> Option<String> {
    let metadata = std::fs::metadata(path).ok()?;
    if !metadata.is_file() {
        return None;
    }
    if metadata.len() > MAX_EVIDENCE_FILE_SIZE {
        debug!(path = %path.display(), size = metadata.len(), "evidence file too large, skipping");
        return None;
    }
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "failed to read evidence file, skipping");
            None
        }
    }
}
