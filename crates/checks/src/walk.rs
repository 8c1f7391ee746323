//! 파일시스템 순회 헬퍼 — 스캔 검사들이 공유
//!
//! 의존성/빌드 디렉토리 건너뛰기 목록과 파일 크기 상한으로 순회를
//! 한정하여 병적인 트리에서도 스캔이 폭주하지 않도록 합니다.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

/// 코드 스캔에서 건너뛰는 디렉토리명 (시크릿 스캔용 최소 집합)
pub(crate) const SKIP_DIRS_SECRETS: &[&str] = &[
    "node_modules",
    "vendor",
    ".git",
    "dist",
    "build",
    ".next",
    "coverage",
    "tmp",
];

/// 디버그 구문 스캔에서 건너뛰는 디렉토리명
///
/// 컴파일된 에셋 디렉토리(public, static 등)까지 제외합니다.
pub(crate) const SKIP_DIRS_DEBUG: &[&str] = &[
    "node_modules",
    "vendor",
    ".git",
    "dist",
    "build",
    ".next",
    ".nuxt",
    "coverage",
    "__pycache__",
    ".cache",
    "tmp",
    "log",
    "logs",
    "storage",
    "cpresources",
    ".turbo",
    ".vercel",
    ".netlify",
    "public",
    "static",
    "_site",
    "out",
];

/// 디렉토리 트리를 순회하며 크기 상한 이하의 일반 파일 경로를 수집합니다.
///
/// `skip_dirs`에 이름이 포함된 디렉토리는 하위 전체를 건너뜁니다.
/// 읽기 에러는 해당 항목만 건너뛰며 순회를 중단시키지 않습니다.
pub(crate) fn walk_files(root: &Path, skip_dirs: &[&str], max_size: u64) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root).follow_links(false).into_iter();
    for entry in walker.filter_entry(|e| {
        if e.file_type().is_dir() {
            let name = e.file_name().to_string_lossy();
            !skip_dirs.iter().any(|skip| name == *skip)
        } else {
            true
        }
    }) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "walk error, skipping entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) if metadata.len() <= max_size => files.push(entry.into_path()),
            Ok(metadata) => {
                debug!(path = %entry.path().display(), size = metadata.len(), "file too large, skipping");
            }
            Err(e) => {
                debug!(path = %entry.path().display(), error = %e, "metadata read failed, skipping");
            }
        }
    }

    files
}

/// 루트 기준 상대 경로 문자열을 만듭니다 (실패 시 전체 경로).
pub(crate) fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

/// 문자열을 최대 길이로 자릅니다 (말줄임표 부착).
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_owned();
    }
    let cut = s
        .char_indices()
        .take_while(|(idx, _)| *idx <= max.saturating_sub(3))
        .last()
        .map_or(0, |(idx, _)| idx);
    format!("{}...", &s[..cut])
}
