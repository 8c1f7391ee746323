//! 네트워크 프로브 헬퍼 — HTTP 상태 조회 및 도메인 추출
//!
//! 각 네트워크 검사는 요청/응답 왕복 한 번만 소유하며, 재시도하지
//! 않습니다. 타임아웃은 컨텍스트의 공유 클라이언트에 설정되어 있습니다.

use reqwest::{Client, StatusCode, Url};

/// GET 요청을 보내고 상태 코드를 반환합니다.
pub(crate) async fn get_status(client: &Client, url: &str) -> Result<StatusCode, reqwest::Error> {
    let response = client.get(url).send().await?;
    Ok(response.status())
}

/// HEAD 요청을 먼저 시도하고, 전송 실패 시 GET으로 대체합니다.
///
/// 일부 엔드포인트는 HEAD를 거부하므로 GET 대체가 필요합니다.
pub(crate) async fn head_or_get_status(
    client: &Client,
    url: &str,
) -> Result<StatusCode, reqwest::Error> {
    match client.head(url).send().await {
        Ok(response) => Ok(response.status()),
        Err(_) => get_status(client, url).await,
    }
}

/// base URL과 경로를 이중 슬래시 없이 결합합니다.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// URL에서 호스트명을 추출합니다.
///
/// 스킴이 없으면 `https://`를 붙여 파싱합니다.
pub(crate) fn extract_domain(raw: &str) -> Option<String> {
    let with_scheme = if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_owned()
    } else {
        format!("https://{raw}")
    };
    let parsed = Url::parse(&with_scheme).ok()?;
    parsed.host_str().map(str::to_owned)
}
