//! 两种请求格式共用的 HTTP 细节

use super::types::{ClientError, ClientResult, LocatorSettings};
use reqwest::header::HeaderValue;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub(crate) const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// 校验服务地址必须是完整的 http(s) 地址
pub(crate) fn parse_service_url(service_url: &str) -> ClientResult<Url> {
    let url = Url::parse(service_url).map_err(|e| ClientError::InvalidServiceUrl {
        url: service_url.to_string(),
        message: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ClientError::InvalidServiceUrl {
            url: service_url.to_string(),
            message: format!("unsupported scheme: {scheme}"),
        }),
    }
}

pub(crate) fn build_http_client(settings: &LocatorSettings) -> ClientResult<Client> {
    let client = Client::builder().timeout(settings.request_timeout).build()?;
    Ok(client)
}

pub(crate) fn user_agent_header(settings: &LocatorSettings) -> ClientResult<HeaderValue> {
    HeaderValue::from_str(&settings.user_agent)
        .map_err(|e| ClientError::HeaderParseError(format!("Invalid user-agent header: {e}")))
}

pub(crate) fn forwarded_for_header(ip_address: &str) -> ClientResult<HeaderValue> {
    HeaderValue::from_str(ip_address)
        .map_err(|e| ClientError::HeaderParseError(format!("Invalid x-forwarded-for header: {e}")))
}

/// 只有 200 才解析响应体，其余状态码转换为错误；响应在所有分支上都会被释放
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status != StatusCode::OK {
        warn!("Geolocation service rejected request with status {}", status);
        return Err(ClientError::from_status(status));
    }

    let body = response.bytes().await?;
    debug!("Geolocation service replied with {} bytes", body.len());
    Ok(serde_json::from_slice(&body)?)
}
