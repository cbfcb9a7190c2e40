use super::http::{
    build_http_client, forwarded_for_header, parse_service_url, read_json, user_agent_header,
    X_FORWARDED_FOR,
};
use super::traits::{Dialect, Locator};
use super::types::{
    ClientResult, Fallbacks, LocateRequest, LocateResponse, LocatorSettings, DEFAULT_RADIO_TYPE,
};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Url};
use tracing::debug;

/// Mozilla / Google 格式的定位客户端
#[derive(Debug, Clone)]
pub struct StandardClient {
    client: Client,
    service_url: String,
    request_url: Url,
    user_agent: HeaderValue,
    settings: LocatorSettings,
}

impl StandardClient {
    /// API key 不为空时作为 `key` 查询参数附加到地址上
    pub fn new(service_url: &str, api_key: &str, settings: LocatorSettings) -> ClientResult<Self> {
        let mut request_url = parse_service_url(service_url)?;
        if !api_key.is_empty() {
            request_url.query_pairs_mut().append_pair("key", api_key);
        }

        let client = build_http_client(&settings)?;
        let user_agent = user_agent_header(&settings)?;

        Ok(Self {
            client,
            service_url: service_url.to_string(),
            request_url,
            user_agent,
            settings,
        })
    }

    /// 实际请求的地址，包含 API key
    pub fn request_url(&self) -> &Url {
        &self.request_url
    }

    /// 生成发送的请求体，并取出需要通过请求头转发的 IP 地址
    pub fn prepare_request(&self, request: &LocateRequest) -> (LocateRequest, Option<String>) {
        let mut body = request.clone();

        body.consider_ip = !self.settings.ignore_ip_method;
        if self.settings.ignore_ip_method {
            body.fallbacks = Some(Fallbacks::disabled());
        }
        if body.radio_type.is_empty() {
            body.radio_type = DEFAULT_RADIO_TYPE.to_string();
        }

        let ip_address = body.ip_address.take().filter(|ip| !ip.is_empty());
        (body, ip_address)
    }
}

#[async_trait]
impl Locator for StandardClient {
    fn dialect(&self) -> Dialect {
        Dialect::Standard
    }

    fn service_url(&self) -> &str {
        &self.service_url
    }

    fn settings(&self) -> &LocatorSettings {
        &self.settings
    }

    async fn locate(&self, request: &LocateRequest) -> ClientResult<LocateResponse> {
        let (body, ip_address) = self.prepare_request(request);
        let data = serde_json::to_vec(&body)?;

        debug!(
            "Sending geolocation request to {} ({} cells, {} access points, forwarded ip: {})",
            self.service_url,
            body.cell_towers.len(),
            body.wifi_access_points.len(),
            ip_address.is_some()
        );

        let mut builder = self
            .client
            .post(self.request_url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(USER_AGENT, self.user_agent.clone())
            .body(data);
        if let Some(ip_address) = ip_address.as_deref() {
            builder = builder.header(X_FORWARDED_FOR, forwarded_for_header(ip_address)?);
        }

        let response = builder.send().await?;
        read_json(response).await
    }
}
