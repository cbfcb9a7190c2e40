use super::types::{ClientResult, LocateRequest, LocateResponse, LocatorSettings};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

// 已知的定位服务地址
pub const MOZILLA: &str = "https://location.services.mozilla.com/v1/geolocate";
pub const GOOGLE: &str = "https://www.googleapis.com/geolocation/v1/geolocate";
pub const YANDEX: &str = "http://api.lbs.yandex.net/geolocation";

/// 请求格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Mozilla 与 Google 共用的 JSON 格式
    Standard,
    Yandex,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Standard => write!(f, "Standard"),
            Dialect::Yandex => write!(f, "Yandex"),
        }
    }
}

impl Dialect {
    /// 从服务地址推断请求格式，只有 Yandex 地址完全一致时才使用 Yandex 格式
    pub fn from_service_url(service_url: &str) -> Self {
        if service_url == YANDEX {
            Dialect::Yandex
        } else {
            Dialect::Standard
        }
    }
}

/// 所有定位服务客户端支持的接口
#[async_trait]
pub trait Locator: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// 请求地址（不含 API key）
    fn service_url(&self) -> &str;

    fn settings(&self) -> &LocatorSettings;

    /// 将观测数据发送到定位服务并返回解析后的结果
    async fn locate(&self, request: &LocateRequest) -> ClientResult<LocateResponse>;
}
