use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// 未指定无线类型时使用的值，Mozilla 在缺少该字段时无法给出位置
pub const DEFAULT_RADIO_TYPE: &str = "gsm";

pub const DEFAULT_USER_AGENT: &str = "GeoTrack/1.0";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// 定义客户端错误类型
#[derive(Error, Debug)]
pub enum ClientError {
    /// 400: 请求数据格式错误或 API key 无效
    #[error("Bad Request")]
    BadRequest,
    /// 403: 请求配额已用完
    #[error("Forbidden")]
    Forbidden,
    /// 404: 无法确定位置
    #[error("Not Found")]
    NotFound,
    #[error("{reason}")]
    UnexpectedStatus { status: u16, reason: String },
    #[error("无效的服务地址 {url}: {message}")]
    InvalidServiceUrl { url: String, message: String },
    #[error("请求头解析失败: {0}")]
    HeaderParseError(String),
    #[error("HTTP请求失败: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("JSON解析失败: {0}")]
    JsonParseError(#[from] serde_json::Error),
}

impl ClientError {
    /// 将非 200 的状态码映射为错误
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::BAD_REQUEST => ClientError::BadRequest,
            StatusCode::FORBIDDEN => ClientError::Forbidden,
            StatusCode::NOT_FOUND => ClientError::NotFound,
            other => ClientError::UnexpectedStatus {
                status: other.as_u16(),
                reason: other
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| other.as_str().to_string()),
            },
        }
    }

    /// 是否为三种已知的服务端拒绝错误之一
    pub fn is_sentinel(&self) -> bool {
        matches!(
            self,
            ClientError::BadRequest | ClientError::Forbidden | ClientError::NotFound
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::RequestError(e) if e.is_timeout())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// 客户端运行参数，在创建时固定到客户端实例中
#[derive(Debug, Clone, PartialEq)]
pub struct LocatorSettings {
    pub request_timeout: Duration,
    /// 不使用基于 IP 地址的定位
    pub ignore_ip_method: bool,
    pub user_agent: String,
}

impl Default for LocatorSettings {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            ignore_ip_method: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl LocatorSettings {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_ignore_ip_method(mut self, ignore: bool) -> Self {
        self.ignore_ip_method = ignore;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// 观测到的基站
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellTower {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radio_type: Option<String>,
    pub mobile_country_code: u16,
    pub mobile_network_code: u16,
    pub location_area_code: u32,
    pub cell_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal_strength: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing_advance: Option<u32>,
}

/// 观测到的 Wi-Fi 接入点
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WifiAccessPoint {
    pub mac_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal_strength: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal_to_noise_ratio: Option<i32>,
}

/// 服务端允许使用的降级定位方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fallbacks {
    /// 按位置区域码 (LAC) 定位
    #[serde(default = "default_true")]
    pub lacf: bool,
    /// 按 IP 地址定位
    #[serde(default = "default_true")]
    pub ipf: bool,
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self {
            lacf: true,
            ipf: true,
        }
    }
}

impl Fallbacks {
    pub fn disabled() -> Self {
        Self {
            lacf: false,
            ipf: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// 定位请求
///
/// `ip_address` 只能从输入中读取，从不序列化到请求体，发送时放在
/// `X-Forwarded-For` 头中。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_mobile_country_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_mobile_network_code: Option<u16>,
    #[serde(default)]
    pub radio_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(default)]
    pub consider_ip: bool,
    #[serde(default)]
    pub cell_towers: Vec<CellTower>,
    #[serde(default)]
    pub wifi_access_points: Vec<WifiAccessPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallbacks: Option<Fallbacks>,
    #[serde(default, skip_serializing)]
    pub ip_address: Option<String>,
}

impl LocateRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_radio_type(mut self, radio_type: impl Into<String>) -> Self {
        self.radio_type = radio_type.into();
        self
    }

    pub fn with_cell(mut self, cell: CellTower) -> Self {
        self.cell_towers.push(cell);
        self
    }

    pub fn with_wifi(mut self, mac_address: impl Into<String>, signal_strength: Option<i32>) -> Self {
        self.wifi_access_points.push(WifiAccessPoint {
            mac_address: mac_address.into(),
            signal_strength,
            ..Default::default()
        });
        self
    }

    pub fn with_fallbacks(mut self, fallbacks: Fallbacks) -> Self {
        self.fallbacks = Some(fallbacks);
        self
    }

    pub fn with_ip_address(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// 归一化后的定位结果，与服务提供方无关
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocateResponse {
    pub location: Location,
    /// 精度半径（米）
    pub accuracy: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}
