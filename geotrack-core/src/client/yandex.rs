//! Yandex Locator API client
//!
//! Yandex expects a form field `json` holding its own document shape, with the API key
//! embedded in every request instead of the URL.

use super::http::{
    build_http_client, forwarded_for_header, parse_service_url, read_json, user_agent_header,
    X_FORWARDED_FOR,
};
use super::traits::{Dialect, Locator};
use super::types::{
    CellTower, ClientError, ClientResult, LocateRequest, LocateResponse, LocatorSettings, Location,
    WifiAccessPoint,
};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, USER_AGENT};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const API_VERSION: &str = "1.0";

#[derive(Debug, Serialize)]
pub(crate) struct YandexRequest<'a> {
    common: Common<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    gsm_cells: Vec<GsmCell>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    wifi_networks: Vec<WifiNetwork>,
}

#[derive(Debug, Serialize)]
struct Common<'a> {
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    api_key: &'a str,
}

#[derive(Debug, Serialize)]
struct GsmCell {
    countrycode: u16,
    operatorid: u16,
    cellid: u32,
    lac: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    signal_strength: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<u32>,
}

impl From<&CellTower> for GsmCell {
    fn from(cell: &CellTower) -> Self {
        Self {
            countrycode: cell.mobile_country_code,
            operatorid: cell.mobile_network_code,
            cellid: cell.cell_id,
            lac: cell.location_area_code,
            signal_strength: cell.signal_strength,
            age: cell.age,
        }
    }
}

#[derive(Debug, Serialize)]
struct WifiNetwork {
    mac: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    signal_strength: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<u32>,
}

impl From<&WifiAccessPoint> for WifiNetwork {
    fn from(wifi: &WifiAccessPoint) -> Self {
        Self {
            // Yandex 使用 00-1C-F0-E4-BB-F5 形式
            mac: wifi.mac_address.replace(':', "-").to_uppercase(),
            signal_strength: wifi.signal_strength,
            age: wifi.age,
        }
    }
}

#[derive(Debug, Deserialize)]
struct YandexResponse {
    position: Option<Position>,
    error: Option<YandexFault>,
}

#[derive(Debug, Deserialize)]
struct Position {
    latitude: f64,
    longitude: f64,
    precision: f64,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YandexFault {
    #[serde(default)]
    message: String,
}

impl From<Position> for LocateResponse {
    fn from(position: Position) -> Self {
        Self {
            location: Location {
                lat: position.latitude,
                lng: position.longitude,
            },
            accuracy: position.precision,
            fallback: match position.kind.as_deref() {
                Some("ip") => Some("ipf".to_string()),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct YandexClient {
    client: Client,
    service_url: String,
    request_url: Url,
    api_key: String,
    user_agent: HeaderValue,
    settings: LocatorSettings,
}

impl YandexClient {
    pub fn new(service_url: &str, api_key: &str, settings: LocatorSettings) -> ClientResult<Self> {
        let request_url = parse_service_url(service_url)?;
        let client = build_http_client(&settings)?;
        let user_agent = user_agent_header(&settings)?;

        Ok(Self {
            client,
            service_url: service_url.to_string(),
            request_url,
            api_key: api_key.to_string(),
            user_agent,
            settings,
        })
    }

    pub(crate) fn build_document<'a>(&'a self, request: &LocateRequest) -> YandexRequest<'a> {
        YandexRequest {
            common: Common {
                version: API_VERSION,
                api_key: &self.api_key,
            },
            gsm_cells: request.cell_towers.iter().map(GsmCell::from).collect(),
            wifi_networks: request
                .wifi_access_points
                .iter()
                .map(WifiNetwork::from)
                .collect(),
        }
    }
}

#[async_trait]
impl Locator for YandexClient {
    fn dialect(&self) -> Dialect {
        Dialect::Yandex
    }

    fn service_url(&self) -> &str {
        &self.service_url
    }

    fn settings(&self) -> &LocatorSettings {
        &self.settings
    }

    async fn locate(&self, request: &LocateRequest) -> ClientResult<LocateResponse> {
        let document = serde_json::to_string(&self.build_document(request))?;
        let ip_address = request.ip_address.as_deref().filter(|ip| !ip.is_empty());

        debug!(
            "Sending Yandex geolocation request to {} ({} cells, {} access points)",
            self.service_url,
            request.cell_towers.len(),
            request.wifi_access_points.len()
        );

        let mut builder = self
            .client
            .post(self.request_url.clone())
            .header(USER_AGENT, self.user_agent.clone())
            .form(&[("json", document)]);
        if let Some(ip_address) = ip_address {
            builder = builder.header(X_FORWARDED_FOR, forwarded_for_header(ip_address)?);
        }

        let response = builder.send().await?;
        let reply: YandexResponse = read_json(response).await?;

        match reply.position {
            Some(position) => Ok(position.into()),
            None => {
                if let Some(fault) = reply.error {
                    warn!("Yandex reported an error: {}", fault.message);
                }
                Err(ClientError::NotFound)
            }
        }
    }
}
