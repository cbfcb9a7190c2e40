use super::standard::StandardClient;
use super::traits::{Dialect, Locator};
use super::types::{ClientResult, LocateRequest, LocateResponse, LocatorSettings};
use super::yandex::YandexClient;
use async_trait::async_trait;

/// 统一的客户端枚举，包装不同请求格式的定位客户端
#[derive(Debug, Clone)]
pub enum UnifiedLocator {
    Standard(StandardClient),
    Yandex(YandexClient),
}

#[async_trait]
impl Locator for UnifiedLocator {
    fn dialect(&self) -> Dialect {
        match self {
            UnifiedLocator::Standard(client) => client.dialect(),
            UnifiedLocator::Yandex(client) => client.dialect(),
        }
    }

    fn service_url(&self) -> &str {
        match self {
            UnifiedLocator::Standard(client) => client.service_url(),
            UnifiedLocator::Yandex(client) => client.service_url(),
        }
    }

    fn settings(&self) -> &LocatorSettings {
        match self {
            UnifiedLocator::Standard(client) => client.settings(),
            UnifiedLocator::Yandex(client) => client.settings(),
        }
    }

    async fn locate(&self, request: &LocateRequest) -> ClientResult<LocateResponse> {
        match self {
            UnifiedLocator::Standard(client) => client.locate(request).await,
            UnifiedLocator::Yandex(client) => client.locate(request).await,
        }
    }
}

/// 客户端工厂
pub struct LocatorFactory;

impl LocatorFactory {
    /// 使用默认参数创建客户端
    pub fn new(service_url: &str, api_key: &str) -> ClientResult<UnifiedLocator> {
        Self::with_settings(service_url, api_key, LocatorSettings::default())
    }

    /// 根据服务地址推断请求格式并创建客户端
    pub fn with_settings(
        service_url: &str,
        api_key: &str,
        settings: LocatorSettings,
    ) -> ClientResult<UnifiedLocator> {
        let dialect = Dialect::from_service_url(service_url);
        Self::create_for_dialect(dialect, service_url, api_key, settings)
    }

    /// 按指定的请求格式创建客户端，不做地址推断
    pub fn create_for_dialect(
        dialect: Dialect,
        service_url: &str,
        api_key: &str,
        settings: LocatorSettings,
    ) -> ClientResult<UnifiedLocator> {
        match dialect {
            Dialect::Standard => {
                let client = StandardClient::new(service_url, api_key, settings)?;
                Ok(UnifiedLocator::Standard(client))
            }
            Dialect::Yandex => {
                let client = YandexClient::new(service_url, api_key, settings)?;
                Ok(UnifiedLocator::Yandex(client))
            }
        }
    }
}
