use crate::client::{
    ClientResult, Dialect, LocatorFactory, LocatorSettings, UnifiedLocator, DEFAULT_USER_AGENT,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub settings: GlobalSettings,
    #[serde(default)]
    pub providers: HashMap<String, Provider>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GlobalSettings {
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// 不使用基于 IP 地址的定位
    #[serde(default)]
    pub ignore_ip_method: bool,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            request_timeout_seconds: default_request_timeout(),
            ignore_ip_method: false,
            user_agent: default_user_agent(),
        }
    }
}

impl GlobalSettings {
    pub fn locator_settings(&self) -> LocatorSettings {
        LocatorSettings {
            request_timeout: Duration::from_secs(self.request_timeout_seconds),
            ignore_ip_method: self.ignore_ip_method,
            user_agent: self.user_agent.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Provider {
    pub name: String,
    pub service_url: String,
    #[serde(default)]
    pub api_key: String,
    /// 未配置时根据 service_url 推断
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Provider {
    pub fn dialect(&self) -> Dialect {
        self.dialect
            .unwrap_or_else(|| Dialect::from_service_url(&self.service_url))
    }
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self.providers.is_empty() {
            anyhow::bail!("No providers configured");
        }

        if self.settings.request_timeout_seconds == 0 {
            anyhow::bail!("Invalid request_timeout_seconds: cannot be 0");
        }

        if self.settings.user_agent.trim().is_empty() {
            anyhow::bail!("user_agent cannot be empty");
        }

        for (provider_id, provider) in &self.providers {
            self.validate_provider_config(provider_id, provider)?;
        }

        Ok(())
    }

    fn validate_provider_config(&self, provider_id: &str, provider: &Provider) -> Result<()> {
        if provider.name.is_empty() {
            anyhow::bail!("Provider '{}' has empty name", provider_id);
        }

        if provider.service_url.is_empty() {
            anyhow::bail!("Provider '{}' has empty service_url", provider_id);
        }

        // 构造一次客户端来检查地址和请求头，不会发出网络请求
        if let Err(e) = self.build_locator(provider) {
            anyhow::bail!("Provider '{}' is invalid: {}", provider_id, e);
        }

        Ok(())
    }

    pub fn get_provider(&self, provider_id: &str) -> Option<&Provider> {
        self.providers.get(provider_id)
    }

    /// 已启用的 provider，按 id 排序
    pub fn enabled_providers(&self) -> Vec<(&String, &Provider)> {
        let mut providers: Vec<_> = self.providers.iter().filter(|(_, p)| p.enabled).collect();
        providers.sort_by(|a, b| a.0.cmp(b.0));
        providers
    }

    /// 为指定 provider 创建定位客户端
    pub fn create_locator(&self, provider_id: &str) -> Result<UnifiedLocator> {
        let provider = self
            .get_provider(provider_id)
            .ok_or_else(|| anyhow::anyhow!("Provider '{}' not found", provider_id))?;

        if !provider.enabled {
            anyhow::bail!("Provider '{}' is disabled", provider_id);
        }

        Ok(self.build_locator(provider)?)
    }

    fn build_locator(&self, provider: &Provider) -> ClientResult<UnifiedLocator> {
        LocatorFactory::create_for_dialect(
            provider.dialect(),
            &provider.service_url,
            &provider.api_key,
            self.settings.locator_settings(),
        )
    }
}
