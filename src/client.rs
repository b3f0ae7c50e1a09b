// src/client.rs

use crate::{config::AppConfig, error::*};
use log::debug;
use reqwest::Response;
use std::sync::Arc;
use url::Url;

/// 对 `reqwest::Client` 的轻量封装：统一 UA、超时与状态码检查。
/// 每个请求只尝试一次，不做重试。
#[derive(Clone)]
pub struct HttpClient {
    pub client: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.max_workers.unwrap_or(32));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client })
    }

    /// 发起 GET 请求，非 2xx 状态码视为错误。
    pub async fn get(&self, url: Url) -> AppResult<Response> {
        debug!("GET {}", url);
        let res = self.client.get(url.clone()).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(AppError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }
        Ok(res)
    }

    pub async fn fetch_text(&self, url: Url) -> AppResult<String> {
        Ok(self.get(url).await?.text().await?)
    }
}
