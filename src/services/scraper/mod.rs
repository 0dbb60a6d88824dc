//! 网页数据抓取
//!
//! - 历史行情：Yahoo Finance chart 接口（JSON）
//! - 财经新闻：新闻列表页面（HTML），按 CSS 选择器提取标题

mod news;
mod yahoo;

use anyhow::{anyhow, Result};
use regex::Regex;
use reqwest::{Client, StatusCode};
use std::borrow::Cow;
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

use super::Scraper;
use crate::config::{HttpConfig, ScraperConfig};
use crate::models::{NewsItem, PriceBar};

pub use news::parse_news_page;
pub use yahoo::parse_chart_response;

fn symbol_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Z0-9^=._-]{1,20}$").unwrap())
}

/// 规范化用户输入的股票代码，非法代码返回 `None`
pub fn normalize_symbol(symbol: &str) -> Option<String> {
    let symbol = symbol.trim().to_uppercase();
    symbol_regex().is_match(&symbol).then_some(symbol)
}

/// 按配置的字符集解码页面，未知字符集按 UTF-8 解码
pub fn decode_page<'a>(bytes: &'a [u8], label: &str) -> Cow<'a, str> {
    let encoding = encoding_rs::Encoding::for_label(label.trim().as_bytes()).unwrap_or_else(|| {
        log::warn!("未知字符集 {}，按 UTF-8 解码", label);
        encoding_rs::UTF_8
    });
    encoding.decode(bytes).0
}

/// 历史行情响应状态：成功返回 `true`，404 视为无数据返回 `false`，其余状态为错误
fn check_history_status(status: StatusCode) -> Result<bool> {
    if status == StatusCode::NOT_FOUND {
        return Ok(false);
    }
    if !status.is_success() {
        return Err(anyhow!("获取历史数据失败: {}", status));
    }
    Ok(true)
}

/// 网页抓取器
pub struct WebScraper {
    /// HTTP 客户端（带超时设置）
    client: Client,
    config: ScraperConfig,
}

impl WebScraper {
    pub fn new(http: &HttpConfig, config: ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(http.user_agent.as_str())
            .timeout(Duration::from_secs(http.timeout_secs))
            .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
            .gzip(true)
            .cookie_store(true)
            .build()?;

        Ok(Self { client, config })
    }

    /// 交易所代码：不带后缀、非指数、非外汇/期货代码时追加配置的后缀
    fn ticker(&self, symbol: &str) -> String {
        if symbol.contains('.') || symbol.contains('=') || symbol.starts_with('^') {
            symbol.to_string()
        } else {
            format!("{}{}", symbol, self.config.symbol_suffix)
        }
    }

    fn history_url(&self, symbol: &str) -> Result<Url> {
        let mut url = Url::parse(&self.config.history_url)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("无效的行情接口地址: {}", self.config.history_url))?
            .pop_if_empty()
            .push(&self.ticker(symbol));
        url.query_pairs_mut()
            .append_pair("range", &self.config.history_range)
            .append_pair("interval", &self.config.history_interval);
        Ok(url)
    }
}

impl Scraper for WebScraper {
    async fn scrape_historical_data(&self, symbol: &str) -> Result<Vec<PriceBar>> {
        let Some(symbol) = normalize_symbol(symbol) else {
            log::warn!("股票代码无效: {:?}", symbol);
            return Ok(Vec::new());
        };

        let url = self.history_url(&symbol)?;
        log::info!("📡 请求历史行情 URL: {}", url);

        let response = self.client.get(url).send().await?;

        if !check_history_status(response.status())? {
            log::warn!("股票代码 {} 无历史数据", symbol);
            return Ok(Vec::new());
        }

        let text = response.text().await?;
        let bars = parse_chart_response(&text)?;
        log::info!("股票 {} 获取到 {} 条日线", symbol, bars.len());
        Ok(bars)
    }

    async fn scrape_financial_news(&self, count: usize) -> Result<Vec<NewsItem>> {
        let page_url = Url::parse(&self.config.news_url)?;
        log::info!("📡 请求财经新闻 URL: {}", page_url);

        let response = self
            .client
            .get(page_url.clone())
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("获取新闻页面失败: {}", response.status()));
        }

        let bytes = response.bytes().await?;
        let html = decode_page(&bytes, &self.config.news_encoding);

        let items = parse_news_page(&html, &page_url, &self.config.news_selector, count)?;
        log::info!("获取到 {} 条新闻（请求 {} 条）", items.len(), count);
        Ok(items)
    }
}
