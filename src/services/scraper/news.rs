//! 财经新闻列表页面解析

use anyhow::{anyhow, Result};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

use crate::models::NewsItem;

/// 从新闻列表页面中按选择器提取标题
///
/// 链接相对页面地址解析为绝对地址，重复标题只保留第一次出现
pub fn parse_news_page(
    html: &str,
    page_url: &Url,
    selector: &str,
    count: usize,
) -> Result<Vec<NewsItem>> {
    let selector =
        Selector::parse(selector).map_err(|e| anyhow!("无效的 CSS 选择器 {}: {}", selector, e))?;
    let document = Html::parse_document(html);
    let source = page_url.host_str().unwrap_or_default().to_string();

    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for element in document.select(&selector) {
        if items.len() >= count {
            break;
        }

        let headline = element
            .text()
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ");
        if headline.is_empty() || !seen.insert(headline.clone()) {
            continue;
        }

        let link = element
            .value()
            .attr("href")
            .and_then(|href| page_url.join(href).ok())
            .map(|u| u.to_string())
            .unwrap_or_default();

        items.push(NewsItem {
            headline,
            link,
            source: source.clone(),
        });
    }

    Ok(items)
}
