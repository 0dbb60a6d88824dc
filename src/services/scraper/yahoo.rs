//! Yahoo Finance chart 接口解析
//!
//! 响应格式:
//! `{"chart":{"result":[{"meta":{...},"timestamp":[...],"indicators":{"quote":[{"open":[...],...}]}}],"error":null}}`

use anyhow::{anyhow, Result};
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Deserialize;

use crate::models::PriceBar;

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartResult {
    meta: Option<ChartMeta>,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    exchange_timezone_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

/// 解析 chart 接口响应为日线列表
///
/// 上游返回 `chart.error` 或无结果时返回空表；任一 OHLC 缺失的行被跳过
pub fn parse_chart_response(text: &str) -> Result<Vec<PriceBar>> {
    let envelope: ChartEnvelope =
        serde_json::from_str(text).map_err(|e| anyhow!("解析历史数据失败: {}", e))?;

    if let Some(err) = envelope.chart.error {
        log::warn!(
            "行情接口返回错误: {} {}",
            err.code.unwrap_or_default(),
            err.description.unwrap_or_default()
        );
        return Ok(Vec::new());
    }

    let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };

    let tz: Tz = result
        .meta
        .and_then(|m| m.exchange_timezone_name)
        .and_then(|name| name.parse().ok())
        .unwrap_or(Tz::UTC);

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let mut bars = Vec::with_capacity(result.timestamp.len());

    for (i, ts) in result.timestamp.iter().enumerate() {
        let field = |values: &[Option<f64>]| values.get(i).copied().flatten();
        let (Some(open), Some(high), Some(low), Some(close)) = (
            field(&quote.open),
            field(&quote.high),
            field(&quote.low),
            field(&quote.close),
        ) else {
            continue;
        };
        let Some(datetime) = DateTime::from_timestamp(*ts, 0) else {
            continue;
        };

        bars.push(PriceBar {
            date: datetime.with_timezone(&tz).date_naive(),
            open,
            high,
            low,
            close,
            volume: quote.volume.get(i).copied().flatten().unwrap_or(0),
        });
    }

    Ok(bars)
}
