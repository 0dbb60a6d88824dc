//! 测试用的内存抓取器与样例数据

use anyhow::{anyhow, Result};
use chrono::{Duration, NaiveDate};
use std::cell::RefCell;

use super::{DataProcessor, PatternAnalyzer, Scraper, SvgVisualizer};
use crate::config::AnalysisConfig;
use crate::dashboard::Dashboard;
use crate::models::{NewsItem, PriceBar};

pub type TestDashboard = Dashboard<FakeScraper, DataProcessor, PatternAnalyzer, SvgVisualizer>;

/// 使用短均线窗口（3/5）的看板
pub fn test_dashboard(scraper: FakeScraper) -> TestDashboard {
    let analyzer = PatternAnalyzer::new(AnalysisConfig {
        short_window: 3,
        long_window: 5,
        trend_threshold: 0.01,
    })
    .unwrap();
    Dashboard::new(scraper, DataProcessor::new(), analyzer, SvgVisualizer::new())
}

/// 内存抓取器，记录每次调用
#[derive(Default)]
pub struct FakeScraper {
    pub history: Vec<PriceBar>,
    pub news: Vec<NewsItem>,
    pub fail: bool,
    pub calls: RefCell<Vec<String>>,
}

impl Scraper for FakeScraper {
    async fn scrape_historical_data(&self, symbol: &str) -> Result<Vec<PriceBar>> {
        self.calls.borrow_mut().push(format!("history:{}", symbol));
        if self.fail {
            return Err(anyhow!("connection reset"));
        }
        Ok(self.history.clone())
    }

    async fn scrape_financial_news(&self, count: usize) -> Result<Vec<NewsItem>> {
        self.calls.borrow_mut().push(format!("news:{}", count));
        if self.fail {
            return Err(anyhow!("connection reset"));
        }
        Ok(self.news.iter().take(count).cloned().collect())
    }
}

/// 从 2024-01-01 起的连续日线
pub fn sample_history(days: usize) -> Vec<PriceBar> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    (0..days)
        .map(|i| {
            let close = 2500.0 + (i as f64 * 0.7).sin() * 40.0 + i as f64;
            PriceBar {
                date: start + Duration::days(i as i64),
                open: close - 5.0,
                high: close + 10.0,
                low: close - 12.0,
                close,
                volume: 1_000_000 + (i as u64 % 7) * 50_000,
            }
        })
        .collect()
}

/// 偶数条看多、奇数条看空的新闻
pub fn sample_news(n: usize) -> Vec<NewsItem> {
    (0..n)
        .map(|i| NewsItem {
            headline: if i % 2 == 0 {
                format!("Stocks surge as story {} lifts banks", i)
            } else {
                format!("Metals slump on weak demand {}", i)
            },
            link: format!("https://news.example.com/{}", i),
            source: "news.example.com".to_string(),
        })
        .collect()
}
