//! 看板控制器
//!
//! 每个菜单页面一个处理函数：调用协作者，把结果作为组件推送到页面。
//! 请求之间不保留任何状态。

use anyhow::Result;

use super::{Form, Menu, Screen, ScreenRequest, TextInput, Widget};
use crate::models::{CorrelationResult, PriceBar, SentimentResult, Table, TrendResult};
use crate::services::{Analyzer, Processor, Scraper, Visualizer};

/// 新闻情绪页每次抓取的新闻条数
pub const NEWS_COUNT: usize = 10;
/// 相关性热力图固定使用的股票
pub const HEATMAP_SYMBOL: &str = "RELIANCE";

/// 原始数据预览行数
const PREVIEW_ROWS: usize = 10;
/// 情绪表格展示行数
const SENTIMENT_ROWS: usize = 5;

pub const FETCH_FAILED: &str = "Failed to fetch data. Try a different symbol.";
pub const SYMBOL_REQUIRED: &str = "Please enter a stock symbol.";

/// 看板控制器，协作者在构造时注入
pub struct Dashboard<S, P, A, V> {
    scraper: S,
    processor: P,
    analyzer: A,
    visualizer: V,
}

impl<S, P, A, V> Dashboard<S, P, A, V>
where
    S: Scraper,
    P: Processor,
    A: Analyzer,
    V: Visualizer,
{
    pub fn new(scraper: S, processor: P, analyzer: A, visualizer: V) -> Self {
        Self {
            scraper,
            processor,
            analyzer,
            visualizer,
        }
    }

    /// 按菜单分发到对应页面
    pub async fn render(&self, request: ScreenRequest) -> Result<Screen> {
        match request {
            ScreenRequest::Home => Ok(self.home()),
            ScreenRequest::StockAnalysis { symbol, triggered } => {
                self.stock_analysis(symbol.as_deref().unwrap_or_default(), triggered)
                    .await
            }
            ScreenRequest::NewsSentiment { triggered } => self.news_sentiment(triggered).await,
            ScreenRequest::Visualization { triggered } => self.visualization(triggered).await,
        }
    }

    pub fn home(&self) -> Screen {
        let mut screen = Screen::new(Menu::Home);
        screen.push(Widget::Subheader(
            "Welcome to Financial Market Analysis".to_string(),
        ));
        screen.push(Widget::Text(
            "This platform allows you to analyze stock trends, sentiment, and correlations interactively."
                .to_string(),
        ));
        screen
    }

    pub async fn stock_analysis(&self, symbol: &str, triggered: bool) -> Result<Screen> {
        let symbol = symbol.trim();
        let mut screen = Screen::new(Menu::StockAnalysis);
        screen.push(Widget::Form(Form {
            action: Menu::StockAnalysis.path(),
            input: Some(TextInput {
                name: "symbol".to_string(),
                label: "Enter Stock Symbol (e.g., RELIANCE)".to_string(),
                value: symbol.to_string(),
            }),
            button: "Scrape Data".to_string(),
            spinner: "Fetching stock data...",
        }));

        if !triggered {
            return Ok(screen);
        }
        if symbol.is_empty() {
            screen.push(Widget::Warning(SYMBOL_REQUIRED.to_string()));
            return Ok(screen);
        }

        let symbol = symbol.to_uppercase();
        let history = self.scraper.scrape_historical_data(&symbol).await?;
        if history.is_empty() {
            log::warn!("{} 历史数据为空", symbol);
            screen.push(Widget::Error(FETCH_FAILED.to_string()));
            return Ok(screen);
        }

        screen.push(Widget::Success("Data Retrieved Successfully!".to_string()));
        screen.push(Widget::Table(Table::tail(&history, PREVIEW_ROWS)));

        let cleaned = self.processor.clean_history(history);
        let trend = self.analyzer.identify_trends(&cleaned, &symbol)?;
        let summary = &trend.summary;
        let mut text = format!(
            "Latest trend: {} | Change over period: {:+.2}% | High: {:.2} | Low: {:.2}",
            summary.latest_trend, summary.change_percent, summary.period_high, summary.period_low
        );
        if let Some(vol) = summary.volatility_percent {
            text.push_str(&format!(" | Daily volatility: {:.2}%", vol));
        }
        screen.push(Widget::Text(text));

        let figure = self
            .visualizer
            .plot_stock_trends(&trend.data, &format!("{} Price Trend", symbol))?;
        screen.push(Widget::Figure(figure));

        Ok(screen)
    }

    pub async fn news_sentiment(&self, triggered: bool) -> Result<Screen> {
        let mut screen = Screen::new(Menu::NewsSentiment);
        screen.push(Widget::Form(Form {
            action: Menu::NewsSentiment.path(),
            input: None,
            button: "Analyze Sentiment".to_string(),
            spinner: "Analyzing financial news...",
        }));

        if !triggered {
            return Ok(screen);
        }

        let news = self.scraper.scrape_financial_news(NEWS_COUNT).await?;
        let sentiment = self.analyzer.analyze_sentiment(&news)?;

        screen.push(Widget::Text(format!(
            "Average sentiment: {:+.3} ({} positive / {} neutral / {} negative)",
            sentiment.average_score, sentiment.positive, sentiment.neutral, sentiment.negative
        )));
        screen.push(Widget::Table(Table::head(&sentiment.data, SENTIMENT_ROWS)));

        let figure = self.visualizer.plot_sentiment_wordcloud(&sentiment.data)?;
        screen.push(Widget::Figure(figure));

        Ok(screen)
    }

    pub async fn visualization(&self, triggered: bool) -> Result<Screen> {
        let mut screen = Screen::new(Menu::Visualization);
        screen.push(Widget::Subheader("Data Visualization".to_string()));
        screen.push(Widget::Form(Form {
            action: Menu::Visualization.path(),
            input: None,
            button: "Show Correlation Heatmap".to_string(),
            spinner: "Computing correlations...",
        }));

        if !triggered {
            return Ok(screen);
        }

        let history = self.scraper.scrape_historical_data(HEATMAP_SYMBOL).await?;
        let cleaned = self.processor.clean_history(history);
        let correlations = self.analyzer.analyze_correlations(&cleaned)?;

        let figure = self
            .visualizer
            .plot_correlation_heatmap(&correlations.correlation_matrix)?;
        screen.push(Widget::Figure(figure));

        Ok(screen)
    }

    // ==================== JSON 接口 ====================

    /// 清洗后的历史数据，上游无数据时返回空表
    pub async fn history(&self, symbol: &str) -> Result<Vec<PriceBar>> {
        let history = self.scraper.scrape_historical_data(symbol).await?;
        Ok(self.processor.clean_history(history))
    }

    /// 趋势识别，无数据时返回 `None`
    pub async fn trends(&self, symbol: &str) -> Result<Option<TrendResult>> {
        let history = self.history(symbol).await?;
        if history.is_empty() {
            return Ok(None);
        }
        let symbol = symbol.trim().to_uppercase();
        self.analyzer.identify_trends(&history, &symbol).map(Some)
    }

    /// 相关性分析，无数据时返回 `None`
    pub async fn correlations(&self, symbol: &str) -> Result<Option<CorrelationResult>> {
        let history = self.history(symbol).await?;
        if history.is_empty() {
            return Ok(None);
        }
        self.analyzer.analyze_correlations(&history).map(Some)
    }

    pub async fn sentiment(&self, count: usize) -> Result<SentimentResult> {
        let news = self.scraper.scrape_financial_news(count).await?;
        self.analyzer.analyze_sentiment(&news)
    }
}
