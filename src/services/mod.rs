//! 业务逻辑服务模块
//!
//! 看板依赖的四类协作者：数据抓取、数据清洗、模式分析、可视化。
//! 看板只依赖这里的 trait，具体实现在 `main` 中构造后注入。

pub mod analyzer;   // 趋势、情绪、相关性分析
pub mod processor;  // 数据清洗与分词
pub mod scraper;    // 行情与新闻抓取
pub mod visualizer; // SVG 图表渲染

#[cfg(test)]
pub mod fake;

use anyhow::Result;

use crate::models::{
    CorrelationMatrix, CorrelationResult, Figure, NewsItem, PriceBar, ScoredNews,
    SentimentResult, TrendPoint, TrendResult,
};

pub use analyzer::PatternAnalyzer;
pub use processor::DataProcessor;
pub use scraper::WebScraper;
pub use visualizer::SvgVisualizer;

/// 数据抓取
#[allow(async_fn_in_trait)]
pub trait Scraper {
    /// 抓取历史日线，代码无效或上游无数据时返回空表
    async fn scrape_historical_data(&self, symbol: &str) -> Result<Vec<PriceBar>>;

    /// 抓取最新的 `count` 条财经新闻
    async fn scrape_financial_news(&self, count: usize) -> Result<Vec<NewsItem>>;
}

/// 数据清洗
pub trait Processor {
    /// 排序、去重并剔除异常行
    fn clean_history(&self, bars: Vec<PriceBar>) -> Vec<PriceBar>;
}

/// 模式分析
pub trait Analyzer {
    fn identify_trends(&self, bars: &[PriceBar], symbol: &str) -> Result<TrendResult>;

    fn analyze_sentiment(&self, news: &[NewsItem]) -> Result<SentimentResult>;

    fn analyze_correlations(&self, bars: &[PriceBar]) -> Result<CorrelationResult>;
}

/// 图表渲染
pub trait Visualizer {
    fn plot_stock_trends(&self, points: &[TrendPoint], title: &str) -> Result<Figure>;

    fn plot_sentiment_wordcloud(&self, scored: &[ScoredNews]) -> Result<Figure>;

    fn plot_correlation_heatmap(&self, matrix: &CorrelationMatrix) -> Result<Figure>;
}
