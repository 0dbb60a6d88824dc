//! 新闻数据模型

use serde::{Deserialize, Serialize};
use std::fmt;

use super::table::Tabular;

/// 抓取到的新闻条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    /// 标题
    pub headline: String,
    /// 原文链接（绝对地址）
    pub link: String,
    /// 来源站点
    pub source: String,
}

/// 情绪标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        };
        f.write_str(s)
    }
}

/// 打分后的新闻
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredNews {
    pub headline: String,
    pub link: String,
    pub source: String,
    /// 情绪得分，范围 [-1, 1]
    pub score: f64,
    pub label: SentimentLabel,
}

impl Tabular for ScoredNews {
    fn columns() -> Vec<&'static str> {
        vec!["Headline", "Source", "Score", "Sentiment"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.headline.clone(),
            self.source.clone(),
            format!("{:.3}", self.score),
            self.label.to_string(),
        ]
    }
}

/// 新闻情绪查询参数
#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    /// 新闻条数
    pub count: Option<usize>,
}
