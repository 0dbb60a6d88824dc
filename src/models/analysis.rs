//! 分析结果模型
//!
//! 趋势识别、情绪分析、相关性分析的输出结构

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::news::ScoredNews;

/// 趋势方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Uptrend,
    Downtrend,
    Sideways,
    /// 数据不足以计算两条均线
    Insufficient,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrendDirection::Uptrend => "Uptrend",
            TrendDirection::Downtrend => "Downtrend",
            TrendDirection::Sideways => "Sideways",
            TrendDirection::Insufficient => "n/a",
        };
        f.write_str(s)
    }
}

/// 带趋势标注的单个时间点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub close: f64,
    pub sma_short: Option<f64>,
    pub sma_long: Option<f64>,
    pub trend: TrendDirection,
    /// 短期均线相对长期均线的偏离比例
    pub strength: Option<f64>,
}

/// 区间汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    /// 最新一个交易日的趋势
    pub latest_trend: TrendDirection,
    /// 区间首尾收盘价涨跌幅（百分比）
    pub change_percent: f64,
    pub period_high: f64,
    pub period_low: f64,
    /// 日收益率标准差（百分比），少于两个收益率样本时为空
    pub volatility_percent: Option<f64>,
}

/// 趋势识别结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub symbol: String,
    pub data: Vec<TrendPoint>,
    pub summary: TrendSummary,
}

/// 情绪分析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub data: Vec<ScoredNews>,
    pub average_score: f64,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

/// 相关系数矩阵
///
/// `values[i][j]` 为 `fields[i]` 与 `fields[j]` 的皮尔逊相关系数，
/// 方差为零或样本不足时为 `None`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub fields: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// 相关性分析结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub correlation_matrix: CorrelationMatrix,
    /// 参与计算的样本数
    pub observations: usize,
}
