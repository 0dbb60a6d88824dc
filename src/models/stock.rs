//! 股票数据模型
//!
//! 定义历史行情相关的数据结构

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::table::{fmt_num, Tabular};

/// 单日 K 线数据
///
/// 包含单日的 OHLCV 数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// 交易日期（交易所当地时区）
    pub date: NaiveDate,
    /// 开盘价
    pub open: f64,
    /// 最高价
    pub high: f64,
    /// 最低价
    pub low: f64,
    /// 收盘价
    pub close: f64,
    /// 成交量
    pub volume: u64,
}

impl Tabular for PriceBar {
    fn columns() -> Vec<&'static str> {
        vec!["Date", "Open", "High", "Low", "Close", "Volume"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.date.to_string(),
            fmt_num(self.open),
            fmt_num(self.high),
            fmt_num(self.low),
            fmt_num(self.close),
            self.volume.to_string(),
        ]
    }
}
