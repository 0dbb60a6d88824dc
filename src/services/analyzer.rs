//! 模式分析
//!
//! - 趋势识别：短期/长期简单移动平均线交叉
//! - 情绪分析：金融词典打分
//! - 相关性分析：OHLCV 各字段两两皮尔逊相关系数

use anyhow::{anyhow, Result};

use super::processor::DataProcessor;
use super::Analyzer;
use crate::config::AnalysisConfig;
use crate::models::{
    CorrelationMatrix, CorrelationResult, NewsItem, PriceBar, ScoredNews, SentimentLabel,
    SentimentResult, TrendDirection, TrendPoint, TrendResult, TrendSummary,
};

/// 看多词汇
const POSITIVE_WORDS: &[&str] = &[
    "gain", "gains", "gained", "rise", "rises", "rising", "rose", "surge", "surges", "surged",
    "rally", "rallies", "rallied", "jump", "jumps", "jumped", "soar", "soars", "soared", "climb",
    "climbs", "climbed", "record", "profit", "profits", "beat", "beats", "growth", "grow", "grows",
    "strong", "stronger", "bullish", "upgrade", "upgrades", "upgraded", "outperform", "boost",
    "boosts", "recover", "recovers", "recovery", "rebound", "rebounds", "positive", "optimism",
    "optimistic", "buy", "higher", "high", "highs", "win", "wins", "expands", "expansion",
    "dividend", "approval", "approves", "robust", "steady", "upbeat",
];

/// 看空词汇
const NEGATIVE_WORDS: &[&str] = &[
    "fall", "falls", "fell", "falling", "drop", "drops", "dropped", "decline", "declines",
    "declined", "plunge", "plunges", "plunged", "slump", "slumps", "slumped", "slip", "slips",
    "slipped", "tumble", "tumbles", "tumbled", "crash", "crashes", "loss", "losses", "lose",
    "loses", "miss", "misses", "missed", "weak", "weaker", "weakness", "bearish", "downgrade",
    "downgrades", "downgraded", "underperform", "cut", "cuts", "fear", "fears", "concern",
    "concerns", "risk", "risks", "sell", "selloff", "lower", "low", "lows", "slowdown",
    "inflation", "fraud", "default", "debt", "warning", "warns", "volatile", "pressure",
];

/// 否定词，翻转其后第一个带情绪的词
const NEGATORS: &[&str] = &["not", "no", "never", "without"];

/// 得分超过该阈值判为正面，低于其相反数判为负面
const LABEL_THRESHOLD: f64 = 0.05;

/// 模式分析器
pub struct PatternAnalyzer {
    config: AnalysisConfig,
    processor: DataProcessor,
}

impl PatternAnalyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        if config.short_window == 0 || config.short_window >= config.long_window {
            return Err(anyhow!(
                "均线窗口配置无效: short_window={} long_window={}",
                config.short_window,
                config.long_window
            ));
        }
        Ok(Self {
            config,
            processor: DataProcessor::new(),
        })
    }

    /// 对单条文本打分，范围 [-1, 1]
    pub fn score_text(&self, text: &str) -> f64 {
        let mut positive = 0u32;
        let mut negative = 0u32;
        let mut negate = false;

        for word in self.processor.words(text) {
            let word = word.as_str();
            if NEGATORS.contains(&word) {
                negate = true;
                continue;
            }

            let polarity = if POSITIVE_WORDS.contains(&word) {
                1
            } else if NEGATIVE_WORDS.contains(&word) {
                -1
            } else {
                continue;
            };

            match (polarity, negate) {
                (1, false) | (-1, true) => positive += 1,
                _ => negative += 1,
            }
            negate = false;
        }

        let total = positive + negative;
        if total == 0 {
            0.0
        } else {
            (positive as f64 - negative as f64) / total as f64
        }
    }

    pub fn label(score: f64) -> SentimentLabel {
        if score > LABEL_THRESHOLD {
            SentimentLabel::Positive
        } else if score < -LABEL_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }

    /// 单词极性：1 看多，-1 看空，0 中性
    pub fn word_polarity(word: &str) -> i8 {
        if POSITIVE_WORDS.contains(&word) {
            1
        } else if NEGATIVE_WORDS.contains(&word) {
            -1
        } else {
            0
        }
    }

    fn classify(&self, short: f64, long: f64) -> TrendDirection {
        let threshold = self.config.trend_threshold;
        if short > long * (1.0 + threshold) {
            TrendDirection::Uptrend
        } else if short < long * (1.0 - threshold) {
            TrendDirection::Downtrend
        } else {
            TrendDirection::Sideways
        }
    }
}

/// 简单移动平均，前 `window - 1` 个位置为空
pub fn simple_moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    let mut sum: f64 = values[..window].iter().sum();
    out[window - 1] = Some(sum / window as f64);
    for i in window..values.len() {
        sum += values[i] - values[i - window];
        out[i] = Some(sum / window as f64);
    }
    out
}

/// 皮尔逊相关系数，样本不足或任一序列方差为零时返回 `None`
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }

    let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs[..n].iter().zip(&ys[..n]) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(var.sqrt())
}

impl Analyzer for PatternAnalyzer {
    fn identify_trends(&self, bars: &[PriceBar], symbol: &str) -> Result<TrendResult> {
        let first = bars.first().ok_or_else(|| anyhow!("{} 没有可分析的历史数据", symbol))?;
        let last = bars.last().unwrap_or(first);

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let short = simple_moving_average(&closes, self.config.short_window);
        let long = simple_moving_average(&closes, self.config.long_window);

        let data: Vec<TrendPoint> = bars
            .iter()
            .zip(short.iter().zip(&long))
            .map(|(bar, (&sma_short, &sma_long))| {
                let (trend, strength) = match (sma_short, sma_long) {
                    (Some(s), Some(l)) if l != 0.0 => (self.classify(s, l), Some((s - l) / l)),
                    _ => (TrendDirection::Insufficient, None),
                };
                TrendPoint {
                    date: bar.date,
                    close: bar.close,
                    sma_short,
                    sma_long,
                    trend,
                    strength,
                }
            })
            .collect();

        let summary = TrendSummary {
            latest_trend: data.last().map(|p| p.trend).unwrap_or(TrendDirection::Insufficient),
            change_percent: (last.close - first.close) / first.close * 100.0,
            period_high: bars.iter().map(|b| b.high).fold(f64::MIN, f64::max),
            period_low: bars.iter().map(|b| b.low).fold(f64::MAX, f64::min),
            volatility_percent: std_dev(&self.processor.daily_returns(bars)).map(|v| v * 100.0),
        };

        log::info!(
            "{} 趋势识别完成: {} 个点，最新趋势 {}",
            symbol,
            data.len(),
            summary.latest_trend
        );

        Ok(TrendResult {
            symbol: symbol.to_string(),
            data,
            summary,
        })
    }

    fn analyze_sentiment(&self, news: &[NewsItem]) -> Result<SentimentResult> {
        let data: Vec<ScoredNews> = news
            .iter()
            .map(|item| {
                let score = self.score_text(&item.headline);
                ScoredNews {
                    headline: item.headline.clone(),
                    link: item.link.clone(),
                    source: item.source.clone(),
                    score,
                    label: Self::label(score),
                }
            })
            .collect();

        let count = |label| data.iter().filter(|n| n.label == label).count();
        let average_score = if data.is_empty() {
            0.0
        } else {
            data.iter().map(|n| n.score).sum::<f64>() / data.len() as f64
        };

        Ok(SentimentResult {
            positive: count(SentimentLabel::Positive),
            neutral: count(SentimentLabel::Neutral),
            negative: count(SentimentLabel::Negative),
            average_score,
            data,
        })
    }

    fn analyze_correlations(&self, bars: &[PriceBar]) -> Result<CorrelationResult> {
        let columns: Vec<(&str, Vec<f64>)> = vec![
            ("Open", bars.iter().map(|b| b.open).collect()),
            ("High", bars.iter().map(|b| b.high).collect()),
            ("Low", bars.iter().map(|b| b.low).collect()),
            ("Close", bars.iter().map(|b| b.close).collect()),
            ("Volume", bars.iter().map(|b| b.volume as f64).collect()),
        ];

        let values = columns
            .iter()
            .map(|(_, xs)| columns.iter().map(|(_, ys)| pearson(xs, ys)).collect())
            .collect();

        Ok(CorrelationResult {
            correlation_matrix: CorrelationMatrix {
                fields: columns.iter().map(|(name, _)| name.to_string()).collect(),
                values,
            },
            observations: bars.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn analyzer() -> PatternAnalyzer {
        PatternAnalyzer::new(AnalysisConfig {
            short_window: 3,
            long_window: 5,
            trend_threshold: 0.01,
        })
        .unwrap()
    }

    fn bars(closes: &[f64]) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceBar {
                date: start + Duration::days(i as i64),
                open: c - 0.5,
                high: c + 1.0,
                low: c - 1.0,
                close: c,
                volume: 1000 + i as u64 * 10,
            })
            .collect()
    }

    #[test]
    fn test_invalid_windows_rejected() {
        let config = AnalysisConfig {
            short_window: 50,
            long_window: 20,
            trend_threshold: 0.01,
        };
        assert!(PatternAnalyzer::new(config).is_err());
    }

    #[test]
    fn test_simple_moving_average() {
        let sma = simple_moving_average(&[1.0, 2.0, 3.0, 4.0], 2);
        assert_eq!(sma, vec![None, Some(1.5), Some(2.5), Some(3.5)]);
        assert_eq!(simple_moving_average(&[1.0], 2), vec![None]);
    }

    #[test]
    fn test_identify_uptrend() {
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64 * 5.0).collect();
        let result = analyzer().identify_trends(&bars(&closes), "TEST").unwrap();

        assert_eq!(result.symbol, "TEST");
        assert_eq!(result.data.len(), 10);
        assert_eq!(result.data[3].trend, TrendDirection::Insufficient);
        assert_eq!(result.data[4].trend, TrendDirection::Uptrend);
        assert_eq!(result.summary.latest_trend, TrendDirection::Uptrend);
        assert!((result.summary.change_percent - 45.0).abs() < 1e-9);
        assert_eq!(result.summary.period_high, 146.0);
        assert_eq!(result.summary.period_low, 99.0);
        assert!(result.summary.volatility_percent.is_some());
    }

    #[test]
    fn test_identify_downtrend_and_sideways() {
        let falling: Vec<f64> = (0..8).map(|i| 200.0 - i as f64 * 10.0).collect();
        let result = analyzer().identify_trends(&bars(&falling), "DOWN").unwrap();
        assert_eq!(result.summary.latest_trend, TrendDirection::Downtrend);
        assert!(result.data.last().unwrap().strength.unwrap() < 0.0);

        let flat = vec![100.0; 8];
        let result = analyzer().identify_trends(&bars(&flat), "FLAT").unwrap();
        assert_eq!(result.summary.latest_trend, TrendDirection::Sideways);
    }

    #[test]
    fn test_identify_trends_requires_data() {
        assert!(analyzer().identify_trends(&[], "NONE").is_err());
    }

    #[test]
    fn test_score_text() {
        let a = analyzer();
        assert_eq!(a.score_text("Sensex surges to record high"), 1.0);
        assert_eq!(a.score_text("Rupee slumps amid inflation fears"), -1.0);
        assert_eq!(a.score_text("Markets gain but metals fall"), 0.0);
        assert_eq!(a.score_text("RBI keeps repo rate unchanged"), 0.0);
        assert_eq!(a.score_text("Investors not optimistic"), -1.0);
        assert_eq!(a.score_text("No fear in the market"), 1.0);
        // 仅 not/no/never/without 触发否定
        assert_eq!(a.score_text("Stocks hardly gain"), 1.0);
        assert_eq!(a.score_text("Rally without gains"), 0.0);
    }

    #[test]
    fn test_analyze_sentiment() {
        let news: Vec<NewsItem> = [
            "Nifty rallies on strong earnings",
            "Bank stocks tumble on weak outlook",
            "Board meeting scheduled on Friday",
        ]
        .iter()
        .map(|h| NewsItem {
            headline: h.to_string(),
            link: String::new(),
            source: "test".to_string(),
        })
        .collect();

        let result = analyzer().analyze_sentiment(&news).unwrap();
        assert_eq!(result.data.len(), 3);
        assert_eq!(result.data[0].label, SentimentLabel::Positive);
        assert_eq!(result.data[1].label, SentimentLabel::Negative);
        assert_eq!(result.data[2].label, SentimentLabel::Neutral);
        assert_eq!((result.positive, result.neutral, result.negative), (1, 1, 1));
        assert!(result.average_score.abs() < 1e-12);
    }

    #[test]
    fn test_analyze_sentiment_empty() {
        let result = analyzer().analyze_sentiment(&[]).unwrap();
        assert!(result.data.is_empty());
        assert_eq!(result.average_score, 0.0);
    }

    #[test]
    fn test_pearson() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        assert!((pearson(&xs, &[2.0, 4.0, 6.0, 8.0]).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&xs, &[8.0, 6.0, 4.0, 2.0]).unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(pearson(&xs, &[5.0; 4]), None);
        assert_eq!(pearson(&[1.0], &[1.0]), None);
    }

    #[test]
    fn test_analyze_correlations() {
        let closes: Vec<f64> = (0..6).map(|i| 100.0 + i as f64).collect();
        let result = analyzer().analyze_correlations(&bars(&closes)).unwrap();
        let matrix = &result.correlation_matrix;

        assert_eq!(result.observations, 6);
        assert_eq!(matrix.fields, vec!["Open", "High", "Low", "Close", "Volume"]);
        assert_eq!(matrix.len(), 5);
        for i in 0..5 {
            assert_eq!(matrix.values[i].len(), 5);
            assert!((matrix.values[i][i].unwrap() - 1.0).abs() < 1e-12);
        }
        assert!((matrix.values[3][4].unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(matrix.values[3][4], matrix.values[4][3]);
    }

    #[test]
    fn test_correlations_single_row_undefined() {
        let result = analyzer().analyze_correlations(&bars(&[100.0])).unwrap();
        assert!(result
            .correlation_matrix
            .values
            .iter()
            .flatten()
            .all(Option::is_none));
    }
}
