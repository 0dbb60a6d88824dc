//! 数据清洗
//!
//! 历史行情去重排序，新闻标题分词与词频统计

use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use super::Processor;
use crate::models::PriceBar;

/// 词云统计时忽略的常见词
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "from", "that", "this", "are", "was", "were", "will", "its",
    "has", "have", "had", "into", "over", "after", "amid", "ahead", "than", "but", "not", "you",
    "your", "our", "their", "they", "his", "her", "about", "what", "when", "why", "how", "who",
    "which", "says", "said", "may", "can", "could", "would", "should", "all", "more", "most",
    "also", "just", "out", "now", "new", "per", "cent", "via", "week", "today", "year",
];

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z][A-Za-z'-]*[A-Za-z]").unwrap())
}

/// 数据处理器
#[derive(Debug, Default, Clone)]
pub struct DataProcessor;

impl DataProcessor {
    pub fn new() -> Self {
        Self
    }

    /// 拆分为小写单词，保留全部单词
    pub fn words(&self, text: &str) -> Vec<String> {
        word_regex()
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }

    /// 拆分为小写单词，长度不足 3 的词与停用词被过滤
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.words(text)
            .into_iter()
            .filter(|w| w.len() >= 3 && !STOP_WORDS.contains(&w.as_str()))
            .collect()
    }

    /// 多段文本的词频，按次数降序、单词升序排列
    pub fn word_frequencies<'a, I>(&self, texts: I) -> Vec<(String, usize)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for text in texts {
            for word in self.tokenize(text) {
                *counts.entry(word).or_default() += 1;
            }
        }

        let mut freq: Vec<(String, usize)> = counts.into_iter().collect();
        freq.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        freq
    }

    /// 日收益率序列，长度为输入长度减一
    pub fn daily_returns(&self, bars: &[PriceBar]) -> Vec<f64> {
        bars.windows(2)
            .map(|w| (w[1].close - w[0].close) / w[0].close)
            .collect()
    }
}

impl Processor for DataProcessor {
    fn clean_history(&self, bars: Vec<PriceBar>) -> Vec<PriceBar> {
        let total = bars.len();

        // 同一日期保留最后一条
        let mut by_date = BTreeMap::new();
        for bar in bars {
            if bar.close > 0.0 && bar.high >= bar.low {
                by_date.insert(bar.date, bar);
            }
        }

        let cleaned: Vec<PriceBar> = by_date.into_values().collect();
        if cleaned.len() != total {
            log::debug!("清洗历史数据: {} -> {} 条", total, cleaned.len());
        }
        cleaned
    }
}
