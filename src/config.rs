//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，缺省字段使用默认值

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// HTTP 客户端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 连接超时时间（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// 抓取时使用的 User-Agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// 历史行情接口（Yahoo Finance chart API）
    #[serde(default = "default_history_url")]
    pub history_url: String,
    /// 历史数据区间，如 1y、6mo
    #[serde(default = "default_history_range")]
    pub history_range: String,
    /// K线周期，如 1d
    #[serde(default = "default_history_interval")]
    pub history_interval: String,
    /// 代码后缀（.NS 为印度国家证券交易所），代码自带后缀时不追加
    #[serde(default = "default_symbol_suffix")]
    pub symbol_suffix: String,
    /// 财经新闻列表页面
    #[serde(default = "default_news_url")]
    pub news_url: String,
    /// 新闻标题链接的 CSS 选择器
    #[serde(default = "default_news_selector")]
    pub news_selector: String,
    /// 新闻页面字符集
    #[serde(default = "default_news_encoding")]
    pub news_encoding: String,
}

/// 分析参数配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// 短期均线窗口
    #[serde(default = "default_short_window")]
    pub short_window: usize,
    /// 长期均线窗口
    #[serde(default = "default_long_window")]
    pub long_window: usize,
    /// 判定趋势的均线偏离阈值（比例）
    #[serde(default = "default_trend_threshold")]
    pub trend_threshold: f64,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_timeout() -> u64 { 30 }
fn default_connect_timeout() -> u64 { 10 }
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}
fn default_log_level() -> String { "info".to_string() }
fn default_history_url() -> String {
    "https://query1.finance.yahoo.com/v8/finance/chart".to_string()
}
fn default_history_range() -> String { "1y".to_string() }
fn default_history_interval() -> String { "1d".to_string() }
fn default_symbol_suffix() -> String { ".NS".to_string() }
fn default_news_url() -> String {
    "https://economictimes.indiatimes.com/markets/stocks/news".to_string()
}
fn default_news_selector() -> String { "div.eachStory h3 a".to_string() }
fn default_news_encoding() -> String { "utf-8".to_string() }
fn default_short_window() -> usize { 20 }
fn default_long_window() -> usize { 50 }
fn default_trend_threshold() -> f64 { 0.01 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            history_url: default_history_url(),
            history_range: default_history_range(),
            history_interval: default_history_interval(),
            symbol_suffix: default_symbol_suffix(),
            news_url: default_news_url(),
            news_selector: default_news_selector(),
            news_encoding: default_news_encoding(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            short_window: default_short_window(),
            long_window: default_long_window(),
            trend_threshold: default_trend_threshold(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置，优先从文件，失败则使用默认值
    ///
    /// 此时日志系统尚未初始化，加载结果以消息形式返回，由调用方在初始化日志后输出
    pub fn load() -> (Self, String) {
        let config_paths = ["config.json", "config/config.json"];

        for path in config_paths {
            if Path::new(path).exists() {
                match Self::from_file(path) {
                    Ok(config) => return (config, format!("从 {} 加载配置成功", path)),
                    Err(e) => {
                        return (Self::default(), format!("加载配置文件 {} 失败: {}，使用默认配置", path, e));
                    }
                }
            }
        }

        (Self::default(), "未找到配置文件，使用默认配置".to_string())
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
