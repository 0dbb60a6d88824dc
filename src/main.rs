//! 金融市场分析看板
//!
//! 提供个股趋势分析、财经新闻情绪分析、相关性热力图的交互式页面及 JSON 接口
//! 数据来源：Yahoo Finance 历史行情、财经新闻列表页面

mod config;     // 配置加载
mod dashboard;  // 看板控制器与页面渲染
mod handlers;   // HTTP 请求处理器
mod models;     // 数据模型定义
mod services;   // 抓取、清洗、分析、可视化

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use crate::config::AppConfig;
use crate::dashboard::Dashboard;
use crate::handlers::AppDashboard;
use crate::services::{DataProcessor, PatternAnalyzer, SvgVisualizer, WebScraper};

/// 应用程序入口
///
/// 构造协作者并注入看板，启动 HTTP 服务器
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let (config, load_message) = AppConfig::load();

    // 初始化日志系统，RUST_LOG 优先于配置文件
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));
    log::info!("{}", load_message);

    let scraper = WebScraper::new(&config.http, config.scraper.clone())?;
    let analyzer = PatternAnalyzer::new(config.analysis.clone())?;
    let dashboard: web::Data<AppDashboard> = web::Data::new(Dashboard::new(
        scraper,
        DataProcessor::new(),
        analyzer,
        SvgVisualizer::new(),
    ));

    let bind_addr = config.bind_addr();
    log::info!("启动金融市场分析看板，监听 {}", bind_addr);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default()) // 添加请求日志中间件
            .app_data(dashboard.clone())
            .configure(handlers::config::<WebScraper, DataProcessor, PatternAnalyzer, SvgVisualizer>)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(bind_addr)?.run().await?;
    Ok(())
}
