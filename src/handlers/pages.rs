//! 看板页面处理器
//!
//! - GET / - 首页
//! - GET /stock-analysis?symbol=&run= - 个股趋势分析
//! - GET /news-sentiment?run= - 新闻情绪分析
//! - GET /visualization?run= - 相关性热力图

use actix_web::{http::header::ContentType, web, HttpResponse};
use serde::Deserialize;

use crate::dashboard::render::{render_error_page, render_page};
use crate::dashboard::{Dashboard, ScreenRequest};
use crate::services::{Analyzer, Processor, Scraper, Visualizer};

/// 页面查询参数，`run` 非空且不为 0 表示点击了按钮
#[derive(Debug, Default, Deserialize)]
pub struct ScreenQuery {
    pub symbol: Option<String>,
    pub run: Option<String>,
}

impl ScreenQuery {
    fn triggered(&self) -> bool {
        self.run.as_deref().is_some_and(|v| !v.is_empty() && v != "0")
    }
}

async fn show<S, P, A, V>(dashboard: &Dashboard<S, P, A, V>, request: ScreenRequest) -> HttpResponse
where
    S: Scraper,
    P: Processor,
    A: Analyzer,
    V: Visualizer,
{
    let menu = request.menu();
    match dashboard.render(request).await {
        Ok(screen) => HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(render_page(&screen)),
        Err(e) => {
            log::error!("页面 {} 渲染失败: {:#}", menu.label(), e);
            HttpResponse::InternalServerError()
                .content_type(ContentType::html())
                .body(render_error_page(menu, &format!("{:#}", e)))
        }
    }
}

pub async fn home<S, P, A, V>(dashboard: web::Data<Dashboard<S, P, A, V>>) -> HttpResponse
where
    S: Scraper,
    P: Processor,
    A: Analyzer,
    V: Visualizer,
{
    show(dashboard.get_ref(), ScreenRequest::Home).await
}

pub async fn stock_analysis<S, P, A, V>(
    dashboard: web::Data<Dashboard<S, P, A, V>>,
    query: web::Query<ScreenQuery>,
) -> HttpResponse
where
    S: Scraper,
    P: Processor,
    A: Analyzer,
    V: Visualizer,
{
    let query = query.into_inner();
    let triggered = query.triggered();
    let request = ScreenRequest::StockAnalysis {
        symbol: query.symbol,
        triggered,
    };
    show(dashboard.get_ref(), request).await
}

pub async fn news_sentiment<S, P, A, V>(
    dashboard: web::Data<Dashboard<S, P, A, V>>,
    query: web::Query<ScreenQuery>,
) -> HttpResponse
where
    S: Scraper,
    P: Processor,
    A: Analyzer,
    V: Visualizer,
{
    let request = ScreenRequest::NewsSentiment {
        triggered: query.triggered(),
    };
    show(dashboard.get_ref(), request).await
}

pub async fn visualization<S, P, A, V>(
    dashboard: web::Data<Dashboard<S, P, A, V>>,
    query: web::Query<ScreenQuery>,
) -> HttpResponse
where
    S: Scraper,
    P: Processor,
    A: Analyzer,
    V: Visualizer,
{
    let request = ScreenRequest::Visualization {
        triggered: query.triggered(),
    };
    show(dashboard.get_ref(), request).await
}

pub fn config<S, P, A, V>(cfg: &mut web::ServiceConfig)
where
    S: Scraper + 'static,
    P: Processor + 'static,
    A: Analyzer + 'static,
    V: Visualizer + 'static,
{
    cfg.route("/", web::get().to(home::<S, P, A, V>))
        .route("/stock-analysis", web::get().to(stock_analysis::<S, P, A, V>))
        .route("/news-sentiment", web::get().to(news_sentiment::<S, P, A, V>))
        .route("/visualization", web::get().to(visualization::<S, P, A, V>));
}
