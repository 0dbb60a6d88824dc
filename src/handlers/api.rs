//! JSON 数据接口
//!
//! - GET /stocks/{symbol}/history - 清洗后的历史日线
//! - GET /stocks/{symbol}/trends - 趋势识别结果
//! - GET /stocks/{symbol}/correlations - OHLCV 相关系数矩阵
//! - GET /news/sentiment?count= - 新闻情绪打分

use actix_web::{web, HttpResponse, Result};
use serde::Serialize;

use crate::dashboard::{Dashboard, NEWS_COUNT};
use crate::models::{
    ApiResponse, CorrelationResult, NewsQuery, PriceBar, SentimentResult, TrendResult,
};
use crate::services::{Analyzer, Processor, Scraper, Visualizer};

/// 单次最多抓取的新闻条数
const MAX_NEWS_COUNT: usize = 50;

fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(data))
}

fn not_found<T: Serialize>(symbol: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<T>::error(format!(
        "No historical data for {}",
        symbol.trim().to_uppercase()
    )))
}

fn internal_error<T: Serialize>(e: anyhow::Error) -> HttpResponse {
    log::error!("接口处理失败: {:#}", e);
    HttpResponse::InternalServerError().json(ApiResponse::<T>::error(format!("{:#}", e)))
}

pub async fn get_history<S, P, A, V>(
    dashboard: web::Data<Dashboard<S, P, A, V>>,
    path: web::Path<String>,
) -> Result<HttpResponse>
where
    S: Scraper,
    P: Processor,
    A: Analyzer,
    V: Visualizer,
{
    let symbol = path.into_inner();

    match dashboard.history(&symbol).await {
        Ok(history) if history.is_empty() => Ok(not_found::<Vec<PriceBar>>(&symbol)),
        Ok(history) => Ok(ok(history)),
        Err(e) => Ok(internal_error::<Vec<PriceBar>>(e)),
    }
}

pub async fn get_trends<S, P, A, V>(
    dashboard: web::Data<Dashboard<S, P, A, V>>,
    path: web::Path<String>,
) -> Result<HttpResponse>
where
    S: Scraper,
    P: Processor,
    A: Analyzer,
    V: Visualizer,
{
    let symbol = path.into_inner();

    match dashboard.trends(&symbol).await {
        Ok(Some(trends)) => Ok(ok(trends)),
        Ok(None) => Ok(not_found::<TrendResult>(&symbol)),
        Err(e) => Ok(internal_error::<TrendResult>(e)),
    }
}

pub async fn get_correlations<S, P, A, V>(
    dashboard: web::Data<Dashboard<S, P, A, V>>,
    path: web::Path<String>,
) -> Result<HttpResponse>
where
    S: Scraper,
    P: Processor,
    A: Analyzer,
    V: Visualizer,
{
    let symbol = path.into_inner();

    match dashboard.correlations(&symbol).await {
        Ok(Some(correlations)) => Ok(ok(correlations)),
        Ok(None) => Ok(not_found::<CorrelationResult>(&symbol)),
        Err(e) => Ok(internal_error::<CorrelationResult>(e)),
    }
}

pub async fn get_news_sentiment<S, P, A, V>(
    dashboard: web::Data<Dashboard<S, P, A, V>>,
    query: web::Query<NewsQuery>,
) -> Result<HttpResponse>
where
    S: Scraper,
    P: Processor,
    A: Analyzer,
    V: Visualizer,
{
    let count = query.count.unwrap_or(NEWS_COUNT).clamp(1, MAX_NEWS_COUNT);

    match dashboard.sentiment(count).await {
        Ok(sentiment) => Ok(ok(sentiment)),
        Err(e) => Ok(internal_error::<SentimentResult>(e)),
    }
}

pub fn config<S, P, A, V>(cfg: &mut web::ServiceConfig)
where
    S: Scraper + 'static,
    P: Processor + 'static,
    A: Analyzer + 'static,
    V: Visualizer + 'static,
{
    cfg.service(
        web::scope("/stocks")
            .route("/{symbol}/history", web::get().to(get_history::<S, P, A, V>))
            .route("/{symbol}/trends", web::get().to(get_trends::<S, P, A, V>))
            .route(
                "/{symbol}/correlations",
                web::get().to(get_correlations::<S, P, A, V>),
            ),
    )
    .route("/news/sentiment", web::get().to(get_news_sentiment::<S, P, A, V>));
}
