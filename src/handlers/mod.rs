pub mod api;
pub mod health;
pub mod pages;

use actix_web::web;

use crate::dashboard::Dashboard;
use crate::services::{
    Analyzer, DataProcessor, PatternAnalyzer, Processor, Scraper, SvgVisualizer, Visualizer,
    WebScraper,
};

/// 生产环境使用的看板
pub type AppDashboard = Dashboard<WebScraper, DataProcessor, PatternAnalyzer, SvgVisualizer>;

/// 注册全部路由
///
/// 处理器对协作者类型泛型，测试中可以注入内存实现
pub fn config<S, P, A, V>(cfg: &mut web::ServiceConfig)
where
    S: Scraper + 'static,
    P: Processor + 'static,
    A: Analyzer + 'static,
    V: Visualizer + 'static,
{
    cfg.service(
        web::scope("/api/v1")
            .configure(health::config)
            .configure(api::config::<S, P, A, V>),
    )
    .configure(pages::config::<S, P, A, V>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fake::{sample_history, sample_news, test_dashboard, FakeScraper};
    use actix_web::{http::StatusCode, test, App};

    /// 发送 GET 请求，返回状态码与响应体
    async fn get(scraper: FakeScraper, uri: &str) -> (StatusCode, String) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_dashboard(scraper)))
                .configure(config::<FakeScraper, DataProcessor, PatternAnalyzer, SvgVisualizer>),
        )
        .await;
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn with_history(days: usize) -> FakeScraper {
        FakeScraper {
            history: sample_history(days),
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn test_home_page() {
        let (status, html) = get(FakeScraper::default(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Welcome to Financial Market Analysis"));
        assert!(html.contains("class=\"active\">Home</a>"));
    }

    #[actix_web::test]
    async fn test_stock_analysis_page() {
        let (status, html) = get(with_history(40), "/stock-analysis?symbol=reliance&run=1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Data Retrieved Successfully!"));
        assert!(html.contains("RELIANCE Price Trend"));
        assert!(html.contains("<svg"));
        assert!(!html.contains("alert error"));
    }

    #[actix_web::test]
    async fn test_stock_analysis_page_without_run_only_shows_form() {
        let (status, html) = get(with_history(40), "/stock-analysis?symbol=TCS").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("value=\"TCS\""));
        assert!(!html.contains("<svg"));
        assert!(!html.contains("<table>"));
    }

    #[actix_web::test]
    async fn test_stock_analysis_page_empty_history() {
        let (status, html) = get(FakeScraper::default(), "/stock-analysis?symbol=NOSUCH&run=1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Failed to fetch data. Try a different symbol."));
        assert!(!html.contains("<svg"));
    }

    #[actix_web::test]
    async fn test_news_page_failure_renders_error_page() {
        let scraper = FakeScraper {
            fail: true,
            ..Default::default()
        };
        let (status, html) = get(scraper, "/news-sentiment?run=1").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(html.contains("Something went wrong: connection reset"));
        assert!(html.contains("class=\"active\">News Sentiment</a>"));
    }

    #[actix_web::test]
    async fn test_visualization_page() {
        let (status, html) = get(with_history(30), "/visualization?run=1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Correlation Heatmap"));
        assert!(html.contains(">Volume</text>"));
    }

    #[actix_web::test]
    async fn test_health() {
        let (status, body) = get(FakeScraper::default(), "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["status"], "healthy");
    }

    #[actix_web::test]
    async fn test_api_history() {
        let (status, body) = get(with_history(15), "/api/v1/stocks/RELIANCE/history").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["data"].as_array().unwrap().len(), 15);
        assert_eq!(json["data"][0]["date"], "2024-01-01");
    }

    #[actix_web::test]
    async fn test_api_history_not_found() {
        let (status, body) = get(FakeScraper::default(), "/api/v1/stocks/nosuch/history").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "No historical data for NOSUCH");
    }

    #[actix_web::test]
    async fn test_api_trends_and_correlations() {
        let (status, body) = get(with_history(30), "/api/v1/stocks/reliance/trends").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["data"]["symbol"], "RELIANCE");
        assert_eq!(json["data"]["data"].as_array().unwrap().len(), 30);

        let (status, body) = get(with_history(30), "/api/v1/stocks/RELIANCE/correlations").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["data"]["correlation_matrix"]["fields"].as_array().unwrap().len(), 5);
        assert_eq!(json["data"]["observations"], 30);
    }

    #[actix_web::test]
    async fn test_api_news_sentiment_count_is_capped() {
        let scraper = FakeScraper {
            news: sample_news(80),
            ..Default::default()
        };
        let (status, body) = get(scraper, "/api/v1/news/sentiment?count=100").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["data"]["data"].as_array().unwrap().len(), 50);
        assert_eq!(json["data"]["positive"], 25);
    }
}
