//! SVG 图表渲染
//!
//! 趋势折线图、新闻词云、相关系数热力图，输出独立的 SVG 文档

use anyhow::{anyhow, Result};

use super::analyzer::PatternAnalyzer;
use super::processor::DataProcessor;
use super::Visualizer;
use crate::models::{CorrelationMatrix, Figure, ScoredNews, TrendPoint};

const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 420.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 50.0;

const CLOSE_COLOR: &str = "#1f77b4";
const SHORT_COLOR: &str = "#ff7f0e";
const LONG_COLOR: &str = "#2ca02c";

/// 词云最多展示的单词数
const WORDCLOUD_WORDS: usize = 40;
const HEATMAP_CELL: f64 = 90.0;

/// 转义 XML/HTML 文本
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// SVG 可视化器
#[derive(Debug, Default, Clone)]
pub struct SvgVisualizer {
    processor: DataProcessor,
}

impl SvgVisualizer {
    pub fn new() -> Self {
        Self {
            processor: DataProcessor::new(),
        }
    }
}

fn svg_open(out: &mut String, width: f64, height: f64) {
    out.push_str(&format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"##,
        w = width,
        h = height
    ));
    out.push_str(&format!(r##"<rect width="{}" height="{}" fill="#ffffff"/>"##, width, height));
}

fn svg_title(out: &mut String, x: f64, title: &str) {
    out.push_str(&format!(
        r##"<text x="{:.1}" y="28" text-anchor="middle" font-size="18" font-weight="bold">{}</text>"##,
        x,
        escape_markup(title)
    ));
}

/// 折线路径，跳过空值
fn polyline(values: &[Option<f64>], x: impl Fn(usize) -> f64, y: impl Fn(f64) -> f64) -> String {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| format!("{:.1},{:.1}", x(i), y(v))))
        .collect::<Vec<_>>()
        .join(" ")
}

/// 发散色阶：-1 蓝，0 白，1 红
fn diverging_color(value: f64) -> String {
    let v = value.clamp(-1.0, 1.0);
    let (r, g, b) = if v >= 0.0 { (178.0, 24.0, 43.0) } else { (33.0, 102.0, 172.0) };
    let t = v.abs();
    let mix = |c: f64| (255.0 + (c - 255.0) * t).round() as u8;
    format!("#{:02x}{:02x}{:02x}", mix(r), mix(g), mix(b))
}

impl Visualizer for SvgVisualizer {
    fn plot_stock_trends(&self, points: &[TrendPoint], title: &str) -> Result<Figure> {
        let (first, last) = match (points.first(), points.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(anyhow!("没有可绘制的趋势数据")),
        };

        let closes: Vec<Option<f64>> = points.iter().map(|p| Some(p.close)).collect();
        let shorts: Vec<Option<f64>> = points.iter().map(|p| p.sma_short).collect();
        let longs: Vec<Option<f64>> = points.iter().map(|p| p.sma_long).collect();

        let all = closes.iter().chain(&shorts).chain(&longs).flatten();
        let (mut min, mut max) = all.fold((f64::MAX, f64::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if (max - min).abs() < f64::EPSILON {
            min -= 1.0;
            max += 1.0;
        }

        let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let steps = (points.len().max(2) - 1) as f64;
        let x = |i: usize| MARGIN_LEFT + plot_w * i as f64 / steps;
        let y = |v: f64| MARGIN_TOP + plot_h * (max - v) / (max - min);

        let mut svg = String::new();
        svg_open(&mut svg, WIDTH, HEIGHT);
        svg_title(&mut svg, WIDTH / 2.0, title);

        // 坐标轴
        svg.push_str(&format!(
            r##"<g stroke="#888" stroke-width="1"><line x1="{l}" y1="{t}" x2="{l}" y2="{b}"/><line x1="{l}" y1="{b}" x2="{r}" y2="{b}"/></g>"##,
            l = MARGIN_LEFT,
            t = MARGIN_TOP,
            b = HEIGHT - MARGIN_BOTTOM,
            r = WIDTH - MARGIN_RIGHT
        ));
        svg.push_str(&format!(
            r##"<g font-size="12" fill="#444"><text x="{lx}" y="{ty}" text-anchor="end">{max:.2}</text><text x="{lx}" y="{by}" text-anchor="end">{min:.2}</text><text x="{l}" y="{dy}">{d0}</text><text x="{r}" y="{dy}" text-anchor="end">{d1}</text></g>"##,
            lx = MARGIN_LEFT - 6.0,
            ty = MARGIN_TOP + 4.0,
            by = HEIGHT - MARGIN_BOTTOM,
            l = MARGIN_LEFT,
            r = WIDTH - MARGIN_RIGHT,
            dy = HEIGHT - MARGIN_BOTTOM + 20.0,
            max = max,
            min = min,
            d0 = first.date,
            d1 = last.date
        ));

        for (series, color, width) in [
            (&closes, CLOSE_COLOR, 2.0),
            (&shorts, SHORT_COLOR, 1.5),
            (&longs, LONG_COLOR, 1.5),
        ] {
            let path = polyline(series, x, y);
            if !path.is_empty() {
                svg.push_str(&format!(
                    r##"<polyline fill="none" stroke="{}" stroke-width="{}" points="{}"/>"##,
                    color, width, path
                ));
            }
        }

        // 图例
        for (i, (label, color)) in [("Close", CLOSE_COLOR), ("SMA Short", SHORT_COLOR), ("SMA Long", LONG_COLOR)]
            .iter()
            .enumerate()
        {
            let lx = MARGIN_LEFT + 10.0 + i as f64 * 110.0;
            svg.push_str(&format!(
                r##"<rect x="{:.1}" y="{}" width="14" height="4" fill="{}"/><text x="{:.1}" y="{}" font-size="12">{}</text>"##,
                lx,
                MARGIN_TOP - 12.0,
                color,
                lx + 18.0,
                MARGIN_TOP - 7.0,
                label
            ));
        }

        svg.push_str("</svg>");
        Ok(Figure {
            title: title.to_string(),
            svg,
        })
    }

    fn plot_sentiment_wordcloud(&self, scored: &[ScoredNews]) -> Result<Figure> {
        let title = "News Word Cloud";
        let freq = self
            .processor
            .word_frequencies(scored.iter().map(|n| n.headline.as_str()));
        let words = &freq[..freq.len().min(WORDCLOUD_WORDS)];

        let mut svg = String::new();
        svg_open(&mut svg, WIDTH, HEIGHT);
        svg_title(&mut svg, WIDTH / 2.0, title);

        if words.is_empty() {
            svg.push_str(&format!(
                r##"<text x="{}" y="{}" text-anchor="middle" font-size="16" fill="#888">No headlines to display</text>"##,
                WIDTH / 2.0,
                HEIGHT / 2.0
            ));
        }

        let max_count = words.first().map(|w| w.1).unwrap_or(1);
        let min_count = words.last().map(|w| w.1).unwrap_or(1);
        let font_size = |count: usize| {
            if max_count == min_count {
                28.0
            } else {
                14.0 + 34.0 * (count - min_count) as f64 / (max_count - min_count) as f64
            }
        };

        // 流式布局：逐行放置，超出宽度换行
        let (mut cx, mut cy, mut line_height) = (20.0, MARGIN_TOP + 10.0, 0.0_f64);
        for (word, count) in words {
            let size = font_size(*count);
            let width = word.chars().count() as f64 * size * 0.6;
            if cx + width > WIDTH - 20.0 && cx > 20.0 {
                cx = 20.0;
                cy += line_height + 8.0;
                line_height = 0.0;
            }
            line_height = line_height.max(size);
            if cy + size > HEIGHT - 10.0 {
                break;
            }

            let color = match PatternAnalyzer::word_polarity(word) {
                1 => "#1a9850",
                -1 => "#d73027",
                _ => "#4d4d4d",
            };
            svg.push_str(&format!(
                r##"<text x="{:.1}" y="{:.1}" font-size="{:.1}" fill="{}"><title>{} ({})</title>{}</text>"##,
                cx,
                cy + size,
                size,
                color,
                escape_markup(word),
                count,
                escape_markup(word)
            ));
            cx += width + 14.0;
        }

        svg.push_str("</svg>");
        Ok(Figure {
            title: title.to_string(),
            svg,
        })
    }

    fn plot_correlation_heatmap(&self, matrix: &CorrelationMatrix) -> Result<Figure> {
        if matrix.is_empty() {
            return Err(anyhow!("相关系数矩阵为空"));
        }

        let title = "Correlation Heatmap";
        let n = matrix.len() as f64;
        let left = 90.0;
        let top = 60.0;
        let width = left + n * HEATMAP_CELL + 20.0;
        let height = top + n * HEATMAP_CELL + 20.0;

        let mut svg = String::new();
        svg_open(&mut svg, width, height);
        svg_title(&mut svg, width / 2.0, title);

        for (i, field) in matrix.fields.iter().enumerate() {
            let offset = i as f64 * HEATMAP_CELL + HEATMAP_CELL / 2.0;
            svg.push_str(&format!(
                r##"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="13">{}</text><text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="13">{}</text>"##,
                left - 8.0,
                top + offset + 4.0,
                escape_markup(field),
                left + offset,
                top - 8.0,
                escape_markup(field)
            ));
        }

        for (i, row) in matrix.values.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                let x = left + j as f64 * HEATMAP_CELL;
                let y = top + i as f64 * HEATMAP_CELL;
                let (fill, text, text_color) = match value {
                    Some(v) => (
                        diverging_color(*v),
                        format!("{:.2}", v),
                        if v.abs() > 0.6 { "#ffffff" } else { "#222222" },
                    ),
                    None => ("#cccccc".to_string(), "n/a".to_string(), "#222222"),
                };
                svg.push_str(&format!(
                    r##"<rect x="{:.1}" y="{:.1}" width="{}" height="{}" fill="{}" stroke="#ffffff"/><text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="14" fill="{}">{}</text>"##,
                    x,
                    y,
                    HEATMAP_CELL,
                    HEATMAP_CELL,
                    fill,
                    x + HEATMAP_CELL / 2.0,
                    y + HEATMAP_CELL / 2.0 + 5.0,
                    text_color,
                    text
                ));
            }
        }

        svg.push_str("</svg>");
        Ok(Figure {
            title: title.to_string(),
            svg,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SentimentLabel, TrendDirection};
    use chrono::NaiveDate;

    fn point(day: u32, close: f64, sma: Option<f64>) -> TrendPoint {
        TrendPoint {
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            close,
            sma_short: sma,
            sma_long: None,
            trend: TrendDirection::Insufficient,
            strength: None,
        }
    }

    fn scored(headline: &str) -> ScoredNews {
        ScoredNews {
            headline: headline.to_string(),
            link: String::new(),
            source: "test".to_string(),
            score: 0.0,
            label: SentimentLabel::Neutral,
        }
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape_markup(r##"<b>"A&B"</b>'"##), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;&#39;");
    }

    #[test]
    fn test_diverging_color() {
        assert_eq!(diverging_color(0.0), "#ffffff");
        assert_eq!(diverging_color(1.0), "#b2182b");
        assert_eq!(diverging_color(-1.0), "#2166ac");
        assert_eq!(diverging_color(5.0), "#b2182b");
    }

    #[test]
    fn test_plot_stock_trends() {
        let points = vec![point(1, 10.0, None), point(2, 12.0, Some(11.0)), point(3, 11.0, Some(11.5))];
        let fig = SvgVisualizer::new()
            .plot_stock_trends(&points, "RELIANCE <Price> Trend")
            .unwrap();

        assert_eq!(fig.title, "RELIANCE <Price> Trend");
        assert!(fig.svg.starts_with("<svg"));
        assert!(fig.svg.ends_with("</svg>"));
        assert!(fig.svg.contains("RELIANCE &lt;Price&gt; Trend"));
        assert_eq!(fig.svg.matches("<polyline").count(), 2);
        assert!(fig.svg.contains("2024-05-01"));
        assert!(fig.svg.contains("2024-05-03"));
    }

    #[test]
    fn test_plot_single_flat_point() {
        let fig = SvgVisualizer::new().plot_stock_trends(&[point(1, 10.0, None)], "One").unwrap();
        assert!(fig.svg.contains("<polyline"));
        assert!(!fig.svg.contains("NaN"));
    }

    #[test]
    fn test_plot_stock_trends_empty() {
        assert!(SvgVisualizer::new().plot_stock_trends(&[], "Empty").is_err());
    }

    #[test]
    fn test_plot_wordcloud() {
        let news = vec![scored("Banks surge on earnings"), scored("Banks slip as metals slump")];
        let fig = SvgVisualizer::new().plot_sentiment_wordcloud(&news).unwrap();

        assert!(fig.svg.contains(">banks</text>"));
        assert!(fig.svg.contains("<title>banks (2)</title>"));
        assert!(fig.svg.contains(r##"fill="#1a9850"><title>surge"##));
        assert!(fig.svg.contains(r##"fill="#d73027"><title>slump"##));
    }

    #[test]
    fn test_plot_wordcloud_empty() {
        let fig = SvgVisualizer::new().plot_sentiment_wordcloud(&[]).unwrap();
        assert!(fig.svg.contains("No headlines to display"));
    }

    #[test]
    fn test_plot_heatmap() {
        let matrix = CorrelationMatrix {
            fields: vec!["Close".to_string(), "Volume".to_string()],
            values: vec![vec![Some(1.0), None], vec![None, Some(1.0)]],
        };
        let fig = SvgVisualizer::new().plot_correlation_heatmap(&matrix).unwrap();

        assert_eq!(fig.svg.matches("<rect x=").count(), 4);
        assert_eq!(fig.svg.matches(">n/a</text>").count(), 2);
        assert_eq!(fig.svg.matches(">1.00</text>").count(), 2);
        assert!(fig.svg.contains(">Volume</text>"));
    }
}
