//! 图表模型

use serde::Serialize;

/// 渲染完成的图表，内容为独立的 SVG 文档
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub title: String,
    pub svg: String,
}
