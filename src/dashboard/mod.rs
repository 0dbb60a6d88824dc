//! 看板
//!
//! 侧边栏菜单对应四个页面，每个页面由一个处理函数生成 `Screen`，
//! 再由 `render` 模块渲染为 HTML

pub mod controller;
pub mod render;

use serde::Serialize;

use crate::models::{Figure, Table};

pub use controller::{Dashboard, NEWS_COUNT};

/// 侧边栏菜单
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Menu {
    Home,
    StockAnalysis,
    NewsSentiment,
    Visualization,
}

impl Menu {
    pub const ALL: [Menu; 4] = [
        Menu::Home,
        Menu::StockAnalysis,
        Menu::NewsSentiment,
        Menu::Visualization,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Menu::Home => "Home",
            Menu::StockAnalysis => "Stock Analysis",
            Menu::NewsSentiment => "News Sentiment",
            Menu::Visualization => "Visualization",
        }
    }

    /// 页面路径
    pub fn path(self) -> &'static str {
        match self {
            Menu::Home => "/",
            Menu::StockAnalysis => "/stock-analysis",
            Menu::NewsSentiment => "/news-sentiment",
            Menu::Visualization => "/visualization",
        }
    }
}

/// 页面请求，携带该页面需要的输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenRequest {
    Home,
    StockAnalysis {
        symbol: Option<String>,
        /// 是否点击了按钮
        triggered: bool,
    },
    NewsSentiment {
        triggered: bool,
    },
    Visualization {
        triggered: bool,
    },
}

impl ScreenRequest {
    pub fn menu(&self) -> Menu {
        match self {
            ScreenRequest::Home => Menu::Home,
            ScreenRequest::StockAnalysis { .. } => Menu::StockAnalysis,
            ScreenRequest::NewsSentiment { .. } => Menu::NewsSentiment,
            ScreenRequest::Visualization { .. } => Menu::Visualization,
        }
    }
}

/// 表单：可选的文本输入框加一个按钮
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Form {
    pub action: &'static str,
    pub input: Option<TextInput>,
    pub button: String,
    /// 请求进行中时显示的提示
    pub spinner: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextInput {
    pub name: String,
    pub label: String,
    pub value: String,
}

/// 页面组件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Widget {
    Subheader(String),
    Text(String),
    Form(Form),
    Success(String),
    Warning(String),
    Error(String),
    Table(Table),
    Figure(Figure),
}

/// 一次请求渲染出的完整页面内容
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Screen {
    pub menu: Menu,
    pub widgets: Vec<Widget>,
}

impl Screen {
    pub fn new(menu: Menu) -> Self {
        Self {
            menu,
            widgets: Vec::new(),
        }
    }

    pub fn push(&mut self, widget: Widget) {
        self.widgets.push(widget);
    }
}

#[cfg(test)]
impl Screen {
    pub fn errors(&self) -> Vec<&str> {
        self.widgets
            .iter()
            .filter_map(|w| match w {
                Widget::Error(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn figures(&self) -> Vec<&Figure> {
        self.widgets
            .iter()
            .filter_map(|w| match w {
                Widget::Figure(fig) => Some(fig),
                _ => None,
            })
            .collect()
    }

    pub fn tables(&self) -> Vec<&Table> {
        self.widgets
            .iter()
            .filter_map(|w| match w {
                Widget::Table(table) => Some(table),
                _ => None,
            })
            .collect()
    }
}
