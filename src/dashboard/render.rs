//! 页面渲染
//!
//! 将 `Screen` 渲染为完整的 HTML 页面：左侧导航栏，右侧为页面组件

use super::{Form, Menu, Screen, Widget};
use crate::models::Table;
use crate::services::visualizer::escape_markup;

const PAGE_TITLE: &str = "Financial Market Analysis";
const HEADING: &str = "📈 Financial Market Analysis Platform";
const FOOTER: &str = "Developed with ❤️ using Rust and actix-web";

const STYLE: &str = r#"
body { margin: 0; font-family: -apple-system, "Segoe UI", Roboto, sans-serif; color: #262730; display: flex; min-height: 100vh; }
nav { width: 240px; background: #f0f2f6; padding: 24px 16px; box-sizing: border-box; }
nav h2 { font-size: 15px; margin: 0 0 12px; }
nav a { display: block; padding: 8px 10px; border-radius: 6px; color: #262730; text-decoration: none; margin-bottom: 4px; }
nav a.active { background: #ff4b4b; color: #fff; }
nav hr { border: none; border-top: 1px solid #d0d3da; margin: 20px 0 12px; }
nav small { color: #6b6f7b; }
main { flex: 1; padding: 32px 48px; overflow-x: auto; }
.alert { padding: 12px 16px; border-radius: 6px; margin: 12px 0; }
.success { background: #e6f4ea; color: #1e7b34; }
.warning { background: #fff8e1; color: #8a6d00; }
.error { background: #fdecea; color: #b3261e; }
table { border-collapse: collapse; margin: 12px 0; font-size: 14px; }
th, td { border: 1px solid #e0e2e8; padding: 6px 10px; text-align: right; }
th { background: #f7f8fa; }
td:first-child, th:first-child { text-align: left; }
form { margin: 12px 0; }
input[type=text] { padding: 8px; width: 280px; border: 1px solid #d0d3da; border-radius: 6px; }
button { padding: 8px 16px; border: 1px solid #d0d3da; border-radius: 6px; background: #fff; cursor: pointer; }
.spinner { display: none; margin-left: 12px; color: #6b6f7b; }
form.pending .spinner { display: inline; }
figure { margin: 16px 0; }
"#;

fn render_sidebar(out: &mut String, active: Menu) {
    out.push_str("<nav><h2>Navigation</h2>");
    for menu in Menu::ALL {
        let class = if menu == active { " class=\"active\"" } else { "" };
        out.push_str(&format!("<a href=\"{}\"{}>{}</a>", menu.path(), class, menu.label()));
    }
    out.push_str(&format!("<hr><small>{}</small></nav>", FOOTER));
}

fn render_form(out: &mut String, form: &Form) {
    out.push_str(&format!(
        "<form method=\"get\" action=\"{}\" onsubmit=\"this.classList.add('pending')\">",
        form.action
    ));
    if let Some(input) = &form.input {
        out.push_str(&format!(
            "<label>{label}<br><input type=\"text\" name=\"{name}\" value=\"{value}\"></label><br><br>",
            label = escape_markup(&input.label),
            name = escape_markup(&input.name),
            value = escape_markup(&input.value)
        ));
    }
    out.push_str(&format!(
        "<input type=\"hidden\" name=\"run\" value=\"1\"><button type=\"submit\">{}</button><span class=\"spinner\">⏳ {}</span></form>",
        escape_markup(&form.button),
        escape_markup(form.spinner)
    ));
}

fn render_table(out: &mut String, table: &Table) {
    out.push_str("<table><thead><tr>");
    for column in &table.columns {
        out.push_str(&format!("<th>{}</th>", escape_markup(column)));
    }
    out.push_str("</tr></thead><tbody>");
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", escape_markup(cell)));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
}

fn render_widget(out: &mut String, widget: &Widget) {
    match widget {
        Widget::Subheader(text) => {
            out.push_str(&format!("<h3>{}</h3>", escape_markup(text)));
        }
        Widget::Text(text) => {
            out.push_str(&format!("<p>{}</p>", escape_markup(text)));
        }
        Widget::Form(form) => render_form(out, form),
        Widget::Success(text) => {
            out.push_str(&format!("<div class=\"alert success\">{}</div>", escape_markup(text)));
        }
        Widget::Warning(text) => {
            out.push_str(&format!("<div class=\"alert warning\">{}</div>", escape_markup(text)));
        }
        Widget::Error(text) => {
            out.push_str(&format!("<div class=\"alert error\">{}</div>", escape_markup(text)));
        }
        Widget::Table(table) => render_table(out, table),
        // SVG 由可视化器生成，文本已转义
        Widget::Figure(figure) => {
            out.push_str(&format!("<figure>{}</figure>", figure.svg));
        }
    }
}

/// 渲染完整页面
pub fn render_page(screen: &Screen) -> String {
    let mut out = String::with_capacity(16 * 1024);
    out.push_str(&format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>{}</title><style>{}</style></head><body>",
        PAGE_TITLE, STYLE
    ));
    render_sidebar(&mut out, screen.menu);
    out.push_str(&format!("<main><h1>{}</h1>", HEADING));
    for widget in &screen.widgets {
        render_widget(&mut out, widget);
    }
    out.push_str("</main></body></html>");
    out
}

/// 协作者出错时的通用失败页面
pub fn render_error_page(menu: Menu, message: &str) -> String {
    let mut screen = Screen::new(menu);
    screen.push(Widget::Error(format!("Something went wrong: {}", message)));
    render_page(&screen)
}
