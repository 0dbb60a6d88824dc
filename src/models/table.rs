//! 展示用表格
//!
//! 任意行类型通过 `Tabular` 转换为字符串表格，供页面渲染

use serde::Serialize;

/// 可以按行展示的数据
pub trait Tabular {
    /// 列名
    fn columns() -> Vec<&'static str>;
    /// 当前行各列的展示文本
    fn cells(&self) -> Vec<String>;
}

/// 字符串表格
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_rows<'a, T, I>(rows: I) -> Self
    where
        T: Tabular + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        Self {
            columns: T::columns().into_iter().map(String::from).collect(),
            rows: rows.into_iter().map(T::cells).collect(),
        }
    }

    /// 前 n 行
    pub fn head<T: Tabular>(rows: &[T], n: usize) -> Self {
        Self::from_rows(rows.iter().take(n))
    }

    /// 后 n 行
    pub fn tail<T: Tabular>(rows: &[T], n: usize) -> Self {
        Self::from_rows(rows[rows.len().saturating_sub(n)..].iter())
    }
}

/// 数值统一保留两位小数
pub fn fmt_num(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(u32);

    impl Tabular for Row {
        fn columns() -> Vec<&'static str> {
            vec!["N"]
        }

        fn cells(&self) -> Vec<String> {
            vec![self.0.to_string()]
        }
    }

    #[test]
    fn test_head_and_tail() {
        let rows: Vec<Row> = (1..=12).map(Row).collect();

        let tail = Table::tail(&rows, 10);
        assert_eq!(tail.columns, vec!["N"]);
        assert_eq!(tail.rows.len(), 10);
        assert_eq!(tail.rows[0], vec!["3"]);
        assert_eq!(tail.rows[9], vec!["12"]);

        let head = Table::head(&rows, 5);
        assert_eq!(head.rows.len(), 5);
        assert_eq!(head.rows[4], vec!["5"]);
    }

    #[test]
    fn test_tail_shorter_than_window() {
        let rows: Vec<Row> = (1..=3).map(Row).collect();
        assert_eq!(Table::tail(&rows, 10).rows.len(), 3);
        assert!(Table::tail::<Row>(&[], 10).rows.is_empty());
    }
}
