use serde::Serialize;

/// A finalized row with a fixed column order.
pub trait TableRow {
    fn headers() -> Vec<&'static str>;
    fn cells(&self) -> Vec<String>;
}

/// Rendered table handed to a sink: ordered headers, one string row per entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SummaryTable {
    pub fn from_rows<R: TableRow>(title: &str, rows: &[R]) -> Self {
        SummaryTable {
            title: title.to_string(),
            headers: R::headers().into_iter().map(String::from).collect(),
            rows: rows.iter().map(TableRow::cells).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
