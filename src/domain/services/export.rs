//! Semicolon separated exports of guest lists and groupings.
//!
//! Cells are written verbatim: a value containing `;` or a newline shifts
//! the columns of its row.

use serde_json::{Map, Number, Value};
use crate::domain::models::{field::Field, guest::GuestRecord};
use crate::domain::services::{grouping::GroupingResult, slug::slugify};

pub const COL_SEPARATOR: &str = ";";
pub const LINE_SEPARATOR: &str = "\n";
pub const SUM_LABEL: &str = "Soma";
pub const TOTAL_LABEL: &str = "Total";

const GROUP_VALUE_KEY: &str = "value";
const GROUP_SUM_KEY: &str = "sum";

pub type Row = Map<String, Value>;

pub struct CsvColumn {
    /// Key looked up in each row.
    pub name: String,
    /// Header text.
    pub label: String,
    /// Receives `Value::Null` when the row has no value for `name`.
    pub format: Option<fn(&Value) -> String>,
}

impl CsvColumn {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self { name: name.into(), label: label.into(), format: None }
    }

    pub fn with_format(mut self, format: fn(&Value) -> String) -> Self {
        self.format = Some(format);
        self
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

pub fn encode(columns: &[CsvColumn], rows: &[Row]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(rows.len() + 1);
    lines.push(columns.iter().map(|c| c.label.as_str()).collect::<Vec<_>>().join(COL_SEPARATOR));

    for row in rows {
        let cells: Vec<String> = columns.iter()
            .map(|column| {
                let value = row.get(&column.name);
                match column.format {
                    Some(format) => format(value.unwrap_or(&Value::Null)),
                    None => cell_text(value),
                }
            })
            .collect();
        lines.push(cells.join(COL_SEPARATOR));
    }

    lines.join(LINE_SEPARATOR)
}

pub fn guest_list_filename(link: &str) -> String {
    format!("convidados-{}.csv", link)
}

pub fn grouping_filename(link: &str, field_label: &str) -> String {
    format!("{}_convidados-agrupados_{}.csv", link, slugify(field_label))
}

/// Renders aggregates the way they are displayed: `10`, not `10.0`.
pub fn format_aggregate(value: &Value) -> String {
    match value.as_f64() {
        Some(n) => n.to_string(),
        None => cell_text(Some(value)),
    }
}

fn aggregate_value(n: f64) -> Value {
    Number::from_f64(n)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(n.to_string()))
}

/// One column per event field (in form order), one row per guest.
pub fn guest_list_table(fields: &[Field], guests: &[GuestRecord]) -> (Vec<CsvColumn>, Vec<Row>) {
    let columns = fields.iter()
        .map(|field| CsvColumn::new(field.id.clone(), field.name.clone()))
        .collect();

    let rows = guests.iter()
        .map(|guest| {
            guest.values.iter()
                .map(|v| (v.field_id.clone(), Value::String(v.value.clone())))
                .collect::<Row>()
        })
        .collect();

    (columns, rows)
}

/// `[field, Soma]` rows followed by the `Total` row.
pub fn grouping_table(result: &GroupingResult) -> (Vec<CsvColumn>, Vec<Row>) {
    let columns = vec![
        CsvColumn::new(GROUP_VALUE_KEY, result.field.clone()),
        CsvColumn::new(GROUP_SUM_KEY, SUM_LABEL).with_format(format_aggregate),
    ];

    let row = |label: &str, aggregate: f64| {
        let mut row = Row::new();
        row.insert(GROUP_VALUE_KEY.to_string(), Value::String(label.to_string()));
        row.insert(GROUP_SUM_KEY.to_string(), aggregate_value(aggregate));
        row
    };

    let mut rows: Vec<Row> = result.values.iter()
        .map(|(label, aggregate)| row(label, *aggregate))
        .collect();
    rows.push(row(TOTAL_LABEL, result.total()));

    (columns, rows)
}
