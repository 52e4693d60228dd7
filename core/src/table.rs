//! Generic sortable, filterable table.
//!
//! # Design
//! A `Table` is built per render from a column schema plus the page's
//! persistent `SortState`. It only ever sees the rows it is given: callers
//! pass the already-scoped slice (usually one page) and sorting and the
//! global filter apply to that slice alone.
//!
//! Sorting is single-column. Activating the same header cycles
//! unsorted → ascending → descending → unsorted; activating another header
//! starts that column at ascending.

use std::cmp::Ordering;
use std::fmt;

/// Sortable, stringifiable value of one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Int(i64),
    Text(String),
}

impl CellValue {
    fn rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Bool(_) => 1,
            CellValue::Int(_) => 2,
            CellValue::Text(_) => 3,
        }
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Bool(a), CellValue::Bool(b)) => a.cmp(b),
            (CellValue::Int(a), CellValue::Int(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => natural_cmp(a, b).then_with(|| a.cmp(b)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Case-insensitive comparison that orders embedded digit runs by value,
/// so "album 9" sorts before "album 10".
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (mut a, mut b) = (a.chars().peekable(), b.chars().peekable());
    loop {
        match (a.peek().copied(), b.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let x = digit_run(&mut a);
                let y = digit_run(&mut b);
                let (x, y) = (x.trim_start_matches('0'), y.trim_start_matches('0'));
                let ord = x.len().cmp(&y.len()).then_with(|| x.cmp(y));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                let ord = x.to_lowercase().cmp(y.to_lowercase());
                if ord != Ordering::Equal {
                    return ord;
                }
                a.next();
                b.next();
            }
        }
    }
}

fn digit_run(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Int(i64::from(n))
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => " ⬆️",
            SortDirection::Descending => " ⬇️",
        }
    }
}

/// Active single-column sort, owned by the page across renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    active: Option<(String, SortDirection)>,
}

impl SortState {
    pub fn toggle(&mut self, key: &str) {
        self.active = match self.active.take() {
            Some((current, SortDirection::Ascending)) if current == key => {
                Some((current, SortDirection::Descending))
            }
            Some((current, SortDirection::Descending)) if current == key => None,
            _ => Some((key.to_string(), SortDirection::Ascending)),
        };
    }

    pub fn direction(&self, key: &str) -> Option<SortDirection> {
        match &self.active {
            Some((current, direction)) if current == key => Some(*direction),
            _ => None,
        }
    }

    pub fn is_unsorted(&self) -> bool {
        self.active.is_none()
    }
}

type Renderer<'a, T> = Box<dyn Fn(&T) -> String + 'a>;

/// One column: a key, a header label, a sort/filter accessor and an optional
/// custom cell renderer.
pub struct Column<'a, T> {
    key: &'static str,
    header: &'static str,
    accessor: fn(&T) -> CellValue,
    render: Option<Renderer<'a, T>>,
}

impl<'a, T> Column<'a, T> {
    pub fn new(key: &'static str, header: &'static str, accessor: fn(&T) -> CellValue) -> Self {
        Self {
            key,
            header,
            accessor,
            render: None,
        }
    }

    pub fn with_render(mut self, render: impl Fn(&T) -> String + 'a) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    fn value(&self, row: &T) -> CellValue {
        (self.accessor)(row)
    }

    fn cell(&self, row: &T) -> String {
        match &self.render {
            Some(render) => render(row),
            None => self.value(row).to_string(),
        }
    }
}

struct GlobalFilter {
    column: String,
    text: String,
}

pub struct Table<'a, T> {
    columns: Vec<Column<'a, T>>,
    sort: SortState,
    filter: Option<GlobalFilter>,
}

impl<'a, T> Table<'a, T> {
    pub fn new(columns: Vec<Column<'a, T>>) -> Self {
        Self {
            columns,
            sort: SortState::default(),
            filter: None,
        }
    }

    pub fn with_sort(mut self, sort: &SortState) -> Self {
        self.sort = sort.clone();
        self
    }

    /// Keep only rows whose `column` value contains `text`,
    /// case-insensitively. Empty text disables the filter.
    pub fn with_filter(mut self, column: &str, text: &str) -> Self {
        self.filter = (!text.is_empty()).then(|| GlobalFilter {
            column: column.to_string(),
            text: text.to_lowercase(),
        });
        self
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|col| match self.sort.direction(col.key) {
                Some(direction) => format!("{}{}", col.header, direction.indicator()),
                None => col.header.to_string(),
            })
            .collect()
    }

    /// Filter then sort the given rows. Sorting is stable.
    pub fn rows<'r>(&self, rows: &[&'r T]) -> Vec<&'r T> {
        let mut out: Vec<&'r T> = match &self.filter {
            Some(filter) => match self.find(&filter.column) {
                Some(col) => rows
                    .iter()
                    .copied()
                    .filter(|row| col.value(row).to_string().to_lowercase().contains(&filter.text))
                    .collect(),
                None => rows.to_vec(),
            },
            None => rows.to_vec(),
        };

        let sorted = self.columns.iter().find_map(|col| {
            self.sort.direction(col.key).map(|direction| (col, direction))
        });
        if let Some((col, direction)) = sorted {
            out.sort_by(|a, b| {
                let ord = col.value(a).cmp(&col.value(b));
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        out
    }

    /// Rendered cell text for the filtered, sorted rows.
    pub fn cells(&self, rows: &[&T]) -> Vec<Vec<String>> {
        self.rows(rows)
            .into_iter()
            .map(|row| self.columns.iter().map(|col| col.cell(row)).collect())
            .collect()
    }

    pub fn render(&self, rows: &[&T]) -> String {
        let headers = self.headers();
        let body = self.cells(rows);

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &body {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        out.push_str(&format_row(&headers, &widths));
        out.push('\n');
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join("-+-"));
        for row in &body {
            out.push('\n');
            out.push_str(&format_row(row, &widths));
        }
        out
    }

    fn find(&self, key: &str) -> Option<&Column<'a, T>> {
        self.columns.iter().find(|col| col.key == key)
    }
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    padded.join(" | ").trim_end().to_string()
}
