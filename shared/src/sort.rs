//! Table sorting driven by explicit column descriptors.
//!
//! Every sortable table declares its columns up front: a key, a header, a
//! [`ColumnKind`] and an accessor that extracts a [`SortValue`] from a row.
//! Derived columns (totals, joined names) compute their value in the
//! accessor, capturing whatever lookup data they need.
//!
//! Ordering rules:
//! - numbers compare as `f64`, dates as epoch milliseconds, text
//!   case-insensitively;
//! - a missing value (`None`) sorts before every defined value when
//!   ascending and after every defined value when descending;
//! - the sort is stable in both directions: rows with equal keys keep the
//!   order they arrived in.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Arrow shown next to the active column header
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Text,
    Date,
    /// Not stored on the row; computed by the accessor
    Derived,
}

/// A comparison key extracted from a row
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    /// Epoch milliseconds
    Date(i64),
    Text(String),
}

impl SortValue {
    fn rank(&self) -> u8 {
        match self {
            SortValue::Number(_) => 0,
            SortValue::Date(_) => 1,
            SortValue::Text(_) => 2,
        }
    }

    /// Lowercases text and replaces non-finite numbers with zero so that
    /// comparisons are total
    fn normalized(self) -> Self {
        match self {
            SortValue::Text(s) => SortValue::Text(s.to_lowercase()),
            SortValue::Number(n) if !n.is_finite() => SortValue::Number(0.0),
            other => other,
        }
    }

    fn cmp_defined(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

/// Three-way comparison of two (possibly missing) keys in the given direction
pub fn compare_keys(a: &Option<SortValue>, b: &Option<SortValue>, direction: SortDirection) -> Ordering {
    let ascending = match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.cmp_defined(b),
    };
    match direction {
        SortDirection::Asc => ascending,
        SortDirection::Desc => ascending.reverse(),
    }
}

/// Epoch milliseconds for the timestamp formats the backend emits
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.timestamp_millis());
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

type Accessor<R> = Rc<dyn Fn(&R) -> Option<SortValue>>;

/// Describes one table column and how to sort by it
pub struct Column<R> {
    pub key: &'static str,
    pub header: &'static str,
    pub kind: ColumnKind,
    pub sortable: bool,
    accessor: Accessor<R>,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            header: self.header,
            kind: self.kind,
            sortable: self.sortable,
            accessor: Rc::clone(&self.accessor),
        }
    }
}

// Accessors are closures; two columns are "the same" when they describe the
// same key the same way.
impl<R> PartialEq for Column<R> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.header == other.header
            && self.kind == other.kind
            && self.sortable == other.sortable
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("sortable", &self.sortable)
            .finish()
    }
}

impl<R: 'static> Column<R> {
    fn new(key: &'static str, header: &'static str, kind: ColumnKind, accessor: Accessor<R>) -> Self {
        Self {
            key,
            header,
            kind,
            sortable: true,
            accessor,
        }
    }

    pub fn numeric<F>(key: &'static str, header: &'static str, f: F) -> Self
    where
        F: Fn(&R) -> Option<f64> + 'static,
    {
        Self::new(key, header, ColumnKind::Numeric, Rc::new(move |row: &R| f(row).map(SortValue::Number)))
    }

    pub fn text<F>(key: &'static str, header: &'static str, f: F) -> Self
    where
        F: for<'a> Fn(&'a R) -> Option<&'a str> + 'static,
    {
        Self::new(
            key,
            header,
            ColumnKind::Text,
            Rc::new(move |row: &R| f(row).map(|s| SortValue::Text(s.to_string()))),
        )
    }

    /// Timestamps that fail to parse count as missing
    pub fn date<F>(key: &'static str, header: &'static str, f: F) -> Self
    where
        F: for<'a> Fn(&'a R) -> Option<&'a str> + 'static,
    {
        Self::new(
            key,
            header,
            ColumnKind::Date,
            Rc::new(move |row: &R| f(row).and_then(parse_timestamp).map(SortValue::Date)),
        )
    }

    pub fn derived<F>(key: &'static str, header: &'static str, f: F) -> Self
    where
        F: Fn(&R) -> Option<SortValue> + 'static,
    {
        Self::new(key, header, ColumnKind::Derived, Rc::new(f))
    }

    /// Shown in the table, ignored by the sort engine
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}

impl<R> Column<R> {
    /// Normalized sort key for a row
    pub fn value(&self, row: &R) -> Option<SortValue> {
        (self.accessor)(row).map(SortValue::normalized)
    }
}

fn find_sortable<'c, R>(columns: &'c [Column<R>], field: &str) -> Option<&'c Column<R>> {
    columns.iter().find(|c| c.key == field && c.sortable)
}

/// Sort `rows` by the column named `field`. Unknown and non-sortable fields
/// leave the order untouched.
pub fn sort_rows<R: Clone>(rows: &[R], columns: &[Column<R>], field: &str, direction: SortDirection) -> Vec<R> {
    let column = match find_sortable(columns, field) {
        Some(column) => column,
        None => return rows.to_vec(),
    };

    let mut keyed: Vec<(Option<SortValue>, &R)> = rows.iter().map(|row| (column.value(row), row)).collect();
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a, b, direction));
    keyed.into_iter().map(|(_, row)| row.clone()).collect()
}

/// Which column a table is sorted by, and the toggle rules for header clicks
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub field: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: &str, direction: SortDirection) -> Self {
        Self {
            field: Some(field.to_string()),
            direction,
        }
    }

    /// Same field flips direction, a new field starts ascending. Returns
    /// `false` (and changes nothing) for unknown or non-sortable fields.
    pub fn toggle<R>(&mut self, field: &str, columns: &[Column<R>]) -> bool {
        if find_sortable(columns, field).is_none() {
            return false;
        }
        if self.field.as_deref() == Some(field) {
            self.direction = self.direction.toggled();
        } else {
            self.field = Some(field.to_string());
            self.direction = SortDirection::Asc;
        }
        true
    }

    pub fn apply<R: Clone>(&self, rows: &[R], columns: &[Column<R>]) -> Vec<R> {
        match &self.field {
            Some(field) => sort_rows(rows, columns, field, self.direction),
            None => rows.to_vec(),
        }
    }

    /// Arrow for a header, if that header is the active sort
    pub fn indicator(&self, field: &str) -> Option<&'static str> {
        (self.field.as_deref() == Some(field)).then(|| self.direction.arrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        name: Option<&'static str>,
        price: Option<f64>,
        quantity: Option<i64>,
        date: Option<&'static str>,
        category_id: Option<i64>,
    }

    fn row(id: i64, name: Option<&'static str>, price: Option<f64>, quantity: Option<i64>) -> Row {
        Row { id, name, price, quantity, date: None, category_id: None }
    }

    fn columns() -> Vec<Column<Row>> {
        vec![
            Column::numeric("id", "ID", |r: &Row| Some(r.id as f64)),
            Column::text("name", "Name", |r: &Row| r.name),
            Column::numeric("price", "Price", |r: &Row| r.price),
            Column::date("date", "Date", |r: &Row| r.date),
            Column::derived("total", "Total", |r: &Row| {
                Some(SortValue::Number(r.price.unwrap_or(0.0) * r.quantity.unwrap_or(0) as f64))
            }),
            Column::text("notes", "Notes", |r: &Row| r.name).unsortable(),
        ]
    }

    fn sample() -> Vec<Row> {
        vec![
            row(1, Some("banana"), Some(3.5), Some(2)),
            row(2, Some("Apple"), Some(10.0), Some(1)),
            row(3, Some("cherry"), Some(0.5), Some(40)),
            row(4, Some("apple"), Some(3.5), Some(7)),
            row(5, Some("Date"), Some(7.25), Some(3)),
        ]
    }

    fn keys(rows: &[Row], field: &str) -> Vec<Option<SortValue>> {
        let cols = columns();
        let column = cols.iter().find(|c| c.key == field).unwrap();
        rows.iter().map(|r| column.value(r)).collect()
    }

    fn ids(rows: &[Row]) -> Vec<i64> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_numeric_ascending_reversed_equals_descending() {
        let rows = sample();
        let mut asc = sort_rows(&rows, &columns(), "price", SortDirection::Asc);
        asc.reverse();
        let desc = sort_rows(&rows, &columns(), "price", SortDirection::Desc);
        assert_eq!(keys(&asc, "price"), keys(&desc, "price"));
    }

    #[rstest]
    #[case("id", SortDirection::Asc)]
    #[case("name", SortDirection::Desc)]
    #[case("price", SortDirection::Asc)]
    #[case("total", SortDirection::Desc)]
    fn test_sorting_is_idempotent(#[case] field: &str, #[case] direction: SortDirection) {
        let once = sort_rows(&sample(), &columns(), field, direction);
        let twice = sort_rows(&once, &columns(), field, direction);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[rstest]
    #[case("name")]
    #[case("price")]
    #[case("date")]
    #[case("total")]
    fn test_nulls_first_ascending_last_descending(#[case] field: &str) {
        let mut rows = vec![
            Row { id: 1, name: Some("b"), price: Some(2.0), quantity: Some(1), date: Some("2025-01-02"), category_id: None },
            Row { id: 2, name: None, price: None, quantity: None, date: None, category_id: None },
            Row { id: 3, name: Some("a"), price: Some(1.0), quantity: Some(1), date: Some("2025-01-01"), category_id: None },
        ];
        let derived_null = Column::derived("total", "Total", |r: &Row| {
            r.price.zip(r.quantity).map(|(p, q)| SortValue::Number(p * q as f64))
        });
        let mut cols = columns();
        if field == "total" {
            cols.retain(|c| c.key != "total");
            cols.push(derived_null);
        }

        let asc = sort_rows(&rows, &cols, field, SortDirection::Asc);
        assert_eq!(asc.first().map(|r| r.id), Some(2));

        let desc = sort_rows(&rows, &cols, field, SortDirection::Desc);
        assert_eq!(desc.last().map(|r| r.id), Some(2));

        // independent of input position
        rows.rotate_left(1);
        let asc = sort_rows(&rows, &cols, field, SortDirection::Asc);
        assert_eq!(asc.first().map(|r| r.id), Some(2));
    }

    #[test]
    fn test_derived_total_matches_precomputed() {
        let rows = sample();
        let sorted = sort_rows(&rows, &columns(), "total", SortDirection::Asc);

        let mut expected = rows.clone();
        expected.sort_by(|a, b| {
            let ta = a.price.unwrap_or(0.0) * a.quantity.unwrap_or(0) as f64;
            let tb = b.price.unwrap_or(0.0) * b.quantity.unwrap_or(0) as f64;
            ta.partial_cmp(&tb).unwrap()
        });
        assert_eq!(ids(&sorted), ids(&expected));
    }

    #[test]
    fn test_derived_lookup_against_side_list() {
        let names: HashMap<i64, &'static str> = [(1, "Tools"), (2, "books")].into_iter().collect();
        let by_category = Column::derived("category_name", "Category", move |r: &Row| {
            r.category_id
                .and_then(|id| names.get(&id))
                .map(|n| SortValue::Text(n.to_string()))
        });
        let rows = vec![
            Row { category_id: Some(1), ..row(1, None, None, None) },
            Row { category_id: Some(2), ..row(2, None, None, None) },
            Row { category_id: Some(9), ..row(3, None, None, None) },
        ];
        let sorted = sort_rows(&rows, &[by_category], "category_name", SortDirection::Asc);
        assert_eq!(ids(&sorted), vec![3, 2, 1]);
    }

    #[test]
    fn test_text_is_case_insensitive_and_stable() {
        let sorted = sort_rows(&sample(), &columns(), "name", SortDirection::Asc);
        // "Apple" (2) and "apple" (4) tie and keep input order
        assert_eq!(ids(&sorted), vec![2, 4, 1, 3, 5]);

        let sorted = sort_rows(&sample(), &columns(), "name", SortDirection::Desc);
        assert_eq!(ids(&sorted), vec![5, 3, 1, 2, 4]);
    }

    #[test]
    fn test_dates_compare_chronologically_across_formats() {
        let mut rows = sample();
        rows[0].date = Some("Tue, 15 Apr 2025 10:00:00 GMT");
        rows[1].date = Some("2025-04-15T09:00:00Z");
        rows[2].date = Some("2024-12-31");
        rows[3].date = Some("not a date");
        rows[4].date = Some("2025-04-15 11:30:00");

        let sorted = sort_rows(&rows, &columns(), "date", SortDirection::Asc);
        assert_eq!(ids(&sorted), vec![4, 3, 2, 1, 5]);
    }

    #[test]
    fn test_unsortable_and_unknown_fields_are_noops() {
        let rows = sample();
        assert_eq!(ids(&sort_rows(&rows, &columns(), "notes", SortDirection::Asc)), ids(&rows));
        assert_eq!(ids(&sort_rows(&rows, &columns(), "missing", SortDirection::Desc)), ids(&rows));

        let mut state = SortState::new("price", SortDirection::Asc);
        assert!(!state.toggle("notes", &columns()));
        assert_eq!(state, SortState::new("price", SortDirection::Asc));
    }

    #[test]
    fn test_toggle_rules() {
        #[derive(Clone)]
        struct Cat {
            id: i64,
            name: &'static str,
        }
        let cats = vec![Cat { id: 1, name: "B" }, Cat { id: 2, name: "A" }];
        let cols = vec![
            Column::numeric("category_id", "ID", |c: &Cat| Some(c.id as f64)),
            Column::text("name", "Name", |c: &Cat| Some(c.name)),
        ];

        let mut state = SortState::default();
        assert!(state.toggle("name", &cols));
        let names: Vec<_> = state.apply(&cats, &cols).iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["A", "B"]);

        assert!(state.toggle("name", &cols));
        let names: Vec<_> = state.apply(&cats, &cols).iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(state.indicator("name"), Some("↓"));

        assert!(state.toggle("category_id", &cols));
        assert_eq!(state.direction, SortDirection::Asc);
        assert_eq!(state.indicator("name"), None);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert_eq!(parse_timestamp("1970-01-01T00:00:01Z"), Some(1000));
        assert_eq!(parse_timestamp("Thu, 01 Jan 1970 00:00:02 GMT"), Some(2000));
        assert_eq!(parse_timestamp("1970-01-02"), Some(86_400_000));
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
