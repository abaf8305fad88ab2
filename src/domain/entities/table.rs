use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

/// Comparable value derived from a row for client-side sorting.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(f64),
    /// Anything else. Compares equal to every value.
    Other,
}

impl SortValue {
    pub fn compare(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (SortValue::Number(a), SortValue::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            _ => Ordering::Equal,
        }
    }

    fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => SortValue::Text(text.clone()),
            serde_json::Value::Number(number) => number
                .as_f64()
                .map(SortValue::Number)
                .unwrap_or(SortValue::Other),
            _ => SortValue::Other,
        }
    }
}

impl From<String> for SortValue {
    fn from(value: String) -> Self {
        SortValue::Text(value)
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        SortValue::Text(value.to_string())
    }
}

impl From<i64> for SortValue {
    fn from(value: i64) -> Self {
        SortValue::Number(value as f64)
    }
}

impl From<f64> for SortValue {
    fn from(value: f64) -> Self {
        SortValue::Number(value)
    }
}

/// How a column derives its sort value from a row.
pub enum SortKey<T> {
    /// Named field of the row's serialized form.
    Field(&'static str),
    Derived(Rc<dyn Fn(&T) -> SortValue>),
}

impl<T> Clone for SortKey<T> {
    fn clone(&self) -> Self {
        match self {
            SortKey::Field(name) => SortKey::Field(name),
            SortKey::Derived(accessor) => SortKey::Derived(accessor.clone()),
        }
    }
}

impl<T> PartialEq for SortKey<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SortKey::Field(a), SortKey::Field(b)) => a == b,
            (SortKey::Derived(a), SortKey::Derived(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T> fmt::Debug for SortKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Field(name) => f.debug_tuple("Field").field(name).finish(),
            SortKey::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

impl<T: Serialize> SortKey<T> {
    pub fn value_of(&self, row: &T) -> SortValue {
        match self {
            SortKey::Derived(accessor) => accessor(row),
            SortKey::Field(name) => serde_json::to_value(row)
                .ok()
                .as_ref()
                .and_then(|json| json.get(*name))
                .map(SortValue::from_json)
                .unwrap_or(SortValue::Other),
        }
    }
}

/// Declarative description of one table column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor<T> {
    pub key: &'static str,
    pub label: String,
    /// Relative width weight.
    pub flex: f32,
    pub sortable: bool,
    pub sort_key: Option<SortKey<T>>,
}

impl<T> ColumnDescriptor<T> {
    pub fn new(key: &'static str, label: impl Into<String>, flex: f32) -> Self {
        Self {
            key,
            label: label.into(),
            flex,
            sortable: true,
            sort_key: None,
        }
    }

    pub fn sort_by_field(mut self, field: &'static str) -> Self {
        self.sort_key = Some(SortKey::Field(field));
        self
    }

    pub fn sort_by<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&T) -> SortValue + 'static,
    {
        self.sort_key = Some(SortKey::Derived(Rc::new(accessor)));
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

/// Active sort column of a table and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: Option<&str>, direction: SortDirection) -> Self {
        Self {
            column: column.map(str::to_string),
            direction,
        }
    }

    /// Header click: flip the active column, otherwise sort the new one ascending.
    /// Non-sortable columns leave the state untouched.
    pub fn toggle<T>(&mut self, column: &ColumnDescriptor<T>) -> bool {
        if !column.sortable {
            return false;
        }
        if self.is_active(column.key) {
            self.direction = self.direction.flipped();
        } else {
            self.column = Some(column.key.to_string());
            self.direction = SortDirection::Asc;
        }
        true
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.column.as_deref() == Some(key)
    }
}

/// Sorts the loaded page client-side. Stable; unknown, non-sortable or
/// key-less columns keep the input order.
pub fn sort_rows<'a, T: Serialize>(
    data: &'a [T],
    columns: &[ColumnDescriptor<T>],
    state: &SortState,
) -> Vec<&'a T> {
    let mut rows: Vec<&T> = data.iter().collect();
    let Some(active) = state.column.as_deref() else {
        return rows;
    };
    let Some(column) = columns.iter().find(|col| col.key == active) else {
        return rows;
    };
    if !column.sortable {
        return rows;
    }
    let Some(sort_key) = column.sort_key.as_ref() else {
        return rows;
    };

    let mut keyed: Vec<(SortValue, &T)> = rows
        .drain(..)
        .map(|row| (sort_key.value_of(row), row))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| match state.direction {
        SortDirection::Asc => a.compare(b),
        SortDirection::Desc => b.compare(a),
    });
    keyed.into_iter().map(|(_, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, PartialEq)]
    struct Row {
        name: &'static str,
        age: i64,
        active: bool,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                name: "b",
                age: 30,
                active: true,
            },
            Row {
                name: "a",
                age: 41,
                active: false,
            },
            Row {
                name: "c",
                age: 25,
                active: true,
            },
        ]
    }

    fn columns() -> Vec<ColumnDescriptor<Row>> {
        vec![
            ColumnDescriptor::new("name", "Nombre", 1.0).sort_by_field("name"),
            ColumnDescriptor::new("age", "Edad", 0.5).sort_by(|row: &Row| row.age.into()),
            ColumnDescriptor::new("active", "Activo", 0.5).sort_by_field("active"),
            ColumnDescriptor::new("actions", "Acciones", 0.3)
                .sort_by_field("name")
                .unsortable(),
        ]
    }

    fn names(sorted: &[&Row]) -> Vec<&'static str> {
        sorted.iter().map(|row| row.name).collect()
    }

    #[test]
    fn sorts_by_field_ascending() {
        let data = rows();
        let state = SortState::new(Some("name"), SortDirection::Asc);

        assert_eq!(names(&sort_rows(&data, &columns(), &state)), ["a", "b", "c"]);
    }

    #[test]
    fn toggling_twice_returns_to_ascending() {
        let data = rows();
        let cols = columns();
        let mut state = SortState::default();

        state.toggle(&cols[0]);
        let first = names(&sort_rows(&data, &cols, &state));
        state.toggle(&cols[0]);
        assert_eq!(names(&sort_rows(&data, &cols, &state)), ["c", "b", "a"]);
        state.toggle(&cols[0]);

        assert_eq!(state.direction, SortDirection::Asc);
        assert_eq!(names(&sort_rows(&data, &cols, &state)), first);
    }

    #[test]
    fn switching_column_starts_ascending() {
        let cols = columns();
        let mut state = SortState::new(Some("name"), SortDirection::Desc);

        state.toggle(&cols[1]);

        assert_eq!(state, SortState::new(Some("age"), SortDirection::Asc));
        assert_eq!(names(&sort_rows(&rows(), &cols, &state)), ["c", "b", "a"]);
    }

    #[test]
    fn unsortable_column_ignores_clicks_and_keeps_order() {
        let data = rows();
        let cols = columns();
        let mut state = SortState::default();

        assert!(!state.toggle(&cols[3]));
        assert_eq!(state, SortState::default());

        let forced = SortState::new(Some("actions"), SortDirection::Asc);
        assert_eq!(names(&sort_rows(&data, &cols, &forced)), ["b", "a", "c"]);
    }

    #[test]
    fn non_text_non_number_values_compare_equal() {
        let data = rows();
        let state = SortState::new(Some("active"), SortDirection::Desc);

        assert_eq!(names(&sort_rows(&data, &columns(), &state)), ["b", "a", "c"]);
        assert_eq!(
            SortValue::Text("x".into()).compare(&SortValue::Number(1.0)),
            Ordering::Equal
        );
    }

    #[test]
    fn text_comparison_ignores_case_first() {
        assert_eq!(
            SortValue::from("alba").compare(&SortValue::from("Bruno")),
            Ordering::Less
        );
    }
}
