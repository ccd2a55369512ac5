//! # Sorting
//!
//! Field/direction sort state over a list of records. The sort is stable;
//! rows without a value for the field go last ascending and first
//! descending.

use std::cmp::Ordering;

use super::record::Record;

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

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

/// Current sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState<F> {
    field: Option<F>,
    direction: SortDirection,
    initial_field: Option<F>,
    initial_direction: SortDirection,
}

impl<F: Copy + Eq> Default for SortState<F> {
    fn default() -> Self {
        Self::new(None, SortDirection::Asc)
    }
}

impl<F: Copy + Eq> SortState<F> {
    pub fn new(initial_field: Option<F>, initial_direction: SortDirection) -> Self {
        Self {
            field: initial_field,
            direction: initial_direction,
            initial_field,
            initial_direction,
        }
    }

    pub fn field(&self) -> Option<F> {
        self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Select a column: the active one flips direction, a new one starts
    /// ascending.
    pub fn handle_sort(&mut self, field: F) {
        if self.field == Some(field) {
            self.direction = self.direction.toggled();
        } else {
            self.field = Some(field);
            self.direction = SortDirection::Asc;
        }
    }

    pub fn reset(&mut self) {
        self.field = self.initial_field;
        self.direction = self.initial_direction;
    }

    /// Sorted copy of `items` using `key` to read the active field.
    /// Without an active field the input order is kept.
    pub fn sort_by_key<T, K, G>(&self, items: &[T], key: G) -> Vec<T>
    where
        T: Clone,
        K: Ord,
        G: Fn(&T, F) -> Option<K>,
    {
        let mut sorted = items.to_vec();
        let Some(field) = self.field else {
            return sorted;
        };

        let direction = self.direction;
        sorted.sort_by(|a, b| {
            // `None` ranks above every value: last ascending, first descending
            let ascending = match (key(a, field), key(b, field)) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(&b),
            };
            match direction {
                SortDirection::Asc => ascending,
                SortDirection::Desc => ascending.reverse(),
            }
        });
        sorted
    }

    /// Sorted copy of a slice of records.
    pub fn apply<R>(&self, items: &[R]) -> Vec<R>
    where
        R: Record<Field = F> + Clone,
    {
        self.sort_by_key(items, |item, field| item.field(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        q: Option<i64>,
    }

    fn rows(values: &[Option<i64>]) -> Vec<Row> {
        values.iter().map(|q| Row { q: *q }).collect()
    }

    fn qs(rows: &[Row]) -> Vec<Option<i64>> {
        rows.iter().map(|r| r.q).collect()
    }

    #[test]
    fn test_ascending_then_descending() {
        let items = rows(&[Some(3), Some(1), Some(2)]);
        let mut sort = SortState::default();

        sort.handle_sort("q");
        assert_eq!(sort.direction(), SortDirection::Asc);
        assert_eq!(qs(&sort.sort_by_key(&items, |r, _| r.q)), vec![Some(1), Some(2), Some(3)]);

        sort.handle_sort("q");
        assert_eq!(sort.direction(), SortDirection::Desc);
        assert_eq!(qs(&sort.sort_by_key(&items, |r, _| r.q)), vec![Some(3), Some(2), Some(1)]);
    }

    #[test]
    fn test_missing_values_last_ascending_first_descending() {
        let items = rows(&[None, Some(2), Some(1)]);
        let mut sort = SortState::new(Some("q"), SortDirection::Asc);
        assert_eq!(qs(&sort.sort_by_key(&items, |r, _| r.q)), vec![Some(1), Some(2), None]);

        sort.handle_sort("q");
        assert_eq!(qs(&sort.sort_by_key(&items, |r, _| r.q)), vec![None, Some(2), Some(1)]);

        let sort = SortState::new(Some("q"), SortDirection::Desc);
        let items = rows(&[Some(1), None, Some(3), None]);
        assert_eq!(
            qs(&sort.sort_by_key(&items, |r, _| r.q)),
            vec![None, None, Some(3), Some(1)]
        );
    }

    #[test]
    fn test_new_field_resets_to_ascending_and_reset_restores_initial() {
        let mut sort = SortState::new(Some("price"), SortDirection::Desc);
        sort.handle_sort("name");
        assert_eq!(sort.field(), Some("name"));
        assert_eq!(sort.direction(), SortDirection::Asc);

        sort.reset();
        assert_eq!(sort.field(), Some("price"));
        assert_eq!(sort.direction(), SortDirection::Desc);
    }

    #[test]
    fn test_no_field_keeps_order() {
        let items = rows(&[Some(3), Some(1)]);
        let sort: SortState<&str> = SortState::default();
        assert_eq!(sort.sort_by_key(&items, |r, _| r.q), items);
    }
}
