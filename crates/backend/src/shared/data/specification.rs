use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QuerySelect, QueryTrait, Value};

/// Composes optional filter criteria into a single AND-combined
/// [`Condition`] for one entity.
///
/// Every absent criterion contributes nothing, so an empty builder matches
/// all rows and the call order of the `and_*` methods does not change the
/// result set. Columns are typed, so a wrong relation or field is a compile
/// error at the call site.
pub struct SpecificationBuilder {
    condition: Condition,
}

impl SpecificationBuilder {
    pub fn new() -> Self {
        Self {
            condition: Condition::all(),
        }
    }

    /// Case-insensitive substring search over the given text columns.
    ///
    /// A present, non-blank query adds one OR-group of
    /// `LOWER(col) LIKE '%query%'` matches; otherwise no constraint.
    pub fn search<C: ColumnTrait>(mut self, query: Option<&str>, columns: &[C]) -> Self {
        if let Some(query) = query {
            let needle = query.trim().to_lowercase();
            if !needle.is_empty() {
                let pattern = format!("%{}%", needle);
                let mut any = Condition::any();
                for column in columns {
                    any = any.add(Expr::expr(Func::lower(Expr::col(*column))).like(pattern.as_str()));
                }
                self.condition = self.condition.add(any);
            }
        }
        self
    }

    /// Keeps rows having at least one related record, through the given
    /// junction entity, whose key column is in `values`.
    ///
    /// Membership is expressed as `owner_key IN (SELECT owner FROM junction
    /// WHERE value IN (...))`, which cannot duplicate rows and therefore
    /// needs no distinct pass before pagination.
    pub fn and_join_in<K, J, O, V>(
        mut self,
        values: Option<&[String]>,
        owner_key: K,
        _junction: J,
        junction_owner: O,
        junction_value: V,
    ) -> Self
    where
        K: ColumnTrait,
        J: EntityTrait,
        O: ColumnTrait,
        V: ColumnTrait,
    {
        if let Some(values) = values {
            if !values.is_empty() {
                let subquery = J::find()
                    .select_only()
                    .column(junction_owner)
                    .filter(junction_value.is_in(values.iter().cloned()))
                    .into_query();
                self.condition = self.condition.add(owner_key.in_subquery(subquery));
            }
        }
        self
    }

    /// Optional lower-bound filter (`column >= value`).
    pub fn and_gte<C, V>(mut self, value: Option<V>, column: C) -> Self
    where
        C: ColumnTrait,
        V: Into<Value>,
    {
        if let Some(value) = value {
            self.condition = self.condition.add(column.gte(value));
        }
        self
    }

    /// Optional exact-match filter (`column = value`).
    pub fn and_eq<C, V>(mut self, value: Option<V>, column: C) -> Self
    where
        C: ColumnTrait,
        V: Into<Value>,
    {
        if let Some(value) = value {
            self.condition = self.condition.add(column.eq(value));
        }
        self
    }

    pub fn build(self) -> Condition {
        self.condition
    }
}

impl Default for SpecificationBuilder {
    fn default() -> Self {
        Self::new()
    }
}
