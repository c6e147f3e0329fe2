//! Filter form integration
//!
//! A form layer hands the compiler validated filter data, a combination mode
//! and optional ordering. Request binding and validation live in the form
//! implementation.

use crate::error::{FilterError, Result};
use crate::query::QueryBuilder;

use super::compiler::FilterCompiler;
use super::sort::sort_by;
use super::types::{CombinationMode, FilterSet, OrderBy};

/// A source of validated filter data
pub trait FilterForm {
    /// Validated filter data, `None` when not submitted or invalid
    fn filter_data(&self) -> Option<FilterSet>;

    /// How top-level entries are combined
    fn mode(&self) -> CombinationMode {
        CombinationMode::And
    }

    /// Optional ordering applied after the filters
    fn order_by(&self) -> Option<OrderBy> {
        None
    }
}

/// A form holding already-validated data
#[derive(Debug, Clone, Default)]
pub struct StaticFilterForm {
    data: Option<FilterSet>,
    mode: CombinationMode,
    order_by: Option<OrderBy>,
}

impl StaticFilterForm {
    /// A submitted, valid form
    pub fn submitted(data: FilterSet) -> Self {
        Self {
            data: Some(data),
            ..Default::default()
        }
    }

    /// A form that was never submitted
    pub fn unsubmitted() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: CombinationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }
}

impl FilterForm for StaticFilterForm {
    fn filter_data(&self) -> Option<FilterSet> {
        self.data.clone()
    }

    fn mode(&self) -> CombinationMode {
        self.mode
    }

    fn order_by(&self) -> Option<OrderBy> {
        self.order_by.clone()
    }
}

impl FilterCompiler {
    /// Apply a form's data (when present) and then its ordering
    pub fn apply_form<'q, Q>(&self, qb: &'q mut Q, form: &dyn FilterForm) -> Result<&'q mut Q>
    where
        Q: QueryBuilder + ?Sized,
    {
        match form.filter_data() {
            Some(data) => {
                self.apply(qb, &data, form.mode())?;
            }
            None => tracing::trace!("Filter form has no data, skipping filters"),
        }
        if let Some(order_by) = form.order_by() {
            sort_by(qb, &order_by)?;
        }
        Ok(qb)
    }
}

/// Filter forms looked up by name
#[derive(Default)]
pub struct FormRegistry {
    forms: Vec<(String, Box<dyn FilterForm>)>,
}

impl FormRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a form, replacing any form with the same name
    pub fn register(&mut self, name: impl Into<String>, form: Box<dyn FilterForm>) {
        let name = name.into();
        self.forms.retain(|(n, _)| *n != name);
        self.forms.push((name, form));
    }

    pub fn get(&self, name: &str) -> Result<&dyn FilterForm> {
        self.forms
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, form)| form.as_ref())
            .ok_or_else(|| FilterError::InvalidFilterForm {
                name: name.to_string(),
            })
    }

    /// Apply the form registered under `name`
    pub fn apply<'q, Q>(
        &self,
        compiler: &FilterCompiler,
        qb: &'q mut Q,
        name: &str,
    ) -> Result<&'q mut Q>
    where
        Q: QueryBuilder + ?Sized,
    {
        let form = self.get(name)?;
        compiler.apply_form(qb, form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SelectQuery;

    fn base() -> SelectQuery {
        SelectQuery::new().select("t").from("test", "t")
    }

    struct ExampleFilterForm {
        example: Option<String>,
    }

    impl FilterForm for ExampleFilterForm {
        fn filter_data(&self) -> Option<FilterSet> {
            let example = self.example.clone()?;
            Some([("example__like", example)].into_iter().collect())
        }
    }

    #[test]
    fn submitted_form_is_applied() {
        let mut qb = base();
        let form = ExampleFilterForm {
            example: Some("john".to_string()),
        };
        FilterCompiler::default().apply_form(&mut qb, &form).unwrap();
        assert_eq!(
            qb.to_dql_inlined(),
            r#"SELECT t FROM test t WHERE t.example LIKE "%john%""#
        );
    }

    #[test]
    fn unsubmitted_form_leaves_query_untouched() {
        let mut qb = base();
        FilterCompiler::default()
            .apply_form(&mut qb, &StaticFilterForm::unsubmitted())
            .unwrap();
        assert_eq!(qb.to_dql(), "SELECT t FROM test t");
    }

    #[test]
    fn form_mode_and_ordering() {
        let mut qb = base();
        let data: FilterSet = [("a__null", true), ("b__null", false)].into_iter().collect();
        let form = StaticFilterForm::submitted(data)
            .with_mode(CombinationMode::Or)
            .with_order_by([("a", "asc")].into_iter().collect());

        FilterCompiler::default().apply_form(&mut qb, &form).unwrap();
        assert_eq!(
            qb.to_dql(),
            "SELECT t FROM test t WHERE t.a IS NULL OR t.b IS NOT NULL ORDER BY t.a asc"
        );
    }

    #[test]
    fn registry_applies_named_form() {
        let mut registry = FormRegistry::new();
        let data: FilterSet = [("age__gt", 2)].into_iter().collect();
        registry.register("people", Box::new(StaticFilterForm::submitted(data)));

        let mut qb = base();
        registry
            .apply(&FilterCompiler::default(), &mut qb, "people")
            .unwrap();
        assert_eq!(qb.to_dql(), "SELECT t FROM test t WHERE t.age > 2");
    }

    #[test]
    fn registry_rejects_unknown_form() {
        let registry = FormRegistry::new();
        let mut qb = base();
        let err = registry
            .apply(&FilterCompiler::default(), &mut qb, "missing")
            .unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidFilterForm {
                name: "missing".to_string()
            }
        );
    }
}
