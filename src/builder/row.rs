use crate::builder::CanBeAddedToModel;
use crate::{LinearModel, RowSpec};

/// A builder for linear rows.
#[derive(Debug, Clone)]
pub struct RowBuilder<'a> {
    /// Left-hand side of the row
    pub(crate) lhs: f64,
    /// Right-hand side of the row
    pub(crate) rhs: f64,
    /// (Optional) name of the row
    pub(crate) name: Option<&'a str>,
    /// Coefficients of the row
    pub(crate) coefs: Vec<(usize, f64)>,
}

/// Creates a new default `RowBuilder`.
pub fn row<'a>() -> RowBuilder<'a> {
    RowBuilder::default()
}

impl Default for RowBuilder<'_> {
    fn default() -> Self {
        RowBuilder {
            lhs: f64::NEG_INFINITY,
            rhs: f64::INFINITY,
            name: None,
            coefs: Vec::new(),
        }
    }
}

impl<'a> RowBuilder<'a> {
    /// Creates a row of the form `expr <= val`.
    pub fn le(mut self, val: f64) -> Self {
        self.rhs = val;
        self.lhs = f64::NEG_INFINITY;
        self
    }

    /// Creates a row of the form `val <= expr`.
    pub fn ge(mut self, val: f64) -> Self {
        self.lhs = val;
        self.rhs = f64::INFINITY;
        self
    }

    /// Creates a row of the form `expr = val`.
    pub fn eq(mut self, val: f64) -> Self {
        self.lhs = val;
        self.rhs = val;
        self
    }

    /// Sets the name of the row.
    pub fn name(mut self, name: &'a str) -> RowBuilder<'a> {
        self.name = Some(name);
        self
    }

    /// Adds a coefficient to the row. Zero coefficients are dropped.
    pub fn coef(mut self, var: usize, coef: f64) -> Self {
        if coef != 0.0 {
            self.coefs.push((var, coef));
        }
        self
    }

    /// Adds multiple coefficients to the row.
    pub fn expr<I>(self, iter: I) -> Self
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        iter.into_iter()
            .fold(self, |row, (var, coef)| row.coef(var, coef))
    }
}

impl CanBeAddedToModel for RowBuilder<'_> {
    type Return = usize;
    fn add(self, model: &mut LinearModel) -> usize {
        let name = self
            .name
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("row{}", model.n_rows()));

        model.push_row(RowSpec {
            name,
            lhs: self.lhs,
            rhs: self.rhs,
            coefs: self.coefs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::var::var;

    #[test]
    fn test_row_builder() {
        let r = row().name("c").coef(0, 2.0).coef(1, 0.0).ge(3.0);
        assert_eq!(r.name, Some("c"));
        assert_eq!(r.coefs, vec![(0, 2.0)]);
        assert_eq!(r.lhs, 3.0);
        assert_eq!(r.rhs, f64::INFINITY);
    }

    #[test]
    fn test_eq_and_expr() {
        let r = row().expr([(0, 1.0), (2, -1.0)]).eq(0.0);
        assert_eq!((r.lhs, r.rhs), (0.0, 0.0));
        assert_eq!(r.coefs.len(), 2);
    }

    #[test]
    fn test_default_names() {
        let mut model = LinearModel::new("m");
        let x = model.add(var());
        model.add(row().coef(x, 1.0).le(1.0));
        model.add(row().coef(x, 1.0).ge(0.0));
        assert_eq!(model.rows()[1].name, "row1");
    }
}
