use crate::builder::CanBeAddedToModel;
use crate::{LinearModel, VarSpec, VarType};

/// A builder for variables.
#[derive(Debug, Clone)]
pub struct VarBuilder<'a> {
    name: Option<&'a str>,
    obj: f64,
    lb: f64,
    ub: f64,
    var_type: VarType,
}

/// Starts a continuous variable on `[0, inf)` with zero cost.
pub fn var<'a>() -> VarBuilder<'a> {
    VarBuilder::default()
}

impl Default for VarBuilder<'_> {
    fn default() -> Self {
        VarBuilder {
            name: None,
            obj: 0.0,
            lb: 0.0,
            ub: f64::INFINITY,
            var_type: VarType::Continuous,
        }
    }
}

impl<'a> VarBuilder<'a> {
    /// Makes the variable integral on `[lb, ub]`, as in a pricing knapsack.
    pub fn integer(mut self, lb: f64, ub: f64) -> Self {
        self.lb = lb;
        self.ub = ub;
        self.var_type = VarType::Integer;
        self
    }

    /// Makes the variable continuous on `[lb, ub]`.
    pub fn continuous(mut self, lb: f64, ub: f64) -> Self {
        self.lb = lb;
        self.ub = ub;
        self.var_type = VarType::Continuous;
        self
    }

    /// Sets both bounds to `(lb, ub)` keeping the domain type.
    pub fn bounds(mut self, (lb, ub): (f64, f64)) -> Self {
        self.lb = lb;
        self.ub = ub;
        self
    }

    /// Sets the name of the variable.
    pub fn name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    /// Sets the objective coefficient of the variable.
    pub fn obj(mut self, obj: f64) -> Self {
        self.obj = obj;
        self
    }
}

impl CanBeAddedToModel for VarBuilder<'_> {
    type Return = usize;
    fn add(self, model: &mut LinearModel) -> usize {
        let name = self
            .name
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("x{}", model.n_vars()));

        model.push_var(VarSpec {
            name,
            lb: self.lb,
            ub: self.ub,
            obj: self.obj,
            var_type: self.var_type,
        })
    }
}
