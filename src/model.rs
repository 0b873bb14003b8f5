use crate::builder::CanBeAddedToModel;

/// Objective sense of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjSense {
    /// The objective is minimized.
    #[default]
    Minimize,
    /// The objective is maximized.
    Maximize,
}

/// Domain type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    /// A continuous variable.
    Continuous,
    /// An integer variable.
    Integer,
}

/// A variable of a [`LinearModel`].
#[derive(Debug, Clone, PartialEq)]
pub struct VarSpec {
    /// Variable name, used in solver logs.
    pub name: String,
    /// Lower bound.
    pub lb: f64,
    /// Upper bound, `f64::INFINITY` if unbounded.
    pub ub: f64,
    /// Objective coefficient.
    pub obj: f64,
    /// Domain type.
    pub var_type: VarType,
}

impl VarSpec {
    /// Whether both bounds coincide.
    pub fn is_fixed(&self) -> bool {
        self.lb == self.ub
    }
}

/// A linear row `lhs <= sum(coef * var) <= rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSpec {
    /// Row name, used in solver logs.
    pub name: String,
    /// Left-hand side, `f64::NEG_INFINITY` if absent.
    pub lhs: f64,
    /// Right-hand side, `f64::INFINITY` if absent.
    pub rhs: f64,
    /// Sparse coefficients as `(variable index, coefficient)`.
    pub coefs: Vec<(usize, f64)>,
}

/// A solver-independent description of one LP or MIP.
///
/// This is the request half of the solver collaborator contract: it is built
/// fresh for every solve and handed to a [`crate::Solver`] by reference.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LinearModel {
    name: String,
    sense: ObjSense,
    vars: Vec<VarSpec>,
    rows: Vec<RowSpec>,
}

impl LinearModel {
    /// Creates an empty minimization model.
    pub fn new(name: &str) -> Self {
        LinearModel {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Sets the objective sense to minimize.
    pub fn minimize(mut self) -> Self {
        self.sense = ObjSense::Minimize;
        self
    }

    /// Sets the objective sense to maximize.
    pub fn maximize(mut self) -> Self {
        self.sense = ObjSense::Maximize;
        self
    }

    /// Adds a variable, a row, or a collection of either.
    pub fn add<B: CanBeAddedToModel>(&mut self, item: B) -> B::Return {
        item.add(self)
    }

    pub(crate) fn push_var(&mut self, var: VarSpec) -> usize {
        self.vars.push(var);
        self.vars.len() - 1
    }

    pub(crate) fn push_row(&mut self, row: RowSpec) -> usize {
        self.rows.push(row);
        self.rows.len() - 1
    }

    /// Name of the model.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Objective sense.
    pub fn sense(&self) -> ObjSense {
        self.sense
    }

    /// Variables in creation order.
    pub fn vars(&self) -> &[VarSpec] {
        &self.vars
    }

    /// Rows in creation order.
    pub fn rows(&self) -> &[RowSpec] {
        &self.rows
    }

    /// Number of variables.
    pub fn n_vars(&self) -> usize {
        self.vars.len()
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Whether every variable is continuous, i.e. the model is an LP and has duals.
    pub fn is_continuous(&self) -> bool {
        self.vars
            .iter()
            .all(|var| var.var_type == VarType::Continuous)
    }
}
