use std::fmt;

use crate::{BnpError, BnpResult, Catalog};

/// The two kinds of master columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Cuts one stock sheet into strips; costs one stock sheet.
    Stock,
    /// Cuts one strip into items; costs nothing.
    Strip,
}

impl ColumnKind {
    /// Objective coefficient of a column of this kind in the master problem.
    pub fn cost(self) -> f64 {
        match self {
            ColumnKind::Stock => 1.0,
            ColumnKind::Strip => 0.0,
        }
    }
}

/// Stable identity of a column inside a pool.
///
/// Pools only ever grow by appending, so a reference taken at one node names the
/// same column in every descendant, regardless of how many stock columns the
/// descendants add in front of the strip columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ColumnRef {
    /// Index into the stock-cutting columns.
    Stock(usize),
    /// Index into the strip-cutting columns.
    Strip(usize),
}

impl ColumnRef {
    /// Kind of the referenced column.
    pub fn kind(self) -> ColumnKind {
        match self {
            ColumnRef::Stock(_) => ColumnKind::Stock,
            ColumnRef::Strip(_) => ColumnKind::Strip,
        }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-based like the variable names in solver logs
        match self {
            ColumnRef::Stock(k) => write!(f, "Y_{}", k + 1),
            ColumnRef::Strip(p) => write!(f, "X_{}", p + 1),
        }
    }
}

/// A master column: one coefficient per strip row, then one per item row.
pub type Column = Vec<f64>;

/// The stock-cutting and strip-cutting columns known at one node.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnPool {
    n_strip_types: usize,
    n_item_types: usize,
    stock: Vec<Column>,
    strip: Vec<Column>,
}

impl ColumnPool {
    /// Creates an empty pool for `n_strip_types + n_item_types` master rows.
    pub fn new(n_strip_types: usize, n_item_types: usize) -> Self {
        ColumnPool {
            n_strip_types,
            n_item_types,
            stock: Vec::new(),
            strip: Vec::new(),
        }
    }

    /// An empty pool shaped for `catalog`.
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self::new(catalog.n_strip_types(), catalog.n_item_types())
    }

    /// A pool with a trivially feasible set of columns.
    ///
    /// Each strip type gets a stock column filled with as many strips of that
    /// type as fit across the stock width, and each (strip type, item type) pair
    /// gets a strip column filled with as many items of that type as fit along
    /// the stock length.
    pub fn initial(catalog: &Catalog) -> Self {
        let j_num = catalog.n_strip_types();
        let mut pool = Self::for_catalog(catalog);

        for (j, strip) in catalog.strip_types.iter().enumerate() {
            let mut col = vec![0.0; pool.n_rows()];
            col[j] = (catalog.stock.width / strip.width).floor();
            pool.stock.push(col);
        }
        for j in 0..j_num {
            for (i, item) in catalog.item_types.iter().enumerate() {
                let mut col = vec![0.0; pool.n_rows()];
                col[j] = -1.0;
                col[j_num + i] = (catalog.stock.length / item.length).floor();
                pool.strip.push(col);
            }
        }
        pool
    }

    /// Number of strip rows (`J`).
    pub fn n_strip_types(&self) -> usize {
        self.n_strip_types
    }

    /// Number of master rows (`J + N`); the length of every column.
    pub fn n_rows(&self) -> usize {
        self.n_strip_types + self.n_item_types
    }

    /// Stock-cutting columns.
    pub fn stock(&self) -> &[Column] {
        &self.stock
    }

    /// Strip-cutting columns.
    pub fn strip(&self) -> &[Column] {
        &self.strip
    }

    /// Total number of columns, i.e. master variables.
    pub fn len(&self) -> usize {
        self.stock.len() + self.strip.len()
    }

    /// Whether the pool has no columns at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the referenced column.
    pub fn get(&self, col: ColumnRef) -> Option<&Column> {
        match col {
            ColumnRef::Stock(k) => self.stock.get(k),
            ColumnRef::Strip(p) => self.strip.get(p),
        }
    }

    /// Master variable position of a column: stock columns first, then strip columns.
    pub fn position(&self, col: ColumnRef) -> usize {
        match col {
            ColumnRef::Stock(k) => k,
            ColumnRef::Strip(p) => self.stock.len() + p,
        }
    }

    /// Inverse of [`ColumnPool::position`].
    pub fn column_ref(&self, position: usize) -> ColumnRef {
        if position < self.stock.len() {
            ColumnRef::Stock(position)
        } else {
            ColumnRef::Strip(position - self.stock.len())
        }
    }

    /// Iterates over all columns in master variable order.
    pub fn iter(&self) -> impl Iterator<Item = (ColumnRef, &Column)> {
        let stock = self
            .stock
            .iter()
            .enumerate()
            .map(|(k, col)| (ColumnRef::Stock(k), col));
        let strip = self
            .strip
            .iter()
            .enumerate()
            .map(|(p, col)| (ColumnRef::Strip(p), col));
        stock.chain(strip)
    }

    /// Whether an identical column of the same kind is already present.
    pub fn contains(&self, kind: ColumnKind, col: &[f64]) -> bool {
        let cols = match kind {
            ColumnKind::Stock => &self.stock,
            ColumnKind::Strip => &self.strip,
        };
        cols.iter().any(|c| c.as_slice() == col)
    }

    /// Appends a column unconditionally.
    pub fn push(&mut self, kind: ColumnKind, col: Column) -> BnpResult<ColumnRef> {
        if col.len() != self.n_rows() {
            return Err(BnpError::ColumnLength {
                expected: self.n_rows(),
                found: col.len(),
            });
        }
        let cols = match kind {
            ColumnKind::Stock => &mut self.stock,
            ColumnKind::Strip => &mut self.strip,
        };
        cols.push(col);
        let idx = cols.len() - 1;
        Ok(match kind {
            ColumnKind::Stock => ColumnRef::Stock(idx),
            ColumnKind::Strip => ColumnRef::Strip(idx),
        })
    }

    /// Appends a column unless an identical one is already present.
    ///
    /// Returns `None` for a duplicate.
    pub fn admit(&mut self, kind: ColumnKind, col: Column) -> BnpResult<Option<ColumnRef>> {
        if self.contains(kind, &col) {
            return Ok(None);
        }
        self.push(kind, col).map(Some)
    }
}
