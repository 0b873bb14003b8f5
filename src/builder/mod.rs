/// This module contains `VarBuilder` for easily creating variables.
pub mod var;

/// This module contains `RowBuilder` for easily creating linear rows.
pub mod row;

use crate::LinearModel;

/// Something that can be added to a [`LinearModel`].
pub trait CanBeAddedToModel {
    /// The return type after adding to the model (an index, or a vector of them).
    type Return;
    /// How to add the value to the model.
    fn add(self, model: &mut LinearModel) -> Self::Return;
}

impl<T, I> CanBeAddedToModel for I
where
    T: CanBeAddedToModel,
    I: IntoIterator<Item = T>,
{
    type Return = Vec<T::Return>;
    fn add(self, model: &mut LinearModel) -> Self::Return {
        self.into_iter().map(|x| x.add(model)).collect()
    }
}
