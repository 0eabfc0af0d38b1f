use crate::{Reflect, TypeInfo};

/// Ordered input and output types of a method.
///
/// Inputs include the receiver at position 0, followed by the declared
/// parameters. Outputs are the declared return values: none for a method
/// returning `()`, two for `Result<T, E>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    inputs: Vec<TypeInfo>,
    outputs: Vec<TypeInfo>,
}

impl Signature {
    /// A signature with no inputs and no outputs.
    pub fn new() -> Self {
        Signature::default()
    }

    /// A signature whose first input is the receiver `T`.
    pub fn receiver<T: Reflect>() -> Self {
        Signature::new().input::<T>()
    }

    pub fn input<T: Reflect>(self) -> Self {
        self.with_input(T::type_info())
    }

    pub fn output<T: Reflect>(self) -> Self {
        self.with_output(T::type_info())
    }

    pub fn with_input(mut self, ty: TypeInfo) -> Self {
        self.inputs.push(ty);
        self
    }

    pub fn with_output(mut self, ty: TypeInfo) -> Self {
        self.outputs.push(ty);
        self
    }

    pub fn inputs(&self) -> &[TypeInfo] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[TypeInfo] {
        &self.outputs
    }

    pub fn num_in(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_out(&self) -> usize {
        self.outputs.len()
    }

    pub fn input_at(&self, index: usize) -> Option<&TypeInfo> {
        self.inputs.get(index)
    }

    pub fn output_at(&self, index: usize) -> Option<&TypeInfo> {
        self.outputs.get(index)
    }
}
