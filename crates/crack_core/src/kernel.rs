//! Two-argument kernels with a "bind the context, then evaluate" usage.
//!
//! A [`Kernel`] wraps a raw function `f(&context, arg)`. Callers either bind a
//! context explicitly with [`Kernel::bind`], which yields an independent
//! [`BoundKernel`], or store one inside the kernel with [`Kernel::prepare`].
//! Preparing again silently replaces the previous context. The prepared slot
//! is not meant to be shared between concurrent binders: use `bind` for that.

use std::marker::PhantomData;

use crate::error::{CrackError, CrackResult};
use crate::traits::Evaluate;

pub struct Kernel<C, A, F>
where
    F: Fn(&C, A) -> f64,
{
    func: F,
    prepared: Option<C>,
    _arg: PhantomData<fn(A)>,
}

impl<C, A, F> Kernel<C, A, F>
where
    F: Fn(&C, A) -> f64,
{
    pub fn new(func: F) -> Self {
        Self {
            func,
            prepared: None,
            _arg: PhantomData,
        }
    }

    /// Evaluates with an explicit context, ignoring any prepared one.
    pub fn evaluate_with(&self, context: &C, arg: A) -> f64 {
        (self.func)(context, arg)
    }

    pub fn bind(&self, context: C) -> BoundKernel<'_, C, A, F> {
        BoundKernel {
            func: &self.func,
            context,
            _arg: PhantomData,
        }
    }

    pub fn prepare(&mut self, context: C) {
        self.prepared = Some(context);
    }

    pub fn prepared_context(&self) -> Option<&C> {
        self.prepared.as_ref()
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared.is_some()
    }

    pub fn evaluate_prepared(&self, arg: A) -> CrackResult<f64> {
        let context = self.prepared.as_ref().ok_or(CrackError::UnboundKernel)?;
        Ok((self.func)(context, arg))
    }
}

/// A kernel with its context fixed; only the free argument remains.
pub struct BoundKernel<'f, C, A, F>
where
    F: Fn(&C, A) -> f64,
{
    func: &'f F,
    context: C,
    _arg: PhantomData<fn(A)>,
}

impl<C, A, F> BoundKernel<'_, C, A, F>
where
    F: Fn(&C, A) -> f64,
{
    pub fn context(&self) -> &C {
        &self.context
    }
}

impl<C, A, F> Evaluate<A> for BoundKernel<'_, C, A, F>
where
    F: Fn(&C, A) -> f64,
{
    fn evaluate(&self, arg: A) -> f64 {
        (self.func)(&self.context, arg)
    }
}
