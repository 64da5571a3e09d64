//! Backend contract.

use posit_diagnostic::ResolveResult;
use posit_ir::{ConcreteArgument, Variant};

/// Target that receives fully marshalled calls.
///
/// `args` are in the target operation's declared parameter order. A backend
/// may still reject a call (a live model rejects handles it does not hold),
/// but it must do so before applying any part of it.
pub trait Backend {
    fn accept(&mut self, variant: &Variant, args: &[ConcreteArgument]) -> ResolveResult<()>;
}

impl<B: Backend + ?Sized> Backend for &mut B {
    fn accept(&mut self, variant: &Variant, args: &[ConcreteArgument]) -> ResolveResult<()> {
        (**self).accept(variant, args)
    }
}

/// Backend that stores every call it accepts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingBackend {
    pub calls: Vec<(String, Vec<ConcreteArgument>)>,
}

impl Backend for RecordingBackend {
    fn accept(&mut self, variant: &Variant, args: &[ConcreteArgument]) -> ResolveResult<()> {
        self.calls.push((variant.target().to_string(), args.to_vec()));
        Ok(())
    }
}
