//! Argument marshalling.
//!
//! Every slot payload is converted once, element by element, under its
//! declared type. Rules then assemble call arguments from the converted
//! slots. An array is never copied as a block: each element becomes its
//! own `ConcreteArgument` according to the element's own view kind.

use posit_diagnostic::{MalformedDetail, ResolveError, ResolveResult};
use posit_ir::{
    signature_of, ArgumentSlot, ArgumentValue, ConcreteArgument, PairComponent, Signature,
    SlotType, TransformRule, VarRef, ViewKind,
};
use posit_stack::ensure_sufficient_stack;

/// Converted slot payloads of one call, ready to be assembled by rules.
///
/// `definition` is only used to label errors.
pub struct Marshaller<'a> {
    definition: &'a str,
    slots: &'a [ArgumentSlot],
    actual: Signature,
    values: Vec<ConcreteArgument>,
}

impl<'a> Marshaller<'a> {
    /// Convert `args` under the declared `slots`.
    ///
    /// Fails when the argument count differs from the slot count, when any
    /// element's kind differs from its slot's declared kind, or when a
    /// pinned array length is violated.
    pub fn new(
        definition: &'a str,
        slots: &'a [ArgumentSlot],
        args: &[ArgumentValue],
    ) -> ResolveResult<Self> {
        if args.len() != slots.len() {
            return Err(ResolveError::malformed(
                definition,
                MalformedDetail::ArgumentCount {
                    found: args.len(),
                    expected: vec![slots.len()],
                },
            ));
        }
        let mut marshaller = Marshaller {
            definition,
            slots,
            actual: signature_of(args),
            values: Vec::with_capacity(args.len()),
        };
        for (index, (slot, arg)) in slots.iter().zip(args).enumerate() {
            if let (Some(expected), Some(items)) = (slot.len, arg.as_array()) {
                if items.len() != expected {
                    return Err(marshaller.malformed(MalformedDetail::ArrayLength {
                        slot: index,
                        expected,
                        found: items.len(),
                    }));
                }
            }
            let value = marshaller.convert(index, slot.ty, arg)?;
            marshaller.values.push(value);
        }
        Ok(marshaller)
    }

    /// Produce one call argument.
    pub fn marshal(&self, rule: &TransformRule) -> ResolveResult<ConcreteArgument> {
        match rule {
            TransformRule::Direct(slot) => self.value(*slot).cloned(),
            TransformRule::ProjectPair(slot, component) => self.project_slot(*slot, *component),
            TransformRule::Concatenate(first, second) => self.concatenate(*first, *second, false),
            TransformRule::ConcatenateNegated(first, second) => {
                self.concatenate(*first, *second, true)
            }
            TransformRule::Gather(slots) => slots
                .iter()
                .map(|&slot| self.value(slot).cloned())
                .collect::<ResolveResult<Vec<_>>>()
                .map(ConcreteArgument::Array),
            TransformRule::Literal(literal) => Ok(ConcreteArgument::Literal(literal.clone())),
        }
    }

    /// Produce every call argument, in rule order.
    pub fn marshal_all(&self, rules: &[TransformRule]) -> ResolveResult<Vec<ConcreteArgument>> {
        rules.iter().map(|rule| self.marshal(rule)).collect()
    }

    fn malformed(&self, detail: MalformedDetail) -> ResolveError {
        ResolveError::malformed(self.definition, detail)
    }

    fn value(&self, slot: usize) -> ResolveResult<&ConcreteArgument> {
        self.values.get(slot).ok_or_else(|| {
            self.malformed(MalformedDetail::MissingSlot {
                slot,
                available: self.values.len(),
            })
        })
    }

    fn slot_type(&self, slot: usize) -> ResolveResult<SlotType> {
        self.slots.get(slot).map(|s| s.ty).ok_or_else(|| {
            self.malformed(MalformedDetail::MissingSlot {
                slot,
                available: self.slots.len(),
            })
        })
    }

    /// Typed conversion of one payload; `slot` and `declared` label errors.
    fn convert(
        &self,
        slot: usize,
        declared: SlotType,
        value: &ArgumentValue,
    ) -> ResolveResult<ConcreteArgument> {
        self.convert_at(slot, declared, declared, value)
    }

    fn convert_at(
        &self,
        slot: usize,
        declared: SlotType,
        expected: SlotType,
        value: &ArgumentValue,
    ) -> ResolveResult<ConcreteArgument> {
        let mismatch = || {
            self.malformed(MalformedDetail::ElementKind {
                slot,
                expected: declared,
                found: value.actual_type(),
            })
        };
        match (expected.element(), value) {
            (Some(element), ArgumentValue::Array(items)) => ensure_sufficient_stack(|| {
                items
                    .iter()
                    .map(|item| self.convert_at(slot, declared, element, item))
                    .collect::<ResolveResult<Vec<_>>>()
                    .map(ConcreteArgument::Array)
            }),
            (None, leaf)
                if leaf
                    .view_kind()
                    .is_some_and(|kind| ViewKind::compatible(expected.kind, kind)) =>
            {
                convert_leaf(leaf).ok_or_else(mismatch)
            }
            _ => Err(mismatch()),
        }
    }

    fn project_slot(&self, slot: usize, component: PairComponent) -> ResolveResult<ConcreteArgument> {
        let declared = self.slot_type(slot)?;
        let value = self.value(slot)?;
        if !declared.kind.is_pair() {
            return Err(self.not_a_pair(slot));
        }
        self.project(slot, value, component)
    }

    fn project(
        &self,
        slot: usize,
        value: &ConcreteArgument,
        component: PairComponent,
    ) -> ResolveResult<ConcreteArgument> {
        match (value, component) {
            (ConcreteArgument::Offset(c, _) | ConcreteArgument::Scale(c, _), PairComponent::First) => {
                Ok(ConcreteArgument::Int(*c))
            }
            (ConcreteArgument::Offset(_, x) | ConcreteArgument::Scale(_, x), PairComponent::Second) => {
                Ok(ConcreteArgument::Var(*x))
            }
            (ConcreteArgument::Array(items), _) => ensure_sufficient_stack(|| {
                items
                    .iter()
                    .map(|item| self.project(slot, item, component))
                    .collect::<ResolveResult<Vec<_>>>()
                    .map(ConcreteArgument::Array)
            }),
            _ => Err(self.not_a_pair(slot)),
        }
    }

    fn not_a_pair(&self, slot: usize) -> ResolveError {
        ResolveError::ProjectionOnNonPair {
            definition: self.definition.to_string(),
            slot,
            found: self.actual[slot],
        }
    }

    /// `first`'s elements, then `second`'s, optionally negating the latter.
    fn concatenate(
        &self,
        first: usize,
        second: usize,
        negate_second: bool,
    ) -> ResolveResult<ConcreteArgument> {
        let (a, b) = (self.slot_type(first)?, self.slot_type(second)?);
        for (slot, ty) in [(first, a), (second, b)] {
            if !ty.is_array() {
                return Err(self.malformed(MalformedDetail::NotAnArray { slot }));
            }
        }
        if a.depth != b.depth || a.kind.shape() != b.kind.shape() {
            return Err(self.malformed(MalformedDetail::ConcatenationShape {
                first: a.kind,
                second: b.kind,
            }));
        }
        let head = self.elements(first)?;
        let tail = self.elements(second)?;

        let mut items = Vec::with_capacity(head.len() + tail.len());
        items.extend_from_slice(head);
        for item in tail {
            items.push(if negate_second {
                self.negate(second, item)?
            } else {
                item.clone()
            });
        }
        Ok(ConcreteArgument::Array(items))
    }

    fn elements(&self, slot: usize) -> ResolveResult<&[ConcreteArgument]> {
        self.value(slot)?
            .as_array()
            .ok_or_else(|| self.malformed(MalformedDetail::NotAnArray { slot }))
    }

    /// Arithmetic negation of one element: integers checked, integer handles
    /// through their minus view, `(c, x)` offsets as `(-c, -x)`, `(c, x)`
    /// scales as `(-c, x)`. Boolean and set elements have none.
    fn negate(&self, slot: usize, value: &ConcreteArgument) -> ResolveResult<ConcreteArgument> {
        let fail = || self.malformed(MalformedDetail::NotNegatable { slot });
        match value {
            ConcreteArgument::Int(n) => n.checked_neg().map(ConcreteArgument::Int).ok_or_else(fail),
            ConcreteArgument::Var(x) => x.negated().map(ConcreteArgument::Var).ok_or_else(fail),
            ConcreteArgument::Offset(c, x) => match (c.checked_neg(), x.negated()) {
                (Some(c), Some(x)) => Ok(ConcreteArgument::Offset(c, x)),
                _ => Err(fail()),
            },
            ConcreteArgument::Scale(c, x) => c
                .checked_neg()
                .map(|c| ConcreteArgument::Scale(c, *x))
                .ok_or_else(fail),
            ConcreteArgument::Array(items) => ensure_sufficient_stack(|| {
                items
                    .iter()
                    .map(|item| self.negate(slot, item))
                    .collect::<ResolveResult<Vec<_>>>()
                    .map(ConcreteArgument::Array)
            }),
            ConcreteArgument::Set(_) | ConcreteArgument::Literal(_) => Err(fail()),
        }
    }
}

fn convert_leaf(value: &ArgumentValue) -> Option<ConcreteArgument> {
    Some(match value {
        ArgumentValue::Int(n) => ConcreteArgument::Int(*n),
        ArgumentValue::Set(set) => ConcreteArgument::Set(set.clone()),
        ArgumentValue::Var(x) => ConcreteArgument::Var(VarRef::Int(*x)),
        ArgumentValue::Offset(c, x) => ConcreteArgument::Offset(*c, VarRef::Int(*x)),
        ArgumentValue::Scale(c, x) => ConcreteArgument::Scale(*c, VarRef::Int(*x)),
        ArgumentValue::Minus(x) => ConcreteArgument::Var(VarRef::Minus(*x)),
        ArgumentValue::Const(c) => ConcreteArgument::Var(VarRef::Const(*c)),
        ArgumentValue::Bool(x) => ConcreteArgument::Var(VarRef::Bool(*x)),
        ArgumentValue::NotBool(x) => ConcreteArgument::Var(VarRef::NotBool(*x)),
        ArgumentValue::SetVar(x) => ConcreteArgument::Var(VarRef::Set(*x)),
        ArgumentValue::Array(_) => return None,
    })
}
