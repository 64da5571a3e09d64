//! Registry schema: slots, variants, and definitions.

use std::fmt;
use std::str::FromStr;

use crate::rule::TransformRule;
use crate::views::{SlotType, ViewKind};

/// Error parsing a slot token such as `]offsetvar` or `]int:4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseSlotError {
    /// The kind name after the array markers is not in the catalog.
    UnknownKind(String),
    /// The `:N` length suffix is not a number.
    InvalidLength(String),
    /// A length was pinned on a single-valued slot.
    LengthOnSingle(String),
}

impl fmt::Display for ParseSlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseSlotError::UnknownKind(token) => write!(f, "unknown slot type `{token}`"),
            ParseSlotError::InvalidLength(token) => {
                write!(f, "invalid array length in slot type `{token}`")
            }
            ParseSlotError::LengthOnSingle(token) => {
                write!(f, "slot type `{token}` pins a length but is not an array")
            }
        }
    }
}

impl std::error::Error for ParseSlotError {}

/// Declared type of one parameter position of a variant.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ArgumentSlot {
    pub ty: SlotType,
    /// Fixed outer length; only meaningful for arrays. Matching ignores it.
    pub len: Option<usize>,
}

impl ArgumentSlot {
    pub const fn single(kind: ViewKind) -> Self {
        ArgumentSlot {
            ty: SlotType::single(kind),
            len: None,
        }
    }

    pub const fn array(kind: ViewKind) -> Self {
        ArgumentSlot {
            ty: SlotType::array(kind),
            len: None,
        }
    }

    #[must_use]
    pub const fn with_len(mut self, len: usize) -> Self {
        self.len = Some(len);
        self
    }
}

impl FromStr for ArgumentSlot {
    type Err = ParseSlotError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (body, len) = match token.split_once(':') {
            Some((body, len)) => {
                let len = len
                    .parse::<usize>()
                    .map_err(|_| ParseSlotError::InvalidLength(token.to_string()))?;
                (body, Some(len))
            }
            None => (token, None),
        };
        let name = body.trim_start_matches(']');
        let depth = u8::try_from(body.len() - name.len())
            .map_err(|_| ParseSlotError::UnknownKind(token.to_string()))?;
        let kind =
            ViewKind::from_token(name).ok_or_else(|| ParseSlotError::UnknownKind(token.to_string()))?;
        if depth == 0 && len.is_some() {
            return Err(ParseSlotError::LengthOnSingle(token.to_string()));
        }
        Ok(ArgumentSlot {
            ty: SlotType { kind, depth },
            len,
        })
    }
}

impl fmt::Display for ArgumentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ty)?;
        if let Some(len) = self.len {
            write!(f, ":{len}")?;
        }
        Ok(())
    }
}

/// One implementation strategy of a definition.
///
/// `rules` are listed in the order the target operation declares its
/// parameters.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Variant {
    slots: Vec<ArgumentSlot>,
    rules: Vec<TransformRule>,
    target: Box<str>,
}

impl Variant {
    pub fn new(
        target: impl Into<Box<str>>,
        slots: Vec<ArgumentSlot>,
        rules: Vec<TransformRule>,
    ) -> Self {
        Variant {
            slots,
            rules,
            target: target.into(),
        }
    }

    pub fn slots(&self) -> &[ArgumentSlot] {
        &self.slots
    }

    pub fn rules(&self) -> &[TransformRule] {
        &self.rules
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Number of arguments the target operation receives.
    pub fn arity(&self) -> usize {
        self.rules.len()
    }

    /// Declared slot types, in slot order.
    pub fn signature(&self) -> impl Iterator<Item = SlotType> + '_ {
        self.slots.iter().map(|slot| slot.ty)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{slot}")?;
        }
        write!(f, ") -> {}", self.target)
    }
}

/// A named constraint with its variants in evaluation order.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Definition {
    name: Box<str>,
    variants: Vec<Variant>,
}

impl Definition {
    pub fn new(name: impl Into<Box<str>>, variants: Vec<Variant>) -> Self {
        Definition {
            name: name.into(),
            variants,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }
}
