// crates/surface-plan-core/src/core/signature.rs
// ============================================================================
// Module: Signature Model
// Description: Formal parameter shapes exposed to callers for an operation.
// Purpose: Provide immutable, serializable signature records and shape views.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`Signature`] is one concrete ordered formal-parameter shape exposed to
//! callers for an operation, tagged with its introduction [`Generation`] and
//! its [`SignatureOrigin`] (machine-generated protocol surface or
//! hand-authored overlay). Once recorded in the surface registry a signature
//! is immutable history.
//!
//! Two shape views matter for planning:
//! - full equality (names, kinds, representations, defaults) drives the
//!   "nothing changed" evolution case;
//! - the binding shape ([`Signature::binding_shape_eq`]) ignores defaults,
//!   because defaults are a source-level affordance: two signatures with the
//!   same binding shape are one callable at the link level, and the later
//!   generation supersedes the earlier one's emitted form.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::operation::OperationName;

// ============================================================================
// SECTION: Formal Parameters
// ============================================================================

/// Kind of one formal parameter within a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormalKind {
    /// Required value parameter.
    RequiredValue,
    /// Optional value parameter with a default.
    OptionalValue,
    /// Opaque request-body handle.
    PayloadHandle,
    /// Trailing call-tuning settings with a "use defaults" default.
    OptionsBag,
    /// Ordered name-to-value container absorbing collapsed optional
    /// parameters; callers address entries by string key.
    PropertyBag,
    /// Trailing cancellation formal used by overlay signatures.
    Cancellation,
}

impl fmt::Display for FormalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::RequiredValue => "required-value",
            Self::OptionalValue => "optional-value",
            Self::PayloadHandle => "payload-handle",
            Self::OptionsBag => "options-bag",
            Self::PropertyBag => "property-bag",
            Self::Cancellation => "cancellation",
        };
        f.write_str(label)
    }
}

/// Representation of a formal parameter's value domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    /// Primitive/raw representation; the only form the protocol surface uses.
    Raw,
    /// Richer hand-authored representation, overlay signatures only.
    Authored,
}

/// Category an argument value must have to satisfy a formal positionally.
///
/// Categories are structurally incompatible with each other: no single
/// concrete argument satisfies two formals of different categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentCategory {
    /// Primitive value argument.
    RawValue,
    /// Authored model value argument.
    AuthoredValue,
    /// Opaque payload handle argument.
    RawPayload,
    /// Authored body model argument.
    AuthoredPayload,
    /// Options-bag argument.
    OptionsBag,
    /// Property-bag argument.
    PropertyBag,
    /// Cancellation argument.
    Cancellation,
}

impl fmt::Display for ArgumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::RawValue => "value",
            Self::AuthoredValue => "authored-value",
            Self::RawPayload => "payload",
            Self::AuthoredPayload => "authored-payload",
            Self::OptionsBag => "options-bag",
            Self::PropertyBag => "property-bag",
            Self::Cancellation => "cancellation",
        };
        f.write_str(label)
    }
}

/// One formal parameter of a signature.
///
/// # Invariants
/// - `kind` [`FormalKind::OptionalValue`] implies `has_default` for every
///   signature the synthesizer produces; forwarding generations strip
///   defaults and re-kind optional values as required.
/// - `default` holds a declared default literal only when `has_default` is
///   true; omissible formals without a literal default to "absent".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormalParameter {
    /// Formal parameter name.
    pub name: String,
    /// Formal parameter kind.
    pub kind: FormalKind,
    /// Value representation.
    pub representation: Representation,
    /// True when a caller may omit this formal.
    pub has_default: bool,
    /// Declared default literal from the service description, when one
    /// exists. Emitters materialize it for omitted arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl FormalParameter {
    /// Creates a required raw value formal.
    #[must_use]
    pub fn required_value(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FormalKind::RequiredValue,
            representation: Representation::Raw,
            has_default: false,
            default: None,
        }
    }

    /// Creates an optional raw value formal with a default.
    #[must_use]
    pub fn optional_value(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FormalKind::OptionalValue,
            representation: Representation::Raw,
            has_default: true,
            default: None,
        }
    }

    /// Creates a raw payload-handle formal (no default).
    #[must_use]
    pub fn payload_handle(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FormalKind::PayloadHandle,
            representation: Representation::Raw,
            has_default: false,
            default: None,
        }
    }

    /// Creates a trailing options-bag formal with a "use defaults" default.
    #[must_use]
    pub fn options_bag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FormalKind::OptionsBag,
            representation: Representation::Raw,
            has_default: true,
            default: None,
        }
    }

    /// Creates a property-bag formal with an empty-mapping default.
    #[must_use]
    pub fn property_bag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FormalKind::PropertyBag,
            representation: Representation::Raw,
            has_default: true,
            default: None,
        }
    }

    /// Creates a trailing cancellation formal with a default.
    #[must_use]
    pub fn cancellation(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FormalKind::Cancellation,
            representation: Representation::Raw,
            has_default: true,
            default: None,
        }
    }

    /// Switches the formal to the authored representation.
    #[must_use]
    pub const fn authored(mut self) -> Self {
        self.representation = Representation::Authored;
        self
    }

    /// Attaches the declared default literal, when the description names one.
    #[must_use]
    pub fn with_default(mut self, default: Option<String>) -> Self {
        self.default = default;
        self
    }

    /// Removes the default, making the formal required-in-form.
    #[must_use]
    pub fn without_default(mut self) -> Self {
        self.has_default = false;
        self.default = None;
        self
    }

    /// Returns the argument category required to satisfy this formal.
    #[must_use]
    pub const fn category(&self) -> ArgumentCategory {
        match (self.kind, self.representation) {
            (FormalKind::RequiredValue | FormalKind::OptionalValue, Representation::Raw) => {
                ArgumentCategory::RawValue
            }
            (FormalKind::RequiredValue | FormalKind::OptionalValue, Representation::Authored) => {
                ArgumentCategory::AuthoredValue
            }
            (FormalKind::PayloadHandle, Representation::Raw) => ArgumentCategory::RawPayload,
            (FormalKind::PayloadHandle, Representation::Authored) => {
                ArgumentCategory::AuthoredPayload
            }
            (FormalKind::OptionsBag, _) => ArgumentCategory::OptionsBag,
            (FormalKind::PropertyBag, _) => ArgumentCategory::PropertyBag,
            (FormalKind::Cancellation, _) => ArgumentCategory::Cancellation,
        }
    }

    /// Returns true when two formals bind the same call sites, ignoring
    /// source-level defaults.
    #[must_use]
    pub fn binding_eq(&self, other: &Self) -> bool {
        self.name == other.name && self.category() == other.category()
    }
}

impl fmt::Display for FormalParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.kind)?;
        if self.representation == Representation::Authored {
            f.write_str(" (authored)")?;
        }
        Ok(())
    }
}

/// Display wrapper for an ordered formal-parameter sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormalSeq(pub Vec<FormalParameter>);

impl fmt::Display for FormalSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (index, formal) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            formal.fmt(f)?;
        }
        f.write_str(")")
    }
}

// ============================================================================
// SECTION: Signatures
// ============================================================================

/// Sequence number of a signature's introduction for an operation.
///
/// # Invariants
/// - Generations per operation form a strict, gap-free, monotonically
///   increasing sequence starting at zero.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Generation(u32);

impl Generation {
    /// First generation ever emitted for an operation.
    pub const ZERO: Self = Self(0);

    /// Creates a generation from a raw sequence number.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw sequence number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the next generation in sequence.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Origin of a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureOrigin {
    /// Machine-generated by the composition rule.
    Protocol,
    /// Hand-authored convenience signature.
    Overlay,
}

impl fmt::Display for SignatureOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Protocol => f.write_str("protocol"),
            Self::Overlay => f.write_str("overlay"),
        }
    }
}

/// One concrete callable shape for an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Owning operation name.
    pub operation: OperationName,
    /// Introduction sequence number.
    pub generation: Generation,
    /// Protocol or overlay origin.
    pub origin: SignatureOrigin,
    /// Ordered formal parameters.
    pub formals: Vec<FormalParameter>,
}

impl Signature {
    /// Creates a protocol signature.
    #[must_use]
    pub const fn protocol(
        operation: OperationName,
        generation: Generation,
        formals: Vec<FormalParameter>,
    ) -> Self {
        Self {
            operation,
            generation,
            origin: SignatureOrigin::Protocol,
            formals,
        }
    }

    /// Creates an overlay signature. Overlays are versioned independently of
    /// the protocol chain; generation zero is conventional.
    #[must_use]
    pub const fn overlay(operation: OperationName, formals: Vec<FormalParameter>) -> Self {
        Self {
            operation,
            generation: Generation::ZERO,
            origin: SignatureOrigin::Overlay,
            formals,
        }
    }

    /// Returns the trailing formal, if any.
    #[must_use]
    pub fn last_formal(&self) -> Option<&FormalParameter> {
        self.formals.last()
    }

    /// Returns true when both signatures bind the same call sites at the
    /// link level (same names and argument categories, defaults ignored).
    #[must_use]
    pub fn binding_shape_eq(&self, other: &Self) -> bool {
        self.formals.len() == other.formals.len()
            && self.formals.iter().zip(&other.formals).all(|(a, b)| a.binding_eq(b))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{} [{}] (", self.operation, self.generation, self.origin)?;
        for (index, formal) in self.formals.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            formal.fmt(f)?;
        }
        f.write_str(")")
    }
}
