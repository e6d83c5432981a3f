//! String newtypes for the parts of a cart row's identity.
//!
//! Use the `define_label!` macro to create type-safe wrappers so that a
//! product ID can never be passed where a size label is expected.

/// Macro to define a type-safe string label.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`
/// - `From<&str>`, `From<String>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use eketar_core::define_label;
/// define_label!(ColorName);
///
/// let color = ColorName::new("navy");
/// assert_eq!(color.as_str(), "navy");
/// ```
#[macro_export]
macro_rules! define_label {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new label from any string-like value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Get the underlying string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_label!(ProductId);
define_label!(Size);

/// The `(id, size)` pair that decides whether an add merges into an existing
/// row or creates a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CartKey<'a> {
    pub id: &'a ProductId,
    pub size: &'a Size,
}

impl<'a> CartKey<'a> {
    #[must_use]
    pub const fn new(id: &'a ProductId, size: &'a Size) -> Self {
        Self { id, size }
    }
}

impl core::fmt::Display for CartKey<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.id, self.size)
    }
}
