//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.
//!
//! IDs are short prefixed strings such as `usr_k3j9x2ab4c`: the entity prefix,
//! an underscore, six random base-36 characters and the last four base-36
//! digits of the creation timestamp in milliseconds.

use rand::Rng;

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Constructors: `new()` (wrap an existing value), `generate()` (fresh ID)
/// - `From<String>`, `From<&str>`, `AsRef<str>` and `Display`
///
/// # Example
///
/// ```rust
/// # use craftify_core::define_id;
/// define_id!(UserId, "usr");
/// define_id!(OrderId, "ord");
///
/// let user_id = UserId::generate();
/// assert!(user_id.as_str().starts_with("usr_"));
///
/// // These are different types, so this won't compile:
/// // let _: UserId = OrderId::generate();
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix used by freshly generated IDs.
            pub const PREFIX: &'static str = $prefix;

            /// Wrap an existing ID value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh, random ID.
            #[must_use]
            pub fn generate() -> Self {
                Self($crate::types::id::generate_id($prefix))
            }

            /// Get the underlying string value.
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

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(UserId, "usr");
define_id!(ListingId, "itm");
define_id!(OrderId, "ord");

/// Number of random base-36 characters in a generated ID.
const RANDOM_LEN: usize = 6;

/// Number of trailing timestamp digits appended to a generated ID.
const STAMP_LEN: usize = 4;

/// Generate a new prefixed ID string.
///
/// Prefer the typed `generate()` constructors (`UserId::generate()`, ...).
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    let mut rng = rand::rng();
    let random: String = (0..RANDOM_LEN)
        .map(|_| char::from_digit(rng.random_range(0..36), 36).unwrap_or('0'))
        .collect();

    let millis = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default();
    let stamp = to_base36(millis);
    let tail = stamp
        .get(stamp.len().saturating_sub(STAMP_LEN)..)
        .unwrap_or(&stamp);

    format!("{prefix}_{random}{tail}")
}

/// Render a number in lowercase base 36.
fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_owned();
    }

    let mut digits = Vec::new();
    while value > 0 {
        #[allow(clippy::cast_possible_truncation)] // remainder is always < 36
        let digit = (value % 36) as u32;
        digits.push(char::from_digit(digit, 36).unwrap_or('0'));
        value /= 36;
    }
    digits.iter().rev().collect()
}
