//! Macro for implementing Display and FromStr for tag enums
//!
//! Eliminates boilerplate for enums persisted as lowercase strings. Parsing
//! is case-insensitive; output is always the lowercase form.
//!
//! # Example
//!
//! ```rust
//! use medlink_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum IntakeStatus {
//!     Received,
//!     Stored,
//!     Linked,
//! }
//!
//! impl_domain_status_conversions!(IntakeStatus {
//!     Received => "received",
//!     Stored => "stored",
//!     Linked => "linked",
//! });
//! ```

/// Implements Display and FromStr traits for tag enums
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their string
///   representations
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
