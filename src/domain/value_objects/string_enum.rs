//! Enumerations persisted as VARCHAR and exchanged as SCREAMING_SNAKE_CASE.

/// Declare a CRM enumeration with a fixed wire/database literal per variant.
///
/// Generates `as_str`, `ALL`, `Display`, serde impls, and a `FromStr` that
/// accepts any casing (and `-` for `_`) and fails with
/// [`AppError::EnumValueNotFound`](crate::shared::error::AppError::EnumValueNotFound).
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $literal:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $literal)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Database / JSON representation.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $literal,)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::shared::error::AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
                match normalized.as_str() {
                    $($literal => Ok($name::$variant),)+
                    _ => Err(crate::shared::error::AppError::unknown_enum(stringify!($name), s)),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use string_enum;
