/// Defines a closed identifier enum with a stable wire id and a display name.
///
/// Unlike open registries, these enums carry no catalog-escape variant: an id
/// outside the list fails to parse and fails to deserialize.
#[macro_export]
macro_rules! define_id_enum {
    (
        $(#[$enum_meta:meta])*
        $enum_name:ident ($kind:literal) {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $wire_id:literal : $display_name:literal
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $enum_name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl serde::Serialize for $enum_name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $enum_name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::from_id(&s).ok_or_else(|| {
                    serde::de::Error::custom(format!("unknown {} '{}'", $kind, s))
                })
            }
        }

        impl $enum_name {
            /// Stable identifier used on the wire and in rule tables.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $wire_id,
                    )*
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $display_name,
                    )*
                }
            }

            pub fn from_id(id: &str) -> Option<Self> {
                match id {
                    $(
                        $wire_id => Some(Self::$variant),
                    )*
                    _ => None,
                }
            }

            pub fn all_variants() -> &'static [Self] {
                &[
                    $(
                        Self::$variant,
                    )*
                ]
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.pad(self.as_str())
            }
        }
    };
}
