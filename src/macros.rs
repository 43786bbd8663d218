/// Создаёт новый доменный тип поверх значения, прошедшего проверку.
///
/// Значение проверяется и при создании через `new`, и при десериализации,
/// так что невалидный тип невозможно получить ни из ответа API, ни из кода.
#[macro_export]
macro_rules! newtype {
    ($tname:ident, String, "String", $validate_fn:ident) => {
        #[derive(
            std::fmt::Debug,
            std::clone::Clone,
            std::cmp::PartialEq,
            std::cmp::Eq,
            std::hash::Hash,
            serde::Serialize,
            serde::Deserialize,
            derive_more::Display,
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $tname(String);

        impl $tname {
            pub fn new(value: &str) -> anyhow::Result<Self> {
                let value = value.trim();
                Self::validate(value)?;
                Ok(Self(value.to_owned()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            fn validate(value: &str) -> anyhow::Result<()> {
                $validate_fn(value)
            }
        }

        impl std::convert::From<$tname> for String {
            fn from(value: $tname) -> Self {
                value.0
            }
        }

        impl std::convert::TryFrom<String> for $tname {
            type Error = anyhow::Error;

            fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
                $tname::new(&value)
            }
        }
    };

    ($tname:ident, $type:ty, $try_from:literal, $validate_fn:ident) => {
        #[derive(
            std::fmt::Debug,
            std::clone::Clone,
            std::marker::Copy,
            std::cmp::PartialEq,
            std::cmp::Eq,
            std::hash::Hash,
            serde::Serialize,
            serde::Deserialize,
            derive_more::Display,
        )]
        #[serde(try_from = $try_from, into = $try_from)]
        pub struct $tname($type);

        impl $tname {
            pub fn new(value: $type) -> anyhow::Result<Self> {
                Self::validate(&value)?;
                Ok(Self(value))
            }

            pub fn get(&self) -> $type {
                self.0
            }

            fn validate(value: &$type) -> anyhow::Result<()> {
                $validate_fn(value)
            }
        }

        impl std::convert::From<$tname> for $type {
            fn from(value: $tname) -> Self {
                value.0
            }
        }

        impl std::convert::TryFrom<$type> for $tname {
            type Error = anyhow::Error;

            fn try_from(value: $type) -> std::result::Result<Self, Self::Error> {
                $tname::new(value)
            }
        }
    };
}
