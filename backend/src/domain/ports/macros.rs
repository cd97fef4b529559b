//! Helper macro for driven-port error enums.
//!
//! Every variant carries named fields and gets a snake_case constructor
//! whose parameters accept anything convertible into the field type:
//!
//! ```ignore
//! define_port_error! {
//!     pub enum StoreError {
//!         Connection { message: String } => "connection failed: {message}",
//!     }
//! }
//! let err = StoreError::connection("pool timed out");
//! ```

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),+ },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = "Build the `" $variant "` variant."]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                }
            )+
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        /// Store failures used only by these tests.
        pub enum StoreError {
            Connection { message: String } => "store connection failed: {message}",
            Timeout { message: String, after_ms: u64 } =>
                "store timed out after {after_ms}ms: {message}",
        }
    }

    #[rstest]
    fn constructor_converts_borrowed_messages() {
        let err = StoreError::connection("pool exhausted");

        assert_eq!(
            err,
            StoreError::Connection {
                message: "pool exhausted".to_owned()
            }
        );
        assert_eq!(err.to_string(), "store connection failed: pool exhausted");
    }

    #[rstest]
    fn constructor_takes_fields_in_declaration_order() {
        let err = StoreError::timeout("select listings", 250_u64);
        assert_eq!(
            err.to_string(),
            "store timed out after 250ms: select listings"
        );
    }
}
