//! `define_port_error!`: declare a port's error enum in one block.
//!
//! Every variant carries a single string field. The macro derives
//! `thiserror::Error` with the given display text and adds a snake_case
//! constructor taking `impl Into<String>`, so adapters write
//! `DonorRepositoryError::query(err.to_string())`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $field:ident : String } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $field: String },
            )+
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = "Construct [`" $name "::" $variant "`]."]
                    pub fn [<$variant:snake>]($field: impl Into<String>) -> Self {
                        Self::$variant { $field: $field.into() }
                    }
                )+
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        /// Errors for a throwaway port.
        pub enum ProbeError {
            /// Unreachable backend.
            Unreachable { message: String } => "probe unreachable: {message}",
            /// Duplicate key.
            DuplicateKey { key: String } => "probe key {key} already present",
        }
    }

    #[test]
    fn constructors_are_snake_case_and_accept_str() {
        assert_eq!(
            ProbeError::unreachable("refused"),
            ProbeError::Unreachable {
                message: "refused".to_owned()
            }
        );
        assert_eq!(
            ProbeError::duplicate_key(String::from("+919876543210")).to_string(),
            "probe key +919876543210 already present"
        );
    }
}
