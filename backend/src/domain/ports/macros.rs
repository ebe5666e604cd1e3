//! `define_port_error!`: error enums for driven ports.
//!
//! Every port failure in this crate carries a single human-readable
//! `message`, so each variant is declared as `Variant { message: String }`
//! with its display format. The macro derives `thiserror::Error` and adds a
//! snake_case constructor per variant taking `impl Into<String>`, which keeps
//! adapter mapping code to one call such as
//! `SmsSenderError::timeout(err.to_string())`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { message: String } => $display:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($display)]
                $variant { message: String },
            )+
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = concat!("Build a `", stringify!($variant), "` error.")]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant {
                            message: message.into(),
                        }
                    }
                )+
            }
        }
    };
}

pub(crate) use define_port_error;
