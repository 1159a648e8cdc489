use crate::util::snake_ident_str;
use heck::ToUpperCamelCase;
use proc_macro2::Ident;
use quote::format_ident;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimaryKey {
    pub(crate) name: String,
}

impl PrimaryKey {
    pub fn get_name_snake_case(&self) -> Ident {
        format_ident!("{}", snake_ident_str(&self.name))
    }

    pub fn get_name_camel_case(&self) -> Ident {
        format_ident!("{}", self.name.to_upper_camel_case())
    }
}
