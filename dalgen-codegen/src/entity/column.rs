use crate::{
    util::{snake_ident_str, snake_name_str},
    GenerateSettings,
};
use heck::ToUpperCamelCase;
use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use sea_query::{ColumnDef, ColumnSpec, ColumnType, StringLen};

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub(crate) name: String,
    pub(crate) col_type: ColumnType,
    pub(crate) auto_increment: bool,
    pub(crate) not_null: bool,
    pub(crate) has_default: bool,
    pub(crate) unique: bool,
    pub(crate) indexed: bool,
}

impl Column {
    pub fn new<S: Into<String>>(name: S, col_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            col_type,
            auto_increment: false,
            not_null: false,
            has_default: false,
            unique: false,
            indexed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_name_snake_case(&self) -> Ident {
        format_ident!("{}", snake_ident_str(&self.name))
    }

    /// Variant name SeaORM derives for this column in the `Column` enum
    pub fn get_name_camel_case(&self) -> Ident {
        format_ident!("{}", self.name.to_upper_camel_case())
    }

    /// Whether SeaORM derives the column name from the field name without a `column_name` attribute
    pub fn is_snake_case_name(&self) -> bool {
        snake_name_str(&self.name) == self.name
    }

    /// Whether the generated field is wrapped in `Option`
    pub fn is_optional(&self, settings: &GenerateSettings, is_primary_key: bool) -> bool {
        if is_primary_key {
            return false;
        }
        (settings.field_nullable && !self.not_null)
            || (settings.field_coverable && self.has_default && !self.auto_increment)
    }

    pub fn get_rs_type(&self, settings: &GenerateSettings, is_primary_key: bool) -> TokenStream {
        let ty = self.get_base_rs_type(settings.field_signable);
        if self.is_optional(settings, is_primary_key) {
            quote! { Option<#ty> }
        } else {
            ty
        }
    }

    pub fn get_base_rs_type(&self, signable: bool) -> TokenStream {
        match &self.col_type {
            ColumnType::Char(_)
            | ColumnType::String(_)
            | ColumnType::Text
            | ColumnType::Custom(_)
            | ColumnType::Enum { .. } => quote! { String },
            ColumnType::TinyInteger => quote! { i8 },
            ColumnType::SmallInteger => quote! { i16 },
            ColumnType::Integer => quote! { i32 },
            ColumnType::BigInteger => quote! { i64 },
            ColumnType::TinyUnsigned if signable => quote! { u8 },
            ColumnType::TinyUnsigned => quote! { i8 },
            ColumnType::SmallUnsigned if signable => quote! { u16 },
            ColumnType::SmallUnsigned => quote! { i16 },
            ColumnType::Unsigned if signable => quote! { u32 },
            ColumnType::Unsigned => quote! { i32 },
            ColumnType::BigUnsigned if signable => quote! { u64 },
            ColumnType::BigUnsigned => quote! { i64 },
            ColumnType::Float => quote! { f32 },
            ColumnType::Double => quote! { f64 },
            ColumnType::Decimal(_) | ColumnType::Money(_) => quote! { Decimal },
            ColumnType::DateTime | ColumnType::Timestamp => quote! { DateTime },
            ColumnType::TimestampWithTimeZone => quote! { DateTimeWithTimeZone },
            ColumnType::Time => quote! { Time },
            ColumnType::Date => quote! { Date },
            ColumnType::Binary(_) | ColumnType::VarBinary(_) | ColumnType::Blob => {
                quote! { Vec<u8> }
            }
            ColumnType::Boolean => quote! { bool },
            ColumnType::Json | ColumnType::JsonBinary => quote! { Json },
            ColumnType::Uuid => quote! { Uuid },
            _ => quote! { String },
        }
    }

    /// Value of the `column_type` attribute, `None` when SeaORM infers it from the Rust type
    pub fn get_col_type_attr(&self) -> Option<String> {
        let attr = match &self.col_type {
            ColumnType::Char(Some(len)) => format!("Char(Some({len}))"),
            ColumnType::Char(None) => "Char(None)".to_owned(),
            ColumnType::String(len) => format!("String({})", write_string_len(len)),
            ColumnType::Text => "Text".to_owned(),
            ColumnType::TinyInteger => "TinyInteger".to_owned(),
            ColumnType::SmallInteger => "SmallInteger".to_owned(),
            ColumnType::Integer => "Integer".to_owned(),
            ColumnType::BigInteger => "BigInteger".to_owned(),
            ColumnType::TinyUnsigned => "TinyUnsigned".to_owned(),
            ColumnType::SmallUnsigned => "SmallUnsigned".to_owned(),
            ColumnType::Unsigned => "Unsigned".to_owned(),
            ColumnType::BigUnsigned => "BigUnsigned".to_owned(),
            ColumnType::Float => "Float".to_owned(),
            ColumnType::Double => "Double".to_owned(),
            ColumnType::Decimal(Some((p, s))) => format!("Decimal(Some(({p}, {s})))"),
            ColumnType::Decimal(None) => "Decimal(None)".to_owned(),
            ColumnType::Money(Some((p, s))) => format!("Money(Some(({p}, {s})))"),
            ColumnType::Money(None) => "Money(None)".to_owned(),
            ColumnType::DateTime => "DateTime".to_owned(),
            ColumnType::Timestamp => "Timestamp".to_owned(),
            ColumnType::TimestampWithTimeZone => "TimestampWithTimeZone".to_owned(),
            ColumnType::Time => "Time".to_owned(),
            ColumnType::Date => "Date".to_owned(),
            ColumnType::Binary(len) => format!("Binary({len})"),
            ColumnType::VarBinary(len) => format!("VarBinary({})", write_string_len(len)),
            ColumnType::Blob => "Blob".to_owned(),
            ColumnType::Boolean => "Boolean".to_owned(),
            ColumnType::Json => "Json".to_owned(),
            ColumnType::JsonBinary => "JsonBinary".to_owned(),
            ColumnType::Uuid => "Uuid".to_owned(),
            _ => return None,
        };
        Some(attr)
    }

    pub fn get_info(&self, settings: &GenerateSettings, is_primary_key: bool) -> String {
        let mut info = format!(
            "Column `{}`: {}",
            self.name,
            self.get_rs_type(settings, is_primary_key)
        );
        if is_primary_key {
            info.push_str(", primary_key");
        }
        if self.auto_increment {
            info.push_str(", auto_increment");
        }
        if self.not_null {
            info.push_str(", not_null");
        }
        if self.has_default {
            info.push_str(", default");
        }
        if self.unique {
            info.push_str(", unique");
        } else if self.indexed {
            info.push_str(", indexed");
        }
        info
    }
}

fn write_string_len(len: &StringLen) -> String {
    match len {
        StringLen::N(n) => format!("StringLen::N({n})"),
        StringLen::Max => "StringLen::Max".to_owned(),
        StringLen::None => "StringLen::None".to_owned(),
    }
}

impl From<&ColumnDef> for Column {
    fn from(col_def: &ColumnDef) -> Self {
        let col_type = col_def
            .get_column_type()
            .cloned()
            .unwrap_or(ColumnType::Text);
        let specs = col_def.get_column_spec();
        let auto_increment = specs
            .iter()
            .any(|spec| matches!(spec, ColumnSpec::AutoIncrement));
        let not_null = specs
            .iter()
            .any(|spec| matches!(spec, ColumnSpec::NotNull));
        let has_default = specs
            .iter()
            .any(|spec| matches!(spec, ColumnSpec::Default(_)));
        let unique = specs
            .iter()
            .any(|spec| matches!(spec, ColumnSpec::UniqueKey));
        Self {
            name: col_def.get_column_name(),
            col_type,
            auto_increment,
            not_null,
            has_default,
            unique,
            indexed: false,
        }
    }
}
