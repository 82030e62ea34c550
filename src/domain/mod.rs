//! Core setting types shared by the controllers and the host adapters

mod field;
mod key;
mod value;

pub use field::{smtp_fields, FieldSpec, SettingKind};
pub use key::{keys, SettingKey};
pub use value::SettingValue;
