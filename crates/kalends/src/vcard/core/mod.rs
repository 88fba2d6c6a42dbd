//! Core vCard types: cards, properties, parameters, and structured values.

mod card;
mod parameter;
mod property;
mod structured;
mod value;

pub use card::{VCard, VCardVersion};
pub use parameter::VCardParameter;
pub use property::VCardProperty;
pub use structured::{Address, Gender, Organization, Sex, StructuredName};
pub use value::VCardValue;
