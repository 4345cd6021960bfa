//! Domain model for fetched tasks and their typed attributes.
//!
//! The attribute value model reduces every attribute payload to a
//! [`ComparableValue`] and an emptiness predicate so that filtering and
//! sorting never have to inspect payload shapes directly.

mod attribute;
mod error;
mod ids;
mod task;

pub use attribute::{
    Attribute, AttributeType, AttributeValue, ComparableValue, DateRange, Person, SelectOption,
    parse_instant, parse_number,
};
pub use error::ParseAttributeTypeError;
pub use ids::TaskId;
pub use task::{Task, UNTITLED_TASK};
