pub mod dataset;
pub mod error;
pub mod mapping;
pub mod options;
pub mod repository;
pub mod rule;
pub mod value;
pub mod violation;

pub use dataset::{Dataset, Record};
pub use error::RuleError;
pub use mapping::DepartmentMapping;
pub use options::{MatchingOptions, QcConfig};
pub use repository::{InMemoryRepository, MappingRepository, RuleRepository};
pub use rule::{
    LogicCondition, LogicRule, MissingCondition, MissingRule, RelationKind, RelationRule, Rule,
    RuleKind,
};
pub use value::{Value, format_numeric, parse_datetime, parse_f64};
pub use violation::Violation;
