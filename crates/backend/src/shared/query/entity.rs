use serde::de::DeserializeOwned;
use serde::Serialize;

use super::spec::QuerySpec;
use super::view::ViewDef;

/// Filter DTO → Query Specification
pub trait ListFilter {
    fn to_spec(&self) -> QuerySpec;
}

/// One served entity: record shape, filter DTO and view definition.
///
/// Реализуется пустой структурой-маркером в каждом модуле `aNNN_*`.
pub trait Entity: Send + Sync + 'static {
    type Record: Serialize + DeserializeOwned + Send + Sync + 'static;
    type Filter: ListFilter + DeserializeOwned + Default + Send + Sync + 'static;

    fn view() -> &'static ViewDef;
}
