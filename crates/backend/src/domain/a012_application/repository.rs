use contracts::domain::a012_application::aggregate::{Application, ApplicationQuery};

use crate::shared::query::entity::{Entity, ListFilter};
use crate::shared::query::spec::QuerySpec;
use crate::shared::query::view::{FilterColumn, FilterMode, KeyKind, Lookup, Store, ViewDef};

pub static VIEW: ViewDef = ViewDef {
    entity: "Application",
    slug: "application",
    store: Store::Auth,
    source: "(SELECT id AS application_id, code, name, description, is_active \
             FROM auth.applications) applications",
    columns: &["application_id", "code", "name", "description", "is_active"],
    key_column: "application_id",
    key_kind: KeyKind::Integer,
    order_key: "application_id",
    filters: &[
        FilterColumn {
            key: "code",
            column: "code",
            mode: FilterMode::EqCi,
        },
        FilterColumn {
            key: "name",
            column: "name",
            mode: FilterMode::LikeCi,
        },
    ],
    lookups: &[Lookup {
        field: "code",
        column: "code",
        mode: FilterMode::EqCi,
        pattern: "findByCode",
    }],
    group: None,
    cached: false,
};

pub struct Applications;

impl Entity for Applications {
    type Record = Application;
    type Filter = ApplicationQuery;

    fn view() -> &'static ViewDef {
        &VIEW
    }
}

impl ListFilter for ApplicationQuery {
    fn to_spec(&self) -> QuerySpec {
        QuerySpec::new(self.page, self.limit)
            .text("code", self.code.as_deref())
            .text("name", self.name.as_deref())
    }
}
