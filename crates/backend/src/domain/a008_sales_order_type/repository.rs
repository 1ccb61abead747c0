use contracts::domain::a008_sales_order_type::aggregate::{SalesOrderType, SalesOrderTypeQuery};

use crate::shared::query::entity::{Entity, ListFilter};
use crate::shared::query::spec::QuerySpec;
use crate::shared::query::view::{FilterColumn, FilterMode, KeyKind, Store, ViewDef};

pub static VIEW: ViewDef = ViewDef {
    entity: "Sales order type",
    slug: "sales-order-types",
    store: Store::Erp,
    source: "XTD_OE_ORDER_TYPES_V",
    columns: &[
        "order_type_id",
        "name",
        "description",
        "order_category_code",
        "org_id",
    ],
    key_column: "order_type_id",
    key_kind: KeyKind::Integer,
    order_key: "order_type_id",
    filters: &[
        FilterColumn {
            key: "name",
            column: "name",
            mode: FilterMode::LikeCi,
        },
        FilterColumn {
            key: "order_category_code",
            column: "order_category_code",
            mode: FilterMode::EqCi,
        },
        FilterColumn {
            key: "org_id",
            column: "org_id",
            mode: FilterMode::Exact,
        },
    ],
    lookups: &[],
    group: None,
    cached: false,
};

pub struct SalesOrderTypes;

impl Entity for SalesOrderTypes {
    type Record = SalesOrderType;
    type Filter = SalesOrderTypeQuery;

    fn view() -> &'static ViewDef {
        &VIEW
    }
}

impl ListFilter for SalesOrderTypeQuery {
    fn to_spec(&self) -> QuerySpec {
        QuerySpec::new(self.page, self.limit)
            .text("name", self.name.as_deref())
            .text("order_category_code", self.order_category_code.as_deref())
            .integer("org_id", self.org_id)
    }
}
