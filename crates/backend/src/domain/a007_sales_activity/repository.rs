use contracts::domain::a007_sales_activity::aggregate::{SalesActivity, SalesActivityQuery};

use crate::shared::query::entity::{Entity, ListFilter};
use crate::shared::query::spec::QuerySpec;
use crate::shared::query::view::{FilterColumn, FilterMode, KeyKind, Store, ViewDef};

pub static VIEW: ViewDef = ViewDef {
    entity: "Sales activity",
    slug: "sales-activity",
    store: Store::Erp,
    source: "XTD_ONT_SALES_ACTIVITY_V",
    columns: &[
        "activity_id",
        "salesrep_name",
        "customer_name",
        "activity_type",
        "activity_date",
        "branch_code",
        "notes",
    ],
    key_column: "activity_id",
    key_kind: KeyKind::Integer,
    order_key: "activity_id",
    filters: &[
        FilterColumn {
            key: "salesrep_name",
            column: "salesrep_name",
            mode: FilterMode::LikeCi,
        },
        FilterColumn {
            key: "customer_name",
            column: "customer_name",
            mode: FilterMode::LikeCi,
        },
        FilterColumn {
            key: "activity_type",
            column: "activity_type",
            mode: FilterMode::EqCi,
        },
        FilterColumn {
            key: "branch_code",
            column: "branch_code",
            mode: FilterMode::EqCi,
        },
        FilterColumn {
            key: "date_from",
            column: "activity_date",
            mode: FilterMode::DateFrom,
        },
        FilterColumn {
            key: "date_to",
            column: "activity_date",
            mode: FilterMode::DateTo,
        },
    ],
    lookups: &[],
    group: None,
    cached: false,
};

pub struct SalesActivities;

impl Entity for SalesActivities {
    type Record = SalesActivity;
    type Filter = SalesActivityQuery;

    fn view() -> &'static ViewDef {
        &VIEW
    }
}

impl ListFilter for SalesActivityQuery {
    fn to_spec(&self) -> QuerySpec {
        QuerySpec::new(self.page, self.limit)
            .text("salesrep_name", self.salesrep_name.as_deref())
            .text("customer_name", self.customer_name.as_deref())
            .text("activity_type", self.activity_type.as_deref())
            .text("branch_code", self.branch_code.as_deref())
            .date("date_from", self.date_from)
            .date("date_to", self.date_to)
    }
}
