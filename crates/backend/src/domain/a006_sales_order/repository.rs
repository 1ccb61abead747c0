use contracts::domain::a006_sales_order::aggregate::{SalesOrder, SalesOrderQuery};

use crate::shared::query::entity::{Entity, ListFilter};
use crate::shared::query::spec::QuerySpec;
use crate::shared::query::view::{
    FilterColumn, FilterMode, GroupSpec, KeyKind, Lookup, Store, ViewDef,
};

pub static VIEW: ViewDef = ViewDef {
    entity: "Sales order",
    slug: "sales-order",
    store: Store::Erp,
    source: "XTD_OE_ORDERS_LINES_V",
    columns: &[
        "header_id",
        "order_number",
        "customer_name",
        "ordered_date",
        "flow_status_code",
        "order_type",
        "branch_code",
        "line_number",
        "ordered_item",
        "ordered_quantity",
        "unit_selling_price",
        "line_status",
    ],
    key_column: "header_id",
    key_kind: KeyKind::Integer,
    order_key: "header_id",
    filters: &[
        FilterColumn {
            key: "order_number",
            column: "order_number",
            mode: FilterMode::Exact,
        },
        FilterColumn {
            key: "customer_name",
            column: "customer_name",
            mode: FilterMode::LikeCi,
        },
        FilterColumn {
            key: "flow_status_code",
            column: "flow_status_code",
            mode: FilterMode::EqCi,
        },
        FilterColumn {
            key: "branch_code",
            column: "branch_code",
            mode: FilterMode::EqCi,
        },
        FilterColumn {
            key: "date_from",
            column: "ordered_date",
            mode: FilterMode::DateFrom,
        },
        FilterColumn {
            key: "date_to",
            column: "ordered_date",
            mode: FilterMode::DateTo,
        },
    ],
    lookups: &[Lookup {
        field: "number",
        column: "order_number",
        mode: FilterMode::Exact,
        pattern: "findByNumber",
    }],
    group: Some(GroupSpec {
        parent_key: "header_id",
        parent_columns: &[
            "header_id",
            "order_number",
            "customer_name",
            "ordered_date",
            "flow_status_code",
            "order_type",
            "branch_code",
        ],
        children_field: "lines",
        child_columns: &[
            ("line_number", "line_number"),
            ("ordered_item", "ordered_item"),
            ("ordered_quantity", "ordered_quantity"),
            ("unit_selling_price", "unit_selling_price"),
            ("line_status", "line_status"),
        ],
        line_column: "line_number",
    }),
    cached: false,
};

pub struct SalesOrders;

impl Entity for SalesOrders {
    type Record = SalesOrder;
    type Filter = SalesOrderQuery;

    fn view() -> &'static ViewDef {
        &VIEW
    }
}

impl ListFilter for SalesOrderQuery {
    fn to_spec(&self) -> QuerySpec {
        QuerySpec::new(self.page, self.limit)
            .text("order_number", self.order_number.as_deref())
            .text("customer_name", self.customer_name.as_deref())
            .text("flow_status_code", self.flow_status_code.as_deref())
            .text("branch_code", self.branch_code.as_deref())
            .date("date_from", self.date_from)
            .date("date_to", self.date_to)
    }
}
