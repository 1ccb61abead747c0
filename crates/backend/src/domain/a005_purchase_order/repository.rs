use contracts::domain::a005_purchase_order::aggregate::{PurchaseOrder, PurchaseOrderQuery};

use crate::shared::query::entity::{Entity, ListFilter};
use crate::shared::query::spec::QuerySpec;
use crate::shared::query::view::{
    FilterColumn, FilterMode, GroupSpec, KeyKind, Lookup, Store, ViewDef,
};

/// Заголовки и строки заказов поставщику в одном представлении:
/// одна строка на позицию, шапка повторяется.
pub static VIEW: ViewDef = ViewDef {
    entity: "Purchase order",
    slug: "purchase-order",
    store: Store::Erp,
    source: "XTD_PO_HEADERS_LINES_V",
    columns: &[
        "po_header_id",
        "po_number",
        "vendor_name",
        "vendor_site_code",
        "order_date",
        "status",
        "currency_code",
        "line_num",
        "item_code",
        "item_description",
        "quantity",
        "uom",
        "unit_price",
        "amount",
    ],
    key_column: "po_header_id",
    key_kind: KeyKind::Integer,
    order_key: "po_header_id",
    filters: &[
        FilterColumn {
            key: "po_number",
            column: "po_number",
            mode: FilterMode::EqCi,
        },
        FilterColumn {
            key: "vendor_name",
            column: "vendor_name",
            mode: FilterMode::LikeCi,
        },
        FilterColumn {
            key: "status",
            column: "status",
            mode: FilterMode::EqCi,
        },
        FilterColumn {
            key: "item_code",
            column: "item_code",
            mode: FilterMode::EqCi,
        },
        FilterColumn {
            key: "date_from",
            column: "order_date",
            mode: FilterMode::DateFrom,
        },
        FilterColumn {
            key: "date_to",
            column: "order_date",
            mode: FilterMode::DateTo,
        },
    ],
    lookups: &[Lookup {
        field: "number",
        column: "po_number",
        mode: FilterMode::EqCi,
        pattern: "findByNumber",
    }],
    group: Some(GroupSpec {
        parent_key: "po_header_id",
        parent_columns: &[
            "po_header_id",
            "po_number",
            "vendor_name",
            "vendor_site_code",
            "order_date",
            "status",
            "currency_code",
        ],
        children_field: "lines",
        child_columns: &[
            ("line_num", "line_num"),
            ("item_code", "item_code"),
            ("item_description", "item_description"),
            ("quantity", "quantity"),
            ("uom", "uom"),
            ("unit_price", "unit_price"),
            ("amount", "amount"),
        ],
        line_column: "line_num",
    }),
    cached: false,
};

pub struct PurchaseOrders;

impl Entity for PurchaseOrders {
    type Record = PurchaseOrder;
    type Filter = PurchaseOrderQuery;

    fn view() -> &'static ViewDef {
        &VIEW
    }
}

impl ListFilter for PurchaseOrderQuery {
    fn to_spec(&self) -> QuerySpec {
        QuerySpec::new(self.page, self.limit)
            .text("po_number", self.po_number.as_deref())
            .text("vendor_name", self.vendor_name.as_deref())
            .text("status", self.status.as_deref())
            .text("item_code", self.item_code.as_deref())
            .date("date_from", self.date_from)
            .date("date_to", self.date_to)
    }
}
