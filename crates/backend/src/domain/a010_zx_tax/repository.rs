use contracts::domain::a010_zx_tax::aggregate::{ZxTax, ZxTaxQuery};

use crate::shared::query::entity::{Entity, ListFilter};
use crate::shared::query::spec::QuerySpec;
use crate::shared::query::view::{FilterColumn, FilterMode, KeyKind, Lookup, Store, ViewDef};

pub static VIEW: ViewDef = ViewDef {
    entity: "Tax rate",
    slug: "zx-tax",
    store: Store::Erp,
    source: "XTD_ZX_TAXES_V",
    columns: &[
        "tax_rate_id",
        "tax_rate_code",
        "tax",
        "tax_regime_code",
        "percentage_rate",
        "effective_from",
        "effective_to",
        "active_flag",
    ],
    key_column: "tax_rate_id",
    key_kind: KeyKind::Integer,
    order_key: "tax_rate_id",
    filters: &[
        FilterColumn {
            key: "tax_rate_code",
            column: "tax_rate_code",
            mode: FilterMode::EqCi,
        },
        FilterColumn {
            key: "tax",
            column: "tax",
            mode: FilterMode::LikeCi,
        },
        FilterColumn {
            key: "active_flag",
            column: "active_flag",
            mode: FilterMode::EqCi,
        },
        FilterColumn {
            key: "percentage_rate",
            column: "percentage_rate",
            mode: FilterMode::Exact,
        },
    ],
    lookups: &[Lookup {
        field: "code",
        column: "tax_rate_code",
        mode: FilterMode::EqCi,
        pattern: "findByCode",
    }],
    group: None,
    cached: false,
};

pub struct ZxTaxes;

impl Entity for ZxTaxes {
    type Record = ZxTax;
    type Filter = ZxTaxQuery;

    fn view() -> &'static ViewDef {
        &VIEW
    }
}

impl ListFilter for ZxTaxQuery {
    fn to_spec(&self) -> QuerySpec {
        QuerySpec::new(self.page, self.limit)
            .text("tax_rate_code", self.tax_rate_code.as_deref())
            .text("tax", self.tax.as_deref())
            .text("active_flag", self.active_flag.as_deref())
            .numeric("percentage_rate", self.percentage_rate)
    }
}
