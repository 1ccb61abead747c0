use contracts::domain::a001_ap_terms::aggregate::{ApTerm, ApTermsQuery};

use crate::shared::query::entity::{Entity, ListFilter};
use crate::shared::query::spec::QuerySpec;
use crate::shared::query::view::{FilterColumn, FilterMode, KeyKind, Store, ViewDef};

pub static VIEW: ViewDef = ViewDef {
    entity: "AP term",
    slug: "ap-terms",
    store: Store::Erp,
    source: "XTD_AP_TERMS_V",
    columns: &[
        "term_id",
        "name",
        "description",
        "due_days",
        "discount_percent",
        "enabled_flag",
        "start_date_active",
        "end_date_active",
    ],
    key_column: "term_id",
    key_kind: KeyKind::Integer,
    order_key: "term_id",
    filters: &[
        FilterColumn {
            key: "name",
            column: "name",
            mode: FilterMode::LikeCi,
        },
        FilterColumn {
            key: "enabled_flag",
            column: "enabled_flag",
            mode: FilterMode::EqCi,
        },
        FilterColumn {
            key: "due_days",
            column: "due_days",
            mode: FilterMode::Exact,
        },
    ],
    lookups: &[],
    group: None,
    cached: false,
};

pub struct ApTerms;

impl Entity for ApTerms {
    type Record = ApTerm;
    type Filter = ApTermsQuery;

    fn view() -> &'static ViewDef {
        &VIEW
    }
}

impl ListFilter for ApTermsQuery {
    fn to_spec(&self) -> QuerySpec {
        QuerySpec::new(self.page, self.limit)
            .text("name", self.name.as_deref())
            .text("enabled_flag", self.enabled_flag.as_deref())
            .integer("due_days", self.due_days)
    }
}
