use contracts::domain::a002_branch::aggregate::{Branch, BranchQuery};

use crate::shared::query::entity::{Entity, ListFilter};
use crate::shared::query::spec::QuerySpec;
use crate::shared::query::view::{FilterColumn, FilterMode, KeyKind, Lookup, Store, ViewDef};

/// Филиалы меняются редко: список идёт через кэш
pub static VIEW: ViewDef = ViewDef {
    entity: "Branch",
    slug: "branch",
    store: Store::Erp,
    source: "XTD_INV_BRANCHES_V",
    columns: &[
        "organization_id",
        "branch_code",
        "branch_name",
        "province_code",
        "address",
        "phone",
        "is_active",
    ],
    key_column: "organization_id",
    key_kind: KeyKind::Integer,
    order_key: "organization_id",
    filters: &[
        FilterColumn {
            key: "branch_code",
            column: "branch_code",
            mode: FilterMode::EqCi,
        },
        FilterColumn {
            key: "branch_name",
            column: "branch_name",
            mode: FilterMode::LikeCi,
        },
        FilterColumn {
            key: "province_code",
            column: "province_code",
            mode: FilterMode::EqCi,
        },
    ],
    lookups: &[Lookup {
        field: "code",
        column: "branch_code",
        mode: FilterMode::EqCi,
        pattern: "findByCode",
    }],
    group: None,
    cached: true,
};

pub struct Branches;

impl Entity for Branches {
    type Record = Branch;
    type Filter = BranchQuery;

    fn view() -> &'static ViewDef {
        &VIEW
    }
}

impl ListFilter for BranchQuery {
    fn to_spec(&self) -> QuerySpec {
        QuerySpec::new(self.page, self.limit)
            .text("branch_code", self.branch_code.as_deref())
            .text("branch_name", self.branch_name.as_deref())
            .text("province_code", self.province_code.as_deref())
    }
}
