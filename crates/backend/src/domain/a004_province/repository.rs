use contracts::domain::a004_province::aggregate::{Province, ProvinceQuery};

use crate::shared::query::entity::{Entity, ListFilter};
use crate::shared::query::spec::QuerySpec;
use crate::shared::query::view::{FilterColumn, FilterMode, KeyKind, Lookup, Store, ViewDef};

pub static VIEW: ViewDef = ViewDef {
    entity: "Province",
    slug: "province",
    store: Store::Erp,
    source: "XTD_AR_PROVINCES_V",
    columns: &[
        "province_id",
        "province_code",
        "province_name",
        "region",
        "country_code",
    ],
    key_column: "province_id",
    key_kind: KeyKind::Integer,
    order_key: "province_id",
    filters: &[
        FilterColumn {
            key: "province_code",
            column: "province_code",
            mode: FilterMode::EqCi,
        },
        FilterColumn {
            key: "province_name",
            column: "province_name",
            mode: FilterMode::LikeCi,
        },
        FilterColumn {
            key: "region",
            column: "region",
            mode: FilterMode::LikeCi,
        },
    ],
    lookups: &[Lookup {
        field: "code",
        column: "province_code",
        mode: FilterMode::EqCi,
        pattern: "findByCode",
    }],
    group: None,
    cached: false,
};

pub struct Provinces;

impl Entity for Provinces {
    type Record = Province;
    type Filter = ProvinceQuery;

    fn view() -> &'static ViewDef {
        &VIEW
    }
}

impl ListFilter for ProvinceQuery {
    fn to_spec(&self) -> QuerySpec {
        QuerySpec::new(self.page, self.limit)
            .text("province_code", self.province_code.as_deref())
            .text("province_name", self.province_name.as_deref())
            .text("region", self.region.as_deref())
    }
}
