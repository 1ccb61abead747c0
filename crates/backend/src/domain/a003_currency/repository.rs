use contracts::domain::a003_currency::aggregate::{Currency, CurrencyQuery};

use crate::shared::query::entity::{Entity, ListFilter};
use crate::shared::query::spec::QuerySpec;
use crate::shared::query::view::{FilterColumn, FilterMode, KeyKind, Lookup, Store, ViewDef};

pub static VIEW: ViewDef = ViewDef {
    entity: "Currency",
    slug: "currency",
    store: Store::Erp,
    source: "XTD_FND_CURRENCIES_V",
    columns: &["currency_code", "name", "symbol", "precision", "enabled_flag"],
    key_column: "currency_code",
    key_kind: KeyKind::Text,
    order_key: "currency_code",
    filters: &[
        FilterColumn {
            key: "currency_code",
            column: "currency_code",
            mode: FilterMode::EqCi,
        },
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
    ],
    // /api/currency/code/usd
    lookups: &[Lookup {
        field: "code",
        column: "currency_code",
        mode: FilterMode::EqCi,
        pattern: "findByCode",
    }],
    group: None,
    cached: false,
};

pub struct Currencies;

impl Entity for Currencies {
    type Record = Currency;
    type Filter = CurrencyQuery;

    fn view() -> &'static ViewDef {
        &VIEW
    }
}

impl ListFilter for CurrencyQuery {
    fn to_spec(&self) -> QuerySpec {
        QuerySpec::new(self.page, self.limit)
            .text("currency_code", self.currency_code.as_deref())
            .text("name", self.name.as_deref())
            .text("enabled_flag", self.enabled_flag.as_deref())
    }
}
