use contracts::domain::a009_coa_expense::aggregate::{CoaExpense, CoaExpenseQuery};

use crate::shared::query::entity::{Entity, ListFilter};
use crate::shared::query::spec::QuerySpec;
use crate::shared::query::view::{FilterColumn, FilterMode, KeyKind, Lookup, Store, ViewDef};

pub static VIEW: ViewDef = ViewDef {
    entity: "Expense account",
    slug: "coa-expense",
    store: Store::Erp,
    source: "XTD_GL_COA_EXPENSE_V",
    columns: &[
        "code_combination_id",
        "account_code",
        "account_description",
        "expense_type",
        "enabled_flag",
    ],
    key_column: "code_combination_id",
    key_kind: KeyKind::Integer,
    order_key: "code_combination_id",
    filters: &[
        FilterColumn {
            key: "account_code",
            column: "account_code",
            mode: FilterMode::LikeCi,
        },
        FilterColumn {
            key: "account_description",
            column: "account_description",
            mode: FilterMode::LikeCi,
        },
        FilterColumn {
            key: "expense_type",
            column: "expense_type",
            mode: FilterMode::EqCi,
        },
        FilterColumn {
            key: "enabled_flag",
            column: "enabled_flag",
            mode: FilterMode::EqCi,
        },
    ],
    lookups: &[Lookup {
        field: "account",
        column: "account_code",
        mode: FilterMode::EqCi,
        pattern: "findByAccount",
    }],
    group: None,
    cached: false,
};

pub struct CoaExpenses;

impl Entity for CoaExpenses {
    type Record = CoaExpense;
    type Filter = CoaExpenseQuery;

    fn view() -> &'static ViewDef {
        &VIEW
    }
}

impl ListFilter for CoaExpenseQuery {
    fn to_spec(&self) -> QuerySpec {
        QuerySpec::new(self.page, self.limit)
            .text("account_code", self.account_code.as_deref())
            .text("account_description", self.account_description.as_deref())
            .text("expense_type", self.expense_type.as_deref())
            .text("enabled_flag", self.enabled_flag.as_deref())
    }
}
