use contracts::domain::a011_user_dms::aggregate::{UserDms, UserDmsQuery};

use crate::shared::query::entity::{Entity, ListFilter};
use crate::shared::query::spec::QuerySpec;
use crate::shared::query::view::{FilterColumn, FilterMode, KeyKind, Lookup, Store, ViewDef};

/// Выдачи доступа: одна строка на пару пользователь/приложение
const SOURCE: &str = "(SELECT ua.id AS grant_id, u.id AS user_id, u.username, u.email, \
    u.full_name, u.is_active, a.code AS application_code, a.name AS application_name, \
    ua.granted_at \
    FROM auth.users u \
    JOIN auth.user_applications ua ON ua.user_id = u.id \
    JOIN auth.applications a ON a.id = ua.application_id) user_dms";

pub static VIEW: ViewDef = ViewDef {
    entity: "User grant",
    slug: "user-dms",
    store: Store::Auth,
    source: SOURCE,
    columns: &[
        "grant_id",
        "user_id",
        "username",
        "email",
        "full_name",
        "is_active",
        "application_code",
        "application_name",
        "granted_at",
    ],
    key_column: "grant_id",
    key_kind: KeyKind::Integer,
    order_key: "grant_id",
    filters: &[
        FilterColumn {
            key: "user_id",
            column: "user_id",
            mode: FilterMode::Exact,
        },
        FilterColumn {
            key: "username",
            column: "username",
            mode: FilterMode::LikeCi,
        },
        FilterColumn {
            key: "email",
            column: "email",
            mode: FilterMode::LikeCi,
        },
        FilterColumn {
            key: "application_code",
            column: "application_code",
            mode: FilterMode::EqCi,
        },
    ],
    lookups: &[Lookup {
        field: "username",
        column: "username",
        mode: FilterMode::EqCi,
        pattern: "findByUsername",
    }],
    group: None,
    cached: false,
};

pub struct UserGrants;

impl Entity for UserGrants {
    type Record = UserDms;
    type Filter = UserDmsQuery;

    fn view() -> &'static ViewDef {
        &VIEW
    }
}

impl ListFilter for UserDmsQuery {
    fn to_spec(&self) -> QuerySpec {
        QuerySpec::new(self.page, self.limit)
            .integer("user_id", self.user_id)
            .text("username", self.username.as_deref())
            .text("email", self.email.as_deref())
            .text("application_code", self.application_code.as_deref())
    }
}
