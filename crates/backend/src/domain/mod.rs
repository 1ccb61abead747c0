// ERP views (a001-a010)
pub mod a001_ap_terms;
pub mod a002_branch;
pub mod a003_currency;
pub mod a004_province;
pub mod a005_purchase_order;
pub mod a006_sales_order;
pub mod a007_sales_activity;
pub mod a008_sales_order_type;
pub mod a009_coa_expense;
pub mod a010_zx_tax;

// AUTH schema (a011-a012)
pub mod a011_user_dms;
pub mod a012_application;

pub mod service;

use crate::shared::query::view::ViewDef;

/// All served views, in module order
pub fn views() -> [&'static ViewDef; 12] {
    [
        &a001_ap_terms::repository::VIEW,
        &a002_branch::repository::VIEW,
        &a003_currency::repository::VIEW,
        &a004_province::repository::VIEW,
        &a005_purchase_order::repository::VIEW,
        &a006_sales_order::repository::VIEW,
        &a007_sales_activity::repository::VIEW,
        &a008_sales_order_type::repository::VIEW,
        &a009_coa_expense::repository::VIEW,
        &a010_zx_tax::repository::VIEW,
        &a011_user_dms::repository::VIEW,
        &a012_application::repository::VIEW,
    ]
}
