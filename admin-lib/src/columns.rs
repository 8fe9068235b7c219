//! Column sets for the admin tables.

use pagetable::{Alignment, CellValue, Column, RowActions};

use crate::format::{DASH, format_date, format_date_time, format_decimal_tr, time_ago_opt};
use crate::model::{Barcode, FirmSummary, ProductWithBarcodes, UserSummary};

/// Barcodes cell: `—`, the first barcode, plus a count of the rest.
pub fn barcodes_text(barcodes: &[Barcode]) -> String {
    match barcodes {
        [] => DASH.to_string(),
        [only] => only.barcode.clone(),
        [first, rest @ ..] => format!("{} +{} daha fazla...", first.barcode, rest.len()),
    }
}

/// Products table (server mode). Sortable ids match the API's `sortBy`.
pub fn product_columns() -> Vec<Column<ProductWithBarcodes>> {
    vec![
        Column::new("stockCode", "Stok Kodu", 12, |p: &ProductWithBarcodes| {
            p.product.stock_code.as_str().into()
        }),
        Column::new("name", "Ürün Adı", 30, |p: &ProductWithBarcodes| {
            p.product.name.as_str().into()
        }),
        Column::new("price", "Fiyat", 12, |p: &ProductWithBarcodes| {
            CellValue::Number(p.product.price)
        })
        .render(|p| format_decimal_tr(p.product.price))
        .align(Alignment::Right),
        Column::display("currency", "Döviz", 6, |p: &ProductWithBarcodes| {
            p.product.currency.clone()
        }),
        Column::new("stockQuantity", "Stok Miktarı", 12, |p: &ProductWithBarcodes| {
            CellValue::Number(p.product.stock_quantity)
        })
        .align(Alignment::Right),
        Column::display("unit", "Birim", 6, |p: &ProductWithBarcodes| p.product.unit.clone()),
        Column::display("barcodes", "Barkodlar", 28, |p: &ProductWithBarcodes| {
            barcodes_text(&p.barcodes)
        }),
        Column::display("createdAt", "Eklenme Tarihi", 14, |p: &ProductWithBarcodes| {
            format_date(p.product.created_at)
        }),
        Column::display("updatedAt", "Yenilenme Tarihi", 19, |p: &ProductWithBarcodes| {
            format_date_time(p.product.updated_at)
        }),
    ]
}

/// Firms table (client mode) with an edit/delete actions column.
pub fn firm_columns(actions: &RowActions<FirmSummary, i64>) -> Vec<Column<FirmSummary>> {
    vec![
        Column::new("id", "#", 5, |f: &FirmSummary| CellValue::Integer(f.id)),
        Column::new("name", "Firma Adı", 26, |f: &FirmSummary| f.name.as_str().into()),
        Column::new("diaServerCode", "Sunucu Kodu", 12, |f: &FirmSummary| {
            f.dia_server_code.as_str().into()
        }),
        Column::new("diaFirmCode", "Firma Kodu", 10, |f: &FirmSummary| {
            CellValue::Integer(f.dia_firm_code)
        }),
        Column::new("createdAt", "Oluşturulma", 14, |f: &FirmSummary| {
            CellValue::Integer(f.created_at.timestamp_millis())
        })
        .render(|f| time_ago_opt(Some(f.created_at))),
        Column::new("updatedAt", "Güncellenme", 14, |f: &FirmSummary| {
            f.updated_at.map(|d| d.timestamp_millis()).into()
        })
        .render(|f| time_ago_opt(f.updated_at)),
        actions.column("İşlemler"),
    ]
}

/// Users table (client mode).
pub fn user_columns() -> Vec<Column<UserSummary>> {
    vec![
        Column::new("id", "#", 5, |u: &UserSummary| CellValue::Integer(u.id)),
        Column::new("name", "Ad Soyad", 22, |u: &UserSummary| u.name.as_str().into()),
        Column::new("email", "E-posta", 28, |u: &UserSummary| u.email.as_str().into()),
        Column::new("firmId", "Firma ID", 9, |u: &UserSummary| CellValue::Integer(u.firm_id)),
        Column::new("role", "Rol", 12, |u: &UserSummary| u.role.label().into()),
        Column::new("createdAt", "Oluşturulma", 14, |u: &UserSummary| {
            CellValue::Integer(u.created_at.timestamp_millis())
        })
        .render(|u| time_ago_opt(Some(u.created_at))),
        Column::new("updatedAt", "Güncellenme", 14, |u: &UserSummary| {
            u.updated_at.map(|d| d.timestamp_millis()).into()
        })
        .render(|u| time_ago_opt(u.updated_at)),
    ]
}
