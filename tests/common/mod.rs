// Shared fixtures for stocklens integration tests
#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

pub const HEADER: &str = "COMERCIO,MARCA,CATEGORIA,SUBCATEGORIA,CODIGO,PRODUCTO,PROMEDIO_DIAS_VENTAS,margen_bruto_%,beneficio_promedio_por_producto,STOCK,unidades_vendidas_totales";

/// One CSV row of the summary table.
#[derive(Debug, Clone)]
pub struct Row {
    pub division: &'static str,
    pub brand: &'static str,
    pub category: &'static str,
    pub subcategory: &'static str,
    pub code: String,
    pub name: String,
    pub days: f64,
    pub margin_pct: f64,
    pub profit: f64,
    pub stock: u64,
    pub sold: u64,
}

impl Row {
    pub fn new(division: &'static str, code: &str) -> Self {
        Self {
            division,
            brand: "BOSCH",
            category: "FILTROS",
            subcategory: "ACEITE",
            code: code.to_string(),
            name: format!("Producto {code}"),
            days: 30.0,
            margin_pct: 40.0,
            profit: 25.0,
            stock: 3,
            sold: 12,
        }
    }

    pub fn days(mut self, days: f64) -> Self {
        self.days = days;
        self
    }

    pub fn profit(mut self, profit: f64) -> Self {
        self.profit = profit;
        self
    }

    pub fn margin(mut self, margin_pct: f64) -> Self {
        self.margin_pct = margin_pct;
        self
    }

    pub fn stock(mut self, stock: u64) -> Self {
        self.stock = stock;
        self
    }

    pub fn brand(mut self, brand: &'static str) -> Self {
        self.brand = brand;
        self
    }

    pub fn category(mut self, category: &'static str) -> Self {
        self.category = category;
        self
    }
}

pub fn to_csv(rows: &[Row]) -> String {
    let mut out = format!("{HEADER}\n");
    for r in rows {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{}",
            r.division,
            r.brand,
            r.category,
            r.subcategory,
            r.code,
            r.name,
            r.days,
            r.margin_pct,
            r.profit,
            r.stock,
            r.sold
        );
    }
    out
}

pub fn write_csv(dir: &Path, name: &str, rows: &[Row]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, to_csv(rows)).expect("write fixture csv");
    path
}

/// Ten warehouse items: three over 180 days with stock, one over 180 days
/// without stock, two loss-makers with stock and two stars near stockout.
pub fn warehouse_ten() -> Vec<Row> {
    vec![
        Row::new("ALMACEN", "W01").days(200.0).profit(15.0),
        Row::new("ALMACEN", "W02").days(365.5).profit(-5.0).stock(4),
        Row::new("ALMACEN", "W03").days(181.0).profit(120.0).stock(1),
        Row::new("ALMACEN", "W04").days(400.0).stock(0),
        Row::new("ALMACEN", "W05").days(45.0).profit(-50.0).margin(-20.0).stock(2),
        Row::new("ALMACEN", "W06").days(10.0).margin(43.6).stock(1),
        Row::new("ALMACEN", "W07").days(60.0).stock(0),
        Row::new("ALMACEN", "W08").days(75.0).profit(5.0),
        Row::new("ALMACEN", "W09").days(120.0).profit(10.0).brand("MANN"),
        Row::new("ALMACEN", "W10").days(90.0).profit(99.9).category("FRENOS"),
    ]
}

pub fn workshop_only() -> Vec<Row> {
    vec![
        Row::new("TALLER", "T01").days(20.0),
        Row::new("TALLER", "T02").days(220.0).profit(-3.0),
    ]
}
