//! Dashboard statistics
//!
//! Loads stock, sales, cash transactions and technical services in full and
//! folds them into headline figures plus chart series. Every figure is
//! rounded to whole currency units (half away from zero). Totals across
//! currencies are summed without conversion.

use crate::repository::{cash_transaction, sale, stock, technical_service};
use crate::store::{DocumentStore, StoreResult};
use crate::utils::time::{local_date, local_month, months_back};
use chrono::{Datelike, Days, NaiveDate};
use chrono_tz::Tz;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use shared::models::{
    Sale, ServiceStatus, StockItem, TechnicalService, Transaction, TransactionType,
};
use std::collections::HashMap;
use thiserror::Error;

const SALES_DAYS: u64 = 30;
const FINANCIAL_MONTHS: u32 = 6;
const LOW_STOCK_MAX: i64 = 5;
const TOP_PRODUCTS: usize = 10;
const PRODUCT_NAME_MAX: usize = 40;

const MONTH_LABELS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

// ============================================================================
// Response Types
// ============================================================================

/// Headline figures
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Units in stock
    pub total_products: i64,
    pub low_stock_products: i64,
    pub total_product_value: i64,
    pub total_sales_revenue: i64,
    pub total_sales: i64,
    pub cash_income: i64,
    pub cash_expense: i64,
    pub net_cash_flow: i64,
    pub total_debt: i64,
    pub total_services_revenue: i64,
    pub pending_services: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesDay {
    /// YYYY-MM-DD
    pub date: String,
    /// dd/mm
    pub label: String,
    pub sales: i64,
    pub income: i64,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialMonth {
    /// YYYY-MM
    pub month: String,
    pub label: String,
    pub income: i64,
    pub expense: i64,
    pub net: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSlice {
    pub name: String,
    pub value: i64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopProduct {
    pub name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentMethodSlice {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCharts {
    pub sales_by_day: Vec<SalesDay>,
    pub financial_by_month: Vec<FinancialMonth>,
    pub services_by_status: Vec<StatusSlice>,
    pub top_products: Vec<TopProduct>,
    pub payment_methods_data: Vec<PaymentMethodSlice>,
}

/// `GET /api/dashboard/stats` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardPayload {
    pub stats: DashboardStats,
    pub charts: DashboardCharts,
}

// ============================================================================
// Input
// ============================================================================

/// The four collections the dashboard reads
#[derive(Debug, Clone, Default)]
pub struct DashboardInput {
    pub stock: Vec<StockItem>,
    pub sales: Vec<Sale>,
    pub transactions: Vec<Transaction>,
    pub services: Vec<TechnicalService>,
}

impl DashboardInput {
    /// Load everything; the first failure aborts the whole load
    pub async fn load(store: &dyn DocumentStore) -> StoreResult<Self> {
        let (stock, sales, transactions, services) = futures::try_join!(
            stock::find_all(store),
            sale::find_all(store),
            cash_transaction::find_all(store),
            technical_service::find_all(store),
        )?;
        Ok(Self {
            stock,
            sales,
            transactions,
            services,
        })
    }
}

// ============================================================================
// Computation
// ============================================================================

/// A figure left the representable range
#[derive(Debug, Error)]
#[error("dashboard figure {0} overflowed")]
pub struct DashboardError(pub &'static str);

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Round to whole units, half away from zero, saturating at the i64 range
fn whole(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(if value.is_sign_negative() {
            i64::MIN
        } else {
            i64::MAX
        })
}

fn sum_decimal(
    values: impl IntoIterator<Item = Decimal>,
    figure: &'static str,
) -> DashboardResult<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .ok_or(DashboardError(figure))
}

fn sum_i64(values: impl IntoIterator<Item = i64>, figure: &'static str) -> DashboardResult<i64> {
    values
        .into_iter()
        .try_fold(0i64, |acc, v| acc.checked_add(v))
        .ok_or(DashboardError(figure))
}

fn add(acc: &mut Decimal, value: Decimal, figure: &'static str) -> DashboardResult<()> {
    *acc = acc.checked_add(value).ok_or(DashboardError(figure))?;
    Ok(())
}

fn net(income: Decimal, expense: Decimal, figure: &'static str) -> DashboardResult<Decimal> {
    income.checked_sub(expense).ok_or(DashboardError(figure))
}

fn cash_in(tx: &Transaction) -> Decimal {
    if tx.kind.is_inflow() {
        tx.amount.abs()
    } else {
        Decimal::ZERO
    }
}

fn cash_out(tx: &Transaction) -> Decimal {
    if tx.kind == TransactionType::Egreso {
        tx.amount.abs()
    } else {
        Decimal::ZERO
    }
}

/// Build the dashboard for `today` (a date in `tz`)
pub fn compute(input: &DashboardInput, today: NaiveDate, tz: Tz) -> DashboardResult<DashboardPayload> {
    Ok(DashboardPayload {
        stats: headline(input)?,
        charts: DashboardCharts {
            sales_by_day: sales_by_day(input, today, tz)?,
            financial_by_month: financial_by_month(&input.transactions, today, tz)?,
            services_by_status: services_by_status(&input.services),
            top_products: top_products(&input.sales)?,
            payment_methods_data: payment_methods(&input.sales),
        },
    })
}

fn headline(input: &DashboardInput) -> DashboardResult<DashboardStats> {
    let total_products = sum_i64(input.stock.iter().map(|item| item.quantity), "totalProducts")?;
    let low_stock_products = input
        .stock
        .iter()
        .filter(|item| item.quantity > 0 && item.quantity <= LOW_STOCK_MAX)
        .count() as i64;
    let total_product_value = input
        .stock
        .iter()
        .map(|item| item.price.checked_mul(Decimal::from(item.quantity)))
        .collect::<Option<Vec<_>>>()
        .ok_or(DashboardError("totalProductValue"))?;
    let total_product_value = sum_decimal(total_product_value, "totalProductValue")?;

    let total_sales_revenue = sum_decimal(input.sales.iter().map(|s| s.total), "totalSalesRevenue")?;

    let cash_income = sum_decimal(input.transactions.iter().map(cash_in), "cashIncome")?;
    let cash_expense = sum_decimal(input.transactions.iter().map(cash_out), "cashExpense")?;
    let total_debt = sum_decimal(
        input.transactions.iter().filter_map(Transaction::outstanding_debt),
        "totalDebt",
    )?;

    let total_services_revenue = sum_decimal(
        input
            .services
            .iter()
            .filter(|s| s.status == ServiceStatus::Pagado)
            .map(|s| s.total),
        "totalServicesRevenue",
    )?;
    let pending_services = input
        .services
        .iter()
        .filter(|s| s.status != ServiceStatus::Pagado)
        .count() as i64;

    Ok(DashboardStats {
        total_products,
        low_stock_products,
        total_product_value: whole(total_product_value),
        total_sales_revenue: whole(total_sales_revenue),
        total_sales: input.sales.len() as i64,
        cash_income: whole(cash_income),
        cash_expense: whole(cash_expense),
        net_cash_flow: whole(net(cash_income, cash_expense, "netCashFlow")?),
        total_debt: whole(total_debt),
        total_services_revenue: whole(total_services_revenue),
        pending_services,
    })
}

/// The last 30 days ending today, oldest first
fn sales_by_day(input: &DashboardInput, today: NaiveDate, tz: Tz) -> DashboardResult<Vec<SalesDay>> {
    let mut sales: HashMap<NaiveDate, (Decimal, i64)> = HashMap::new();
    for s in &input.sales {
        let entry = sales.entry(local_date(s.date, tz)).or_default();
        add(&mut entry.0, s.total, "salesByDay")?;
        entry.1 += 1;
    }
    let mut income: HashMap<NaiveDate, Decimal> = HashMap::new();
    for tx in &input.transactions {
        add(income.entry(local_date(tx.time, tz)).or_default(), cash_in(tx), "salesByDay")?;
    }

    Ok((0..SALES_DAYS)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| {
            let (total, count) = sales.get(&date).copied().unwrap_or_default();
            SalesDay {
                date: date.format("%Y-%m-%d").to_string(),
                label: date.format("%d/%m").to_string(),
                sales: whole(total),
                income: whole(income.get(&date).copied().unwrap_or_default()),
                count,
            }
        })
        .collect())
}

/// The last 6 months ending with the current one, oldest first
fn financial_by_month(
    transactions: &[Transaction],
    today: NaiveDate,
    tz: Tz,
) -> DashboardResult<Vec<FinancialMonth>> {
    let mut totals: HashMap<(i32, u32), (Decimal, Decimal)> = HashMap::new();
    for tx in transactions {
        let entry = totals.entry(local_month(tx.time, tz)).or_default();
        add(&mut entry.0, cash_in(tx), "financialByMonth")?;
        add(&mut entry.1, cash_out(tx), "financialByMonth")?;
    }

    (0..FINANCIAL_MONTHS)
        .rev()
        .map(|back| -> DashboardResult<FinancialMonth> {
            let (year, month) = months_back(today.year(), today.month(), back);
            let (income, expense) = totals.get(&(year, month)).copied().unwrap_or_default();
            Ok(FinancialMonth {
                month: format!("{year:04}-{month:02}"),
                label: MONTH_LABELS[(month - 1) as usize].to_string(),
                income: whole(income),
                expense: whole(expense),
                net: whole(net(income, expense, "financialByMonth")?),
            })
        })
        .collect()
}

fn services_by_status(services: &[TechnicalService]) -> Vec<StatusSlice> {
    let count = |status: ServiceStatus| services.iter().filter(|s| s.status == status).count() as i64;
    [
        (ServiceStatus::Pagado, "Pagados", "#10B981"),
        (ServiceStatus::Pendiente, "Pendientes", "#F59E0B"),
        (ServiceStatus::EnProceso, "En proceso", "#3B82F6"),
    ]
    .into_iter()
    .map(|(status, name, color)| StatusSlice {
        name: name.to_string(),
        value: count(status),
        color: color.to_string(),
    })
    .collect()
}

fn truncate_name(name: &str) -> String {
    if name.chars().count() > PRODUCT_NAME_MAX {
        let head: String = name.chars().take(PRODUCT_NAME_MAX).collect();
        format!("{head}...")
    } else {
        name.to_string()
    }
}

/// Units sold per product across every sale, top 10
fn top_products(sales: &[Sale]) -> DashboardResult<Vec<TopProduct>> {
    // Keyed by product id, falling back to the line name
    let mut units: HashMap<&str, (&str, i64)> = HashMap::new();
    for item in sales.iter().flat_map(|s| &s.items) {
        let key = if item.product_id.is_empty() {
            item.name.as_str()
        } else {
            item.product_id.as_str()
        };
        let entry = units.entry(key).or_insert((item.name.as_str(), 0));
        entry.1 = entry
            .1
            .checked_add(item.quantity)
            .ok_or(DashboardError("topProducts"))?;
    }

    let mut ranked: Vec<(&str, i64)> = units.into_values().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    Ok(ranked
        .into_iter()
        .take(TOP_PRODUCTS)
        .map(|(name, quantity)| TopProduct {
            name: truncate_name(name),
            quantity,
        })
        .collect())
}

fn payment_label(method: &str) -> &str {
    match method {
        "cash" => "Efectivo",
        "card" => "Tarjeta",
        "transfer" => "Transferencia",
        other => other,
    }
}

/// Sales per payment method, most used first
fn payment_methods(sales: &[Sale]) -> Vec<PaymentMethodSlice> {
    let mut counts: HashMap<&str, i64> = HashMap::new();
    for s in sales {
        *counts.entry(payment_label(&s.payment_method)).or_default() += 1;
    }
    let mut slices: Vec<PaymentMethodSlice> = counts
        .into_iter()
        .map(|(name, value)| PaymentMethodSlice {
            name: name.to_string(),
            value,
        })
        .collect();
    slices.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    slices
}
