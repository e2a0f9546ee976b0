//! Daily balance aggregation

use shared::models::{CurrencyMap, DailyBreakdown, Transaction, TransactionType};

/// Per-currency income, expense and balance of a pre-filtered list.
///
/// Every currency is present in the result. Amounts are taken as absolute
/// values. `Compra` and `Ajuste` are not counted.
pub fn aggregate(transactions: &[Transaction]) -> CurrencyMap<DailyBreakdown> {
    let mut breakdown = CurrencyMap::<DailyBreakdown>::default();
    for tx in transactions {
        let amount = tx.amount.abs();
        let entry = &mut breakdown[tx.currency];
        match tx.kind {
            TransactionType::Ingreso | TransactionType::Venta => {
                entry.income += amount;
                entry.balance += amount;
            }
            TransactionType::Egreso => {
                entry.expense += amount;
                entry.balance -= amount;
            }
            TransactionType::Compra | TransactionType::Ajuste => {}
        }
    }
    breakdown
}

/// Newest first
pub fn sort_for_display(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.time.cmp(&a.time));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use shared::models::Currency;

    fn tx(kind: TransactionType, currency: Currency, amount: Decimal) -> Transaction {
        Transaction {
            kind,
            currency,
            amount,
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_input_has_every_currency_zeroed() {
        let breakdown = aggregate(&[]);
        for (_, entry) in breakdown.iter() {
            assert_eq!(*entry, DailyBreakdown::default());
        }
        let json = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 6);
    }

    #[test]
    fn test_example_day() {
        let txs = vec![
            tx(TransactionType::Ingreso, Currency::Peso, dec!(1000)),
            tx(TransactionType::Egreso, Currency::Peso, dec!(300)),
            tx(TransactionType::Venta, Currency::Usd, dec!(50)),
        ];
        let breakdown = aggregate(&txs);

        assert_eq!(
            breakdown[Currency::Peso],
            DailyBreakdown {
                income: dec!(1000),
                expense: dec!(300),
                balance: dec!(700),
            }
        );
        assert_eq!(
            breakdown[Currency::Usd],
            DailyBreakdown {
                income: dec!(50),
                expense: dec!(0),
                balance: dec!(50),
            }
        );
        for currency in [
            Currency::Usdt,
            Currency::PesoTransferencia,
            Currency::Real,
            Currency::Guarani,
        ] {
            assert_eq!(breakdown[currency], DailyBreakdown::default());
        }
    }

    #[test]
    fn test_compra_and_ajuste_are_excluded() {
        let txs = vec![
            tx(TransactionType::Compra, Currency::Real, dec!(80)),
            tx(TransactionType::Ajuste, Currency::Real, dec!(15)),
        ];
        assert_eq!(aggregate(&txs)[Currency::Real], DailyBreakdown::default());
    }

    #[test]
    fn test_negative_amounts_use_magnitude() {
        let txs = vec![
            tx(TransactionType::Ingreso, Currency::Guarani, dec!(-200)),
            tx(TransactionType::Egreso, Currency::Guarani, dec!(-50)),
        ];
        let entry = aggregate(&txs)[Currency::Guarani];
        assert_eq!(entry.income, dec!(200));
        assert_eq!(entry.expense, dec!(50));
        assert_eq!(entry.balance, dec!(150));
    }

    #[test]
    fn test_aggregate_is_idempotent_and_order_independent() {
        let mut txs = vec![
            tx(TransactionType::Ingreso, Currency::Usdt, dec!(10.5)),
            tx(TransactionType::Egreso, Currency::Usdt, dec!(0.25)),
            tx(TransactionType::Venta, Currency::Peso, dec!(99)),
        ];
        let first = aggregate(&txs);
        assert_eq!(first, aggregate(&txs));
        txs.reverse();
        assert_eq!(first, aggregate(&txs));
    }

    #[test]
    fn test_sort_for_display_is_newest_first() {
        let at = |h| Utc.with_ymd_and_hms(2024, 1, 5, h, 0, 0).unwrap();
        let mut txs: Vec<Transaction> = [9, 17, 12]
            .into_iter()
            .map(|h| Transaction {
                id: h.to_string(),
                time: at(h),
                ..Default::default()
            })
            .collect();
        let before = aggregate(&txs);
        sort_for_display(&mut txs);
        let ids: Vec<_> = txs.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["17", "12", "9"]);
        assert_eq!(before, aggregate(&txs));
    }
}
