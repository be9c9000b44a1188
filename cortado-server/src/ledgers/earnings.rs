//! 收入台账 — 订单关单折叠
//!
//! 关单是破坏性折叠：订单的总额按 (venue, 月份) 累加进收入条目，
//! 订单文档与开单索引随即删除，全部在同一个写事务内提交。
//! 崩溃恢复后不可能出现「已入账但订单还在」或反过来的中间态。
//!
//! 取消的订单只计入 `cancelled_count`，金额不进任何桶。

use chrono_tz::Tz;
use serde::Serialize;
use tracing::info;

use crate::orders::storage::OrderStorage;
use crate::pricing;
use crate::utils::error::{EngineError, EngineResult};
use crate::utils::time;
use shared::models::{CloseOutcome, EarningsEntry, PaymentMethod};

use super::storage::LedgerStorage;

/// Outcome summary returned to the caller after a closure
#[derive(Debug, Clone, Serialize)]
pub struct ClosedOrder {
    pub order_id: String,
    pub month_label: String,
    pub outcome: CloseOutcome,
    pub amount: f64,
}

#[derive(Clone)]
pub struct EarningsLedger {
    orders: OrderStorage,
    ledgers: LedgerStorage,
    tz: Tz,
}

impl EarningsLedger {
    pub fn new(orders: OrderStorage, ledgers: LedgerStorage, tz: Tz) -> Self {
        Self { orders, ledgers, tz }
    }

    /// Close an order and fold its total into the venue's monthly entry
    ///
    /// The month is derived from the order's creation time in the
    /// business timezone, so a bill closed shortly after midnight on
    /// the 1st still lands in the month it was opened.
    pub fn close_order(
        &self,
        venue_id: &str,
        order_id: &str,
        outcome: CloseOutcome,
        method: Option<PaymentMethod>,
    ) -> EngineResult<ClosedOrder> {
        if outcome == CloseOutcome::Paid && method.is_none() {
            return Err(EngineError::validation(
                "payment_method is required when closing as paid",
            ));
        }

        // 两个 facade 共享同一个数据库，一个写事务覆盖全部表
        let txn = self.ledgers.begin_write()?;

        self.ledgers
            .get_venue_txn(&txn, venue_id)?
            .ok_or_else(|| EngineError::not_found(format!("Venue {venue_id} not found")))?;

        let order = self
            .orders
            .get_order_txn(&txn, order_id)?
            .ok_or_else(|| EngineError::not_found(format!("Order {order_id} not found")))?;
        if order.venue_id != venue_id {
            return Err(EngineError::not_found(format!(
                "Order {order_id} does not belong to venue {venue_id}"
            )));
        }

        let month_key = time::month_key(order.created_at, self.tz);
        let month_label = time::month_label(order.created_at, self.tz);

        let mut entry = self
            .ledgers
            .get_earnings_txn(&txn, venue_id, &month_key)?
            .unwrap_or_else(|| EarningsEntry::new(&month_label));

        match outcome {
            CloseOutcome::Paid => {
                let amount = pricing::to_decimal(order.total_price);
                entry.total_amount =
                    pricing::to_money(pricing::to_decimal(entry.total_amount) + amount);
                match method {
                    Some(PaymentMethod::Cash) => {
                        entry.cash = pricing::to_money(pricing::to_decimal(entry.cash) + amount);
                    }
                    Some(PaymentMethod::Upi) => {
                        entry.upi = pricing::to_money(pricing::to_decimal(entry.upi) + amount);
                    }
                    Some(PaymentMethod::Card) => {
                        entry.card = pricing::to_money(pricing::to_decimal(entry.card) + amount);
                    }
                    // 入口已校验
                    None => unreachable!("paid closure without payment method"),
                }
                entry.paid_count += 1;
            }
            CloseOutcome::Cancelled => {
                entry.cancelled_count += 1;
            }
        }

        self.ledgers.put_earnings(&txn, venue_id, &month_key, &entry)?;
        self.orders.delete_order(&txn, order_id)?;
        let open_key = format!(
            "{}|{}|{}|{}",
            order.venue_id, order.table_id, order.customer_name, order.business_day
        );
        self.orders.clear_open_index_if(&txn, &open_key, order_id)?;
        self.ledgers.commit(txn)?;

        info!(
            order_id = %order_id,
            venue_id = %venue_id,
            outcome = %outcome,
            amount = order.total_price,
            month = %month_label,
            "Order closed"
        );
        Ok(ClosedOrder {
            order_id: order_id.to_string(),
            month_label,
            outcome,
            amount: order.total_price,
        })
    }

    /// A venue's full earnings history, chronological
    pub fn list_earnings(&self, venue_id: &str) -> EngineResult<Vec<EarningsEntry>> {
        self.ledgers
            .get_venue(venue_id)?
            .ok_or_else(|| EngineError::not_found(format!("Venue {venue_id} not found")))?;
        Ok(self.ledgers.list_earnings(venue_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledgers::venues::VenueRegistry;
    use crate::orders::OrdersManager;
    use chrono_tz::Asia::Kolkata;
    use shared::order::{OrderItemInput, PlaceOrderInput};

    struct Fixture {
        orders: OrdersManager,
        earnings: EarningsLedger,
        venues: VenueRegistry,
    }

    fn fixture() -> Fixture {
        let order_storage = OrderStorage::open_in_memory().unwrap();
        let ledger_storage = LedgerStorage::attach(order_storage.database()).unwrap();
        Fixture {
            orders: OrdersManager::new(order_storage.clone(), Kolkata),
            earnings: EarningsLedger::new(order_storage, ledger_storage.clone(), Kolkata),
            venues: VenueRegistry::new(ledger_storage),
        }
    }

    fn place(fx: &Fixture, total: f64) -> String {
        let (order, _) = fx
            .orders
            .place_order(PlaceOrderInput {
                venue_id: "v-1".to_string(),
                table_id: "t-1".to_string(),
                customer_name: "Asha".to_string(),
                items: vec![OrderItemInput {
                    dish_name: "Thali".to_string(),
                    dish_category: "Mains".to_string(),
                    quantity: 1,
                    base_price: total,
                    variant: None,
                    addons: vec![],
                }],
                cooking_request: None,
            })
            .unwrap();
        order.id
    }

    #[test]
    fn paid_closure_folds_amount_and_deletes_order() {
        let fx = fixture();
        fx.venues.upsert_venue("v-1", "Cortado Cafe", None).unwrap();
        let order_id = place(&fx, 250.0);

        let closed = fx
            .earnings
            .close_order("v-1", &order_id, CloseOutcome::Paid, Some(PaymentMethod::Cash))
            .unwrap();
        assert_eq!(closed.amount, 250.0);
        assert_eq!(closed.outcome, CloseOutcome::Paid);

        let history = fx.earnings.list_earnings("v-1").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].total_amount, 250.0);
        assert_eq!(history[0].cash, 250.0);
        assert_eq!(history[0].upi, 0.0);
        assert_eq!(history[0].paid_count, 1);

        assert!(matches!(
            fx.orders.get_order(&order_id),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn repeated_closures_accumulate() {
        let fx = fixture();
        fx.venues.upsert_venue("v-1", "Cortado Cafe", None).unwrap();

        let first = place(&fx, 100.0);
        fx.earnings
            .close_order("v-1", &first, CloseOutcome::Paid, Some(PaymentMethod::Cash))
            .unwrap();
        // 第一单关掉后索引已清，这里创建的是新订单
        let second = place(&fx, 40.5);
        fx.earnings
            .close_order("v-1", &second, CloseOutcome::Paid, Some(PaymentMethod::Upi))
            .unwrap();

        let entry = &fx.earnings.list_earnings("v-1").unwrap()[0];
        assert_eq!(entry.total_amount, 140.5);
        assert_eq!(entry.cash, 100.0);
        assert_eq!(entry.upi, 40.5);
        assert_eq!(entry.paid_count, 2);
    }

    #[test]
    fn cancelled_closure_counts_but_adds_nothing() {
        let fx = fixture();
        fx.venues.upsert_venue("v-1", "Cortado Cafe", None).unwrap();
        let order_id = place(&fx, 300.0);

        fx.earnings
            .close_order("v-1", &order_id, CloseOutcome::Cancelled, None)
            .unwrap();

        let entry = &fx.earnings.list_earnings("v-1").unwrap()[0];
        assert_eq!(entry.total_amount, 0.0);
        assert_eq!(entry.cancelled_count, 1);
        assert_eq!(entry.paid_count, 0);
    }

    #[test]
    fn paid_without_method_is_rejected_and_order_survives() {
        let fx = fixture();
        fx.venues.upsert_venue("v-1", "Cortado Cafe", None).unwrap();
        let order_id = place(&fx, 100.0);

        let err = fx
            .earnings
            .close_order("v-1", &order_id, CloseOutcome::Paid, None)
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
        assert!(fx.orders.get_order(&order_id).is_ok());
    }

    #[test]
    fn closing_for_wrong_venue_is_not_found() {
        let fx = fixture();
        fx.venues.upsert_venue("v-1", "Cortado Cafe", None).unwrap();
        fx.venues.upsert_venue("v-2", "Other", None).unwrap();
        let order_id = place(&fx, 100.0);

        let err = fx
            .earnings
            .close_order("v-2", &order_id, CloseOutcome::Paid, Some(PaymentMethod::Card))
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
        assert!(fx.orders.get_order(&order_id).is_ok());
    }
}
