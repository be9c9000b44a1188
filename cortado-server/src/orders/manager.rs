//! 订单管理器 — 合并聚合与条目生命周期
//!
//! # 合并规则
//!
//! 下单请求不直接创建订单，而是对开单桶 (open bill) 的追加：
//! 同一 (venue, table, customer, 营业日) 且仍有在制条目的订单
//! 吸收新条目；否则创建新订单并替换索引。整个 find-or-create
//! 在一个写事务内完成，两个并发下单不可能都读到旧总额。
//!
//! # 金额维护
//!
//! `total_price` 只做增量更新 (Decimal 差值)，从不重算求和。
//! 每次变更 `version += 1`，可选的 `expected_version` 提供
//! 乐观并发检查。

use chrono_tz::Tz;
use rust_decimal::Decimal;
use shared::order::{
    DishAddon, ItemStatus, Order, OrderItem, OrderItemInput, PlaceOrderInput,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::pricing;
use crate::utils::error::{EngineError, EngineResult};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::time;

use super::storage::OrderStorage;

/// Separator inserted between an existing cooking request and a merged one
const REQUEST_SEPARATOR: &str = ". NEW REQUEST: ";

/// 订单管理器
#[derive(Clone)]
pub struct OrdersManager {
    storage: OrderStorage,
    tz: Tz,
}

impl OrdersManager {
    pub fn new(storage: OrderStorage, tz: Tz) -> Self {
        Self { storage, tz }
    }

    // ========== Placement / Merge ==========

    /// Place an order: merge into the open bill or create a new one
    ///
    /// Returns the resulting order and whether it was merged into an
    /// existing one.
    pub fn place_order(&self, input: PlaceOrderInput) -> EngineResult<(Order, bool)> {
        validate_required_text(&input.venue_id, "venue_id", MAX_NAME_LEN)?;
        validate_required_text(&input.table_id, "table_id", MAX_NAME_LEN)?;
        validate_required_text(&input.customer_name, "customer_name", MAX_NAME_LEN)?;
        validate_optional_text(&input.cooking_request, "cooking_request", MAX_NOTE_LEN)?;
        if input.items.is_empty() {
            return Err(EngineError::validation("order must contain at least one item"));
        }

        let new_items: Vec<OrderItem> = input
            .items
            .iter()
            .map(|i| self.build_item(i))
            .collect::<EngineResult<_>>()?;
        let added_total: Decimal = new_items.iter().map(|i| pricing::to_decimal(i.price)).sum();

        let now = shared::util::now_millis();
        let business_day = time::business_day(now, self.tz);
        let open_key = open_bill_key(
            &input.venue_id,
            &input.table_id,
            &input.customer_name,
            &business_day,
        );

        let txn = self.storage.begin_write().map_err(EngineError::from)?;
        let existing = match self.storage.get_open_order_id(&txn, &open_key)? {
            Some(order_id) => self.storage.get_order_txn(&txn, &order_id)?,
            None => None,
        };

        // 只有同营业日且仍有在制条目的订单才吸收合并
        let merged = existing
            .filter(|o| o.business_day == business_day && o.has_live_item());

        let (order, was_merged) = match merged {
            Some(mut order) => {
                order.items.extend(new_items);
                order.total_price =
                    pricing::to_money(pricing::to_decimal(order.total_price) + added_total);
                if let Some(request) = input.cooking_request.filter(|r| !r.trim().is_empty()) {
                    order.cooking_request = Some(match order.cooking_request.take() {
                        Some(prev) => format!("{prev}{REQUEST_SEPARATOR}{request}"),
                        None => request,
                    });
                }
                order.version += 1;
                (order, true)
            }
            None => {
                let order = Order {
                    id: Uuid::new_v4().to_string(),
                    venue_id: input.venue_id.clone(),
                    table_id: input.table_id.clone(),
                    customer_name: input.customer_name.clone(),
                    items: new_items,
                    cooking_request: input
                        .cooking_request
                        .filter(|r| !r.trim().is_empty()),
                    total_price: pricing::to_money(added_total),
                    version: 1,
                    created_at: now,
                    business_day,
                };
                (order, false)
            }
        };

        debug_assert_eq!(
            pricing::to_money(order.items.iter().map(|i| pricing::to_decimal(i.price)).sum()),
            order.total_price
        );

        self.storage.put_order(&txn, &order)?;
        self.storage.set_open_index(&txn, &open_key, &order.id)?;
        txn.commit().map_err(super::storage::StorageError::from)?;

        info!(
            order_id = %order.id,
            venue_id = %order.venue_id,
            table_id = %order.table_id,
            merged = was_merged,
            total = order.total_price,
            "Order placed"
        );
        Ok((order, was_merged))
    }

    /// Validate and price one submitted item
    fn build_item(&self, input: &OrderItemInput) -> EngineResult<OrderItem> {
        validate_required_text(&input.dish_name, "dish_name", MAX_NAME_LEN)?;
        validate_required_text(&input.dish_category, "dish_category", MAX_NAME_LEN)?;
        if let Some(v) = &input.variant {
            validate_required_text(&v.name, "variant name", MAX_NAME_LEN)?;
        }
        for addon in &input.addons {
            validate_required_text(&addon.name, "addon name", MAX_NAME_LEN)?;
        }

        let addon_prices: Vec<f64> = input.addons.iter().map(|a| a.price).collect();
        let price = pricing::resolve_line_price(
            input.base_price,
            input.variant.as_ref().map(|v| v.price),
            &addon_prices,
            input.quantity,
        )?;

        Ok(OrderItem {
            id: Uuid::new_v4().to_string(),
            dish_name: input.dish_name.clone(),
            dish_category: input.dish_category.clone(),
            quantity: input.quantity,
            base_price: input.base_price,
            variant: input.variant.clone(),
            addons: input
                .addons
                .iter()
                .map(|a| DishAddon {
                    id: Uuid::new_v4().to_string(),
                    name: a.name.clone(),
                    price: a.price,
                })
                .collect(),
            price,
            status: ItemStatus::Pending,
        })
    }

    // ========== Item Mutations ==========

    /// Change a line item's quantity, rescaling or overriding its price
    ///
    /// Without an explicit price the per-unit price is preserved; with
    /// one, the given value becomes the new line total.
    pub fn set_quantity(
        &self,
        order_id: &str,
        item_id: &str,
        new_quantity: u32,
        explicit_price: Option<f64>,
        expected_version: Option<u64>,
    ) -> EngineResult<Order> {
        pricing::validate_quantity(new_quantity)?;
        if let Some(p) = explicit_price {
            pricing::validate_price(p, "price")?;
        }

        self.mutate_order(order_id, expected_version, |order| {
            let item = order
                .find_item_mut(item_id)
                .ok_or_else(|| EngineError::not_found(format!("Item {item_id} not found")))?;
            if item.status.is_terminal() {
                return Err(EngineError::validation(format!(
                    "item is {} and can no longer change",
                    item.status
                )));
            }

            let new_price = match explicit_price {
                Some(p) => p,
                None => pricing::scale_to_quantity(item.price, item.quantity, new_quantity)?,
            };
            let delta = pricing::to_decimal(new_price) - pricing::to_decimal(item.price);
            item.quantity = new_quantity;
            item.price = new_price;
            order.total_price =
                pricing::to_money(pricing::to_decimal(order.total_price) + delta);
            Ok(())
        })
    }

    /// Advance a line item through the kitchen lifecycle
    ///
    /// Transitions follow the forward-with-skips rule; terminal states
    /// are sticky and a same-status update is a no-op.
    pub fn set_status(
        &self,
        order_id: &str,
        item_id: &str,
        next: ItemStatus,
        expected_version: Option<u64>,
    ) -> EngineResult<Order> {
        self.mutate_order(order_id, expected_version, |order| {
            let item = order
                .find_item_mut(item_id)
                .ok_or_else(|| EngineError::not_found(format!("Item {item_id} not found")))?;
            if !item.status.can_transition_to(next) {
                return Err(EngineError::validation(format!(
                    "illegal status transition: {} -> {}",
                    item.status, next
                )));
            }
            item.status = next;
            Ok(())
        })
    }

    /// Remove a line item; deletes the whole order when it was the last
    ///
    /// Returns `None` when the order was removed entirely.
    pub fn remove_item(
        &self,
        order_id: &str,
        item_id: &str,
        expected_version: Option<u64>,
    ) -> EngineResult<Option<Order>> {
        let txn = self.storage.begin_write().map_err(EngineError::from)?;
        let mut order = self
            .storage
            .get_order_txn(&txn, order_id)?
            .ok_or_else(|| EngineError::not_found(format!("Order {order_id} not found")))?;
        check_version(&order, expected_version)?;

        let position = order
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| EngineError::not_found(format!("Item {item_id} not found")))?;
        let removed = order.items.remove(position);

        if order.items.is_empty() {
            self.storage.delete_order(&txn, order_id)?;
            let key = open_bill_key(
                &order.venue_id,
                &order.table_id,
                &order.customer_name,
                &order.business_day,
            );
            self.storage.clear_open_index_if(&txn, &key, order_id)?;
            txn.commit().map_err(super::storage::StorageError::from)?;
            info!(order_id = %order_id, "Last item removed, order deleted");
            return Ok(None);
        }

        order.total_price = pricing::to_money(
            pricing::to_decimal(order.total_price) - pricing::to_decimal(removed.price),
        );
        order.version += 1;
        self.storage.put_order(&txn, &order)?;
        txn.commit().map_err(super::storage::StorageError::from)?;

        debug!(order_id = %order_id, item_id = %item_id, "Item removed");
        Ok(Some(order))
    }

    /// Remove one addon from a line item, repricing the line
    ///
    /// The addon's contribution (`addon.price × quantity`) is subtracted
    /// from the line price and the order total.
    pub fn remove_addon(
        &self,
        order_id: &str,
        item_id: &str,
        addon_id: &str,
        expected_version: Option<u64>,
    ) -> EngineResult<Order> {
        self.mutate_order(order_id, expected_version, |order| {
            let item = order
                .find_item_mut(item_id)
                .ok_or_else(|| EngineError::not_found(format!("Item {item_id} not found")))?;
            if item.status.is_terminal() {
                return Err(EngineError::validation(format!(
                    "item is {} and can no longer change",
                    item.status
                )));
            }
            let position = item
                .addons
                .iter()
                .position(|a| a.id == addon_id)
                .ok_or_else(|| EngineError::not_found(format!("Addon {addon_id} not found")))?;
            let addon = item.addons.remove(position);

            let delta =
                pricing::to_decimal(addon.price) * Decimal::from(item.quantity);
            item.price = pricing::to_money(pricing::to_decimal(item.price) - delta);
            order.total_price =
                pricing::to_money(pricing::to_decimal(order.total_price) - delta);
            Ok(())
        })
    }

    // ========== Queries / Removal ==========

    pub fn get_order(&self, order_id: &str) -> EngineResult<Order> {
        self.storage
            .get_order(order_id)?
            .ok_or_else(|| EngineError::not_found(format!("Order {order_id} not found")))
    }

    pub fn list_orders(&self, venue_id: &str) -> EngineResult<Vec<Order>> {
        Ok(self.storage.list_orders(venue_id)?)
    }

    /// Destructively remove a table's live order (staff correction)
    pub fn delete_by_table(&self, venue_id: &str, table_id: &str) -> EngineResult<Order> {
        let txn = self.storage.begin_write().map_err(EngineError::from)?;
        let order = self
            .storage
            .find_by_table_txn(&txn, venue_id, table_id)?
            .ok_or_else(|| {
                EngineError::not_found(format!(
                    "No live order for table {table_id} at venue {venue_id}"
                ))
            })?;
        self.storage.delete_order(&txn, &order.id)?;
        let key = open_bill_key(
            &order.venue_id,
            &order.table_id,
            &order.customer_name,
            &order.business_day,
        );
        self.storage.clear_open_index_if(&txn, &key, &order.id)?;
        txn.commit().map_err(super::storage::StorageError::from)?;

        info!(order_id = %order.id, table_id = %table_id, "Order deleted by table");
        Ok(order)
    }

    // ========== Internal ==========

    /// Load-mutate-store inside one write transaction, bumping version
    fn mutate_order<F>(
        &self,
        order_id: &str,
        expected_version: Option<u64>,
        mutate: F,
    ) -> EngineResult<Order>
    where
        F: FnOnce(&mut Order) -> EngineResult<()>,
    {
        let txn = self.storage.begin_write().map_err(EngineError::from)?;
        let mut order = self
            .storage
            .get_order_txn(&txn, order_id)?
            .ok_or_else(|| EngineError::not_found(format!("Order {order_id} not found")))?;
        check_version(&order, expected_version)?;

        mutate(&mut order)?;
        order.version += 1;

        debug_assert_eq!(
            pricing::to_money(order.items.iter().map(|i| pricing::to_decimal(i.price)).sum()),
            order.total_price
        );

        self.storage.put_order(&txn, &order)?;
        txn.commit().map_err(super::storage::StorageError::from)?;
        Ok(order)
    }
}

/// 开单索引键：venue|table|customer|营业日
fn open_bill_key(venue_id: &str, table_id: &str, customer: &str, business_day: &str) -> String {
    format!("{venue_id}|{table_id}|{customer}|{business_day}")
}

fn check_version(order: &Order, expected: Option<u64>) -> EngineResult<()> {
    if let Some(expected) = expected
        && order.version != expected
    {
        return Err(EngineError::conflict(format!(
            "order version is {}, expected {}",
            order.version, expected
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Asia::Kolkata;
    use shared::order::{DishAddonInput, DishVariant};

    fn manager() -> OrdersManager {
        OrdersManager::new(OrderStorage::open_in_memory().unwrap(), Kolkata)
    }

    fn item_input(name: &str, base: f64, qty: u32) -> OrderItemInput {
        OrderItemInput {
            dish_name: name.to_string(),
            dish_category: "Mains".to_string(),
            quantity: qty,
            base_price: base,
            variant: None,
            addons: vec![],
        }
    }

    fn placement(items: Vec<OrderItemInput>) -> PlaceOrderInput {
        PlaceOrderInput {
            venue_id: "v-1".to_string(),
            table_id: "t-4".to_string(),
            customer_name: "Asha".to_string(),
            items,
            cooking_request: None,
        }
    }

    #[test]
    fn first_placement_creates_order() {
        let mgr = manager();
        let (order, merged) = mgr.place_order(placement(vec![item_input("Dosa", 120.0, 2)])).unwrap();
        assert!(!merged);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total_price, 240.0);
        assert_eq!(order.version, 1);
        assert_eq!(order.items[0].status, ItemStatus::Pending);
    }

    #[test]
    fn second_placement_merges_into_open_bill() {
        let mgr = manager();
        let (first, _) = mgr.place_order(placement(vec![item_input("Dosa", 120.0, 1)])).unwrap();
        let (second, merged) =
            mgr.place_order(placement(vec![item_input("Chai", 30.0, 2)])).unwrap();

        assert!(merged);
        assert_eq!(second.id, first.id);
        assert_eq!(second.items.len(), 2);
        assert_eq!(second.total_price, 180.0);
        assert_eq!(second.version, 2);
        // 条目 id 全部稳定且互不相同
        assert_ne!(second.items[0].id, second.items[1].id);
    }

    #[test]
    fn different_customer_gets_own_order() {
        let mgr = manager();
        let (first, _) = mgr.place_order(placement(vec![item_input("Dosa", 120.0, 1)])).unwrap();

        let mut other = placement(vec![item_input("Idli", 60.0, 1)]);
        other.customer_name = "Ravi".to_string();
        let (second, merged) = mgr.place_order(other).unwrap();

        assert!(!merged);
        assert_ne!(second.id, first.id);
    }

    #[test]
    fn cooking_requests_concatenate_on_merge() {
        let mgr = manager();
        let mut first = placement(vec![item_input("Dosa", 120.0, 1)]);
        first.cooking_request = Some("less spicy".to_string());
        mgr.place_order(first).unwrap();

        let mut second = placement(vec![item_input("Chai", 30.0, 1)]);
        second.cooking_request = Some("no sugar".to_string());
        let (order, merged) = mgr.place_order(second).unwrap();

        assert!(merged);
        assert_eq!(
            order.cooking_request.as_deref(),
            Some("less spicy. NEW REQUEST: no sugar")
        );
    }

    #[test]
    fn bill_from_previous_business_day_is_not_absorbed() {
        let storage = OrderStorage::open_in_memory().unwrap();
        let mgr = OrdersManager::new(storage.clone(), Kolkata);
        let (order, _) = mgr.place_order(placement(vec![item_input("Dosa", 120.0, 1)])).unwrap();

        // 把存量订单改写成昨天的营业日，索引仍指向它
        let txn = storage.begin_write().unwrap();
        let mut stale = storage.get_order_txn(&txn, &order.id).unwrap().unwrap();
        stale.business_day = "2024-01-01".to_string();
        storage.put_order(&txn, &stale).unwrap();
        txn.commit().unwrap();

        let (fresh, merged) = mgr.place_order(placement(vec![item_input("Chai", 30.0, 1)])).unwrap();
        assert!(!merged);
        assert_ne!(fresh.id, order.id);
        assert_eq!(fresh.items.len(), 1);
        // 昨天的账单保持不变
        assert_eq!(mgr.get_order(&order.id).unwrap().total_price, 120.0);
    }

    #[test]
    fn key_separator_in_customer_name_is_rejected() {
        let mgr = manager();
        let mut input = placement(vec![item_input("Dosa", 120.0, 1)]);
        input.customer_name = "Asha|Ravi".to_string();
        let err = mgr.place_order(input).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn all_terminal_items_stop_merging() {
        let mgr = manager();
        let (order, _) = mgr.place_order(placement(vec![item_input("Dosa", 120.0, 1)])).unwrap();
        mgr.set_status(&order.id, &order.items[0].id, ItemStatus::Paid, None).unwrap();

        let (fresh, merged) = mgr.place_order(placement(vec![item_input("Chai", 30.0, 1)])).unwrap();
        assert!(!merged);
        assert_ne!(fresh.id, order.id);
        // 旧订单仍然存在，只是不再吸收
        assert!(mgr.get_order(&order.id).is_ok());
    }

    #[test]
    fn variant_and_addons_price_the_line() {
        let mgr = manager();
        let mut input = item_input("Pizza", 100.0, 2);
        input.variant = Some(DishVariant { name: "Large".to_string(), price: 20.0 });
        input.addons = vec![
            DishAddonInput { name: "Cheese".to_string(), price: 15.0 },
            DishAddonInput { name: "Olives".to_string(), price: 15.0 },
        ];
        let (order, _) = mgr.place_order(placement(vec![input])).unwrap();
        assert_eq!(order.items[0].price, 300.0);
        assert_eq!(order.total_price, 300.0);
        assert_eq!(order.items[0].addons.len(), 2);
    }

    #[test]
    fn set_quantity_rescales_per_unit_price() {
        let mgr = manager();
        let (order, _) = mgr.place_order(placement(vec![item_input("Dosa", 120.0, 2)])).unwrap();
        let item_id = order.items[0].id.clone();

        let updated = mgr.set_quantity(&order.id, &item_id, 3, None, None).unwrap();
        assert_eq!(updated.items[0].quantity, 3);
        assert_eq!(updated.items[0].price, 360.0);
        assert_eq!(updated.total_price, 360.0);
        assert_eq!(updated.version, 2);
    }

    #[test]
    fn set_quantity_honors_explicit_price() {
        let mgr = manager();
        let (order, _) = mgr.place_order(placement(vec![item_input("Dosa", 120.0, 2)])).unwrap();
        let item_id = order.items[0].id.clone();

        let updated = mgr.set_quantity(&order.id, &item_id, 3, Some(300.0), None).unwrap();
        assert_eq!(updated.items[0].price, 300.0);
        assert_eq!(updated.total_price, 300.0);
    }

    #[test]
    fn status_fsm_rejects_backward_transition() {
        let mgr = manager();
        let (order, _) = mgr.place_order(placement(vec![item_input("Dosa", 120.0, 1)])).unwrap();
        let item_id = order.items[0].id.clone();

        mgr.set_status(&order.id, &item_id, ItemStatus::Delivered, None).unwrap();
        let err = mgr.set_status(&order.id, &item_id, ItemStatus::Preparing, None).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn same_status_update_is_noop_but_bumps_version() {
        let mgr = manager();
        let (order, _) = mgr.place_order(placement(vec![item_input("Dosa", 120.0, 1)])).unwrap();
        let item_id = order.items[0].id.clone();

        let updated = mgr.set_status(&order.id, &item_id, ItemStatus::Pending, None).unwrap();
        assert_eq!(updated.items[0].status, ItemStatus::Pending);
        assert_eq!(updated.version, 2);
    }

    #[test]
    fn paid_item_cannot_change_quantity() {
        let mgr = manager();
        let (order, _) = mgr.place_order(placement(vec![item_input("Dosa", 120.0, 1)])).unwrap();
        let item_id = order.items[0].id.clone();
        mgr.set_status(&order.id, &item_id, ItemStatus::Paid, None).unwrap();

        let err = mgr.set_quantity(&order.id, &item_id, 2, None, None).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn remove_item_updates_total() {
        let mgr = manager();
        let (order, _) = mgr
            .place_order(placement(vec![
                item_input("Dosa", 120.0, 1),
                item_input("Chai", 30.0, 2),
            ]))
            .unwrap();
        let first_id = order.items[0].id.clone();

        let remaining = mgr.remove_item(&order.id, &first_id, None).unwrap().unwrap();
        assert_eq!(remaining.items.len(), 1);
        assert_eq!(remaining.total_price, 60.0);
    }

    #[test]
    fn removing_last_item_deletes_order() {
        let mgr = manager();
        let (order, _) = mgr.place_order(placement(vec![item_input("Dosa", 120.0, 1)])).unwrap();
        let item_id = order.items[0].id.clone();

        assert!(mgr.remove_item(&order.id, &item_id, None).unwrap().is_none());
        assert!(matches!(mgr.get_order(&order.id), Err(EngineError::NotFound(_))));

        // 索引也被清掉，新下单创建全新订单
        let (fresh, merged) = mgr.place_order(placement(vec![item_input("Chai", 30.0, 1)])).unwrap();
        assert!(!merged);
        assert_ne!(fresh.id, order.id);
    }

    #[test]
    fn remove_addon_reprices_line_and_total() {
        let mgr = manager();
        let mut input = item_input("Pizza", 100.0, 2);
        input.addons = vec![DishAddonInput { name: "Cheese".to_string(), price: 15.0 }];
        let (order, _) = mgr.place_order(placement(vec![input])).unwrap();
        let item_id = order.items[0].id.clone();
        let addon_id = order.items[0].addons[0].id.clone();
        assert_eq!(order.total_price, 230.0);

        let updated = mgr.remove_addon(&order.id, &item_id, &addon_id, None).unwrap();
        assert!(updated.items[0].addons.is_empty());
        assert_eq!(updated.items[0].price, 200.0);
        assert_eq!(updated.total_price, 200.0);
    }

    #[test]
    fn stale_version_is_rejected() {
        let mgr = manager();
        let (order, _) = mgr.place_order(placement(vec![item_input("Dosa", 120.0, 1)])).unwrap();
        let item_id = order.items[0].id.clone();

        mgr.set_quantity(&order.id, &item_id, 2, None, None).unwrap();
        let err = mgr
            .set_quantity(&order.id, &item_id, 3, None, Some(order.version))
            .unwrap_err();
        assert!(matches!(err, EngineError::Conflict(_)));
    }

    #[test]
    fn delete_by_table_removes_order_and_index() {
        let mgr = manager();
        let (order, _) = mgr.place_order(placement(vec![item_input("Dosa", 120.0, 1)])).unwrap();

        let deleted = mgr.delete_by_table("v-1", "t-4").unwrap();
        assert_eq!(deleted.id, order.id);
        assert!(matches!(mgr.get_order(&order.id), Err(EngineError::NotFound(_))));
        assert!(matches!(
            mgr.delete_by_table("v-1", "t-4"),
            Err(EngineError::NotFound(_))
        ));
    }

    #[test]
    fn empty_item_list_is_rejected() {
        let mgr = manager();
        let err = mgr.place_order(placement(vec![])).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }
}
