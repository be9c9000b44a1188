//! 并发合并压力测试
//!
//! 多个任务同时向同一个开单键下单，验证 find-or-create 合并在
//! 单写者事务下不丢更新：最终只有一个订单，条目数和总额精确等于
//! 所有下单之和。

use chrono_tz::Asia::Kolkata;
use cortado_server::orders::{OrderStorage, OrdersManager};
use shared::order::{OrderItemInput, PlaceOrderInput};

fn placement(dish: String, price: f64) -> PlaceOrderInput {
    PlaceOrderInput {
        venue_id: "v-1".to_string(),
        table_id: "t-9".to_string(),
        customer_name: "Asha".to_string(),
        items: vec![OrderItemInput {
            dish_name: dish,
            dish_category: "Mains".to_string(),
            quantity: 1,
            base_price: price,
            variant: None,
            addons: vec![],
        }],
        cooking_request: None,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_placements_never_lose_items() {
    const TASKS: usize = 32;
    const PRICE: f64 = 10.0;

    let storage = OrderStorage::open_in_memory().unwrap();
    let manager = OrdersManager::new(storage, Kolkata);

    let mut handles = Vec::with_capacity(TASKS);
    for i in 0..TASKS {
        let mgr = manager.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            mgr.place_order(placement(format!("Dish {i}"), PRICE)).unwrap()
        }));
    }

    let mut order_ids = Vec::new();
    for handle in handles {
        let (order, _) = handle.await.unwrap();
        order_ids.push(order.id);
    }

    // 全部落进同一个订单
    order_ids.dedup();
    assert_eq!(order_ids.len(), 1);

    let order = manager.get_order(&order_ids[0]).unwrap();
    assert_eq!(order.items.len(), TASKS);
    assert_eq!(order.total_price, PRICE * TASKS as f64);
    assert_eq!(order.version, TASKS as u64);

    // 条目 id 互不相同
    let mut ids: Vec<&str> = order.items.iter().map(|i| i.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), TASKS);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_distinct_customers_stay_separate() {
    const TASKS: usize = 16;

    let storage = OrderStorage::open_in_memory().unwrap();
    let manager = OrdersManager::new(storage, Kolkata);

    let mut handles = Vec::with_capacity(TASKS);
    for i in 0..TASKS {
        let mgr = manager.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let mut input = placement("Thali".to_string(), 150.0);
            input.customer_name = format!("Customer {i}");
            mgr.place_order(input).unwrap()
        }));
    }

    let mut order_ids = Vec::new();
    for handle in handles {
        let (order, merged) = handle.await.unwrap();
        assert!(!merged);
        order_ids.push(order.id);
    }

    order_ids.sort();
    order_ids.dedup();
    assert_eq!(order_ids.len(), TASKS);

    let orders = manager.list_orders("v-1").unwrap();
    assert_eq!(orders.len(), TASKS);
}
