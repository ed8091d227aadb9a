//! Checkout against a recording gateway.

#![allow(clippy::unwrap_used)]

use std::cell::{Cell, RefCell};

use glowvita_core::catalog::{Offer, Product};
use glowvita_core::{CartItemId, OfferId, OrderId, OrderStatus, ProductId};
use glowvita_integration_tests::{approx_eq, store_on};
use glowvita_storefront::cart::{CART_STORAGE_KEY, CartContext, NewCartItem};
use glowvita_storefront::checkout::{CheckoutError, ShippingDetails, place_order};
use glowvita_storefront::orders::{NewOrder, OrderGateway, OrderGatewayError, OrderReceipt};
use glowvita_storefront::storage::MemoryStorage;

/// Gateway that fails the first `failures` calls, then accepts.
struct RecordingGateway {
    failures: Cell<u32>,
    orders: RefCell<Vec<NewOrder>>,
}

impl RecordingGateway {
    fn new(failures: u32) -> Self {
        Self {
            failures: Cell::new(failures),
            orders: RefCell::new(Vec::new()),
        }
    }
}

impl OrderGateway for RecordingGateway {
    async fn create_order(&self, order: &NewOrder) -> Result<OrderReceipt, OrderGatewayError> {
        self.orders.borrow_mut().push(order.clone());
        if self.failures.get() > 0 {
            self.failures.set(self.failures.get() - 1);
            return Err(OrderGatewayError::RateLimited(2));
        }
        let id = i64::try_from(self.orders.borrow().len()).unwrap();
        Ok(OrderReceipt {
            id: OrderId::new(id),
            status: OrderStatus::Pending,
            created_at: None,
        })
    }
}

fn shipping() -> ShippingDetails {
    ShippingDetails {
        full_name: "Nour Hassan".to_string(),
        email: "nour@example.com".to_string(),
        phone: "01234567890".to_string(),
        address: "5 Tahrir Sq".to_string(),
        city: "Giza".to_string(),
        postal_code: "12611".to_string(),
        notes: Some("Leave at the door".to_string()),
    }
}

fn catalog_product() -> Product {
    Product {
        id: ProductId::new(21),
        name: "Biotin Gummies".to_string(),
        description: None,
        price: 300.0,
        discount: Some(20.0),
        image_url: Some("/biotin.png".to_string()),
        brand_id: None,
        category_id: None,
        sub_category_id: None,
        stock: Some(12),
        created_at: None,
    }
}

fn catalog_offer() -> Offer {
    Offer {
        id: OfferId::new(21),
        title: "Hair Care Bundle".to_string(),
        description: None,
        price: 500.0,
        discount: Some(50.0),
        image_url: None,
        active: true,
    }
}

#[tokio::test]
async fn test_checkout_submits_cart_and_clears_persisted_blob() {
    let storage = MemoryStorage::new();
    let cart = CartContext::provide(store_on(&storage));

    cart.add_to_cart(NewCartItem::from_product(&catalog_product()));
    cart.add_to_cart(NewCartItem::from_product(&catalog_product()));
    cart.add_to_cart(NewCartItem::from_offer(&catalog_offer()));
    assert!(approx_eq(cart.cart_total(), 240.0 * 2.0 + 250.0));

    let gateway = RecordingGateway::new(0);
    let receipt = place_order(&cart, &gateway, &shipping()).await.unwrap();
    assert_eq!(receipt.id, OrderId::new(1));

    let orders = gateway.orders.borrow();
    let order = &orders[0];
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].id, CartItemId::product(21));
    assert_eq!(order.items[1].id, CartItemId::offer(21));
    assert!(approx_eq(order.total, 730.0));
    assert_eq!(order.notes.as_deref(), Some("Leave at the door"));

    assert!(cart.is_empty());
    assert!(!storage.contains(CART_STORAGE_KEY));
}

#[tokio::test]
async fn test_failed_checkout_can_be_retried() {
    let storage = MemoryStorage::new();
    let cart = CartContext::provide(store_on(&storage));
    cart.add_to_cart(NewCartItem::from_offer(&catalog_offer()));

    let gateway = RecordingGateway::new(1);

    let err = place_order(&cart, &gateway, &shipping()).await.unwrap_err();
    assert!(matches!(
        err,
        CheckoutError::Gateway(OrderGatewayError::RateLimited(2))
    ));
    assert_eq!(cart.item_count(), 1);
    assert!(storage.contains(CART_STORAGE_KEY));

    let receipt = place_order(&cart, &gateway, &shipping()).await.unwrap();
    assert_eq!(receipt.id, OrderId::new(2));
    assert!(cart.is_empty());
    assert_eq!(gateway.orders.borrow().len(), 2);
}

#[tokio::test]
async fn test_observers_see_checkout_clear() {
    let cart = CartContext::provide(store_on(&MemoryStorage::new()));
    cart.add_to_cart(NewCartItem::from_product(&catalog_product()));

    let badge = std::rc::Rc::new(Cell::new(u32::MAX));
    let sink = std::rc::Rc::clone(&badge);
    cart.subscribe(move |lines| sink.set(lines.iter().map(|line| line.quantity).sum()));

    place_order(&cart, &RecordingGateway::new(0), &shipping())
        .await
        .unwrap();

    assert_eq!(badge.get(), 0);
}
