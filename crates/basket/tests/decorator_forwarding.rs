use std::collections::BTreeMap;
use std::sync::Arc;

use basketry_basket::services::SiteDirectory;
use basketry_basket::{
    BasketConfig, BasketContext, BasketController, BasketDecorator, BasketError, BasketServices, Bundle,
    FrontendController, InMemoryBasketStore, ProductSelection, StandardBasket,
};
use basketry_catalog::{AttributeCatalog, Price, Product, ProductCatalog, Service};
use basketry_core::{ProductId, ServiceId, SiteId};
use basketry_order::{Address, AddressType, BasketValues, ServiceType};

fn context() -> BasketContext {
    BasketContext::new("session-2", SiteId::new("1."), "EUR")
}

fn decorated() -> (BasketDecorator<Bundle>, Product) {
    basketry_observability::init_for_tests();
    let pen = Product::new(ProductId::new(), "PEN", "Pen")
        .with_site(SiteId::new("1."))
        .with_price("default", Price::new("EUR", 150).with_site(SiteId::new("1.")));
    let config = BasketConfig::default();
    let services = BasketServices::standard(
        &config,
        &context(),
        AttributeCatalog::new(),
        ProductCatalog::from_iter([pen.clone()]),
        SiteDirectory::new(),
    );
    let standard = StandardBasket::open(
        context(),
        config.clone(),
        services.clone(),
        Arc::new(InMemoryBasketStore::new()),
    )
    .unwrap();
    let bundle = Bundle::new(services, &config);
    (BasketDecorator::try_new(Box::new(standard), bundle).unwrap(), pen)
}

#[test]
fn plain_products_and_basket_parts_reach_the_standard_controller() {
    let (mut controller, pen) = decorated();
    let delivery = Service::new(ServiceId::new(), "delivery", "dhl", "DHL").with_price(Price::new("EUR", 490));
    let address = Address {
        last_name: "Lovelace".to_string(),
        country_id: "GB".to_string(),
        ..Address::default()
    };

    controller
        .add_product(&pen, ProductSelection::new(3.0))
        .unwrap()
        .add_coupon("WELCOME")
        .unwrap()
        .set_address(AddressType::Payment, Some(address.clone()))
        .unwrap()
        .add_service(&delivery, BTreeMap::new())
        .unwrap()
        .add(BasketValues {
            comment: Some("leave at the door".to_string()),
            ..BasketValues::default()
        })
        .unwrap();

    let basket = controller.get();
    assert_eq!(basket.products().len(), 1);
    assert_eq!(basket.products()[0].quantity, 3.0);
    assert!(basket.products()[0].products.is_empty());
    assert_eq!(basket.coupons(), &["WELCOME".to_string()]);
    assert_eq!(basket.addresses(AddressType::Payment), &[address]);
    assert_eq!(basket.services(ServiceType::Delivery).len(), 1);
    assert_eq!(basket.comment(), "leave at the door");

    controller
        .update_product(0, 5.0)
        .unwrap()
        .delete_service(ServiceType::Delivery)
        .unwrap()
        .delete_coupon("WELCOME")
        .unwrap();
    assert_eq!(controller.get().products()[0].quantity, 5.0);
    assert!(controller.get().coupons().is_empty());

    controller.delete_product(0).unwrap().clear().unwrap();
    assert!(controller.get().is_empty());
}

#[test]
fn errors_from_the_standard_controller_propagate() {
    let (mut controller, _) = decorated();

    let err = controller.delete_product(4).unwrap_err();
    assert!(matches!(err, BasketError::NotFound(_)));

    controller.add_coupon("ONE").unwrap();
    let err = controller.add_coupon("TWO").unwrap_err();
    assert!(matches!(err, BasketError::Validation(_)));
}

#[test]
fn decorators_only_wrap_basket_controllers() {
    struct Checkout;

    impl FrontendController for Checkout {
        fn controller_name(&self) -> &'static str {
            "checkout"
        }

        fn into_basket(self: Box<Self>) -> Option<Box<dyn BasketController>> {
            None
        }
    }

    let config = BasketConfig::default();
    let services = BasketServices::standard(
        &config,
        &context(),
        AttributeCatalog::new(),
        ProductCatalog::new(),
        SiteDirectory::new(),
    );
    let err = BasketDecorator::try_new(Box::new(Checkout), Bundle::new(services, &config)).unwrap_err();
    assert_eq!(
        err,
        BasketError::ControllerMismatch {
            expected: "basket",
            found: "checkout".to_string(),
        }
    );
}
