use basketry_catalog::Product;
use basketry_order::OrderProduct;

use super::OrderProductFactory;

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultOrderProductFactory;

impl OrderProductFactory for DefaultOrderProductFactory {
    fn create(&self) -> OrderProduct {
        OrderProduct::empty()
    }

    fn copy_from(&self, product: &Product) -> OrderProduct {
        self.create().copy_from(product)
    }
}
