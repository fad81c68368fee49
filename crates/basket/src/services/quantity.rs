use tracing::warn;

use basketry_catalog::Product;

use super::QuantityChecker;
use crate::error::{BasketError, BasketResult};

/// Rejects non-positive or oversized quantities and rounds up to the product's
/// quantity step.
#[derive(Debug, Clone, Copy)]
pub struct StandardQuantityChecker {
    max_quantity: f64,
}

/// Remainders below this are float noise, not a partial step.
const STEP_TOLERANCE: f64 = 0.0005;

impl StandardQuantityChecker {
    pub fn new(max_quantity: f64) -> Self {
        Self { max_quantity }
    }
}

impl QuantityChecker for StandardQuantityChecker {
    fn check_quantity(&self, product: &Product, quantity: f64) -> BasketResult<f64> {
        if !quantity.is_finite() || quantity <= 0.0 {
            warn!(product = %product.code(), quantity, "rejected non-positive quantity");
            return Err(BasketError::InvalidQuantity(format!(
                "quantity for product {} must be positive, got {quantity}",
                product.code()
            )));
        }

        let scale = if product.scale() > 0.0 { product.scale() } else { 1.0 };
        let remainder = quantity % scale;
        let quantity = if remainder >= STEP_TOLERANCE && scale - remainder >= STEP_TOLERANCE {
            (quantity / scale).ceil() * scale
        } else {
            quantity
        };

        // Checked after rounding: stepping up may cross the limit.
        if quantity > self.max_quantity {
            warn!(product = %product.code(), quantity, "rejected oversized quantity");
            return Err(BasketError::InvalidQuantity(format!(
                "quantity for product {} exceeds the maximum of {}",
                product.code(),
                self.max_quantity
            )));
        }
        Ok(quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basketry_core::ProductId;

    fn product(scale: f64) -> Product {
        Product::new(ProductId::new(), "P", "Product").with_scale(scale)
    }

    fn checker() -> StandardQuantityChecker {
        StandardQuantityChecker::new(1000.0)
    }

    #[test]
    fn zero_and_negative_are_rejected() {
        for quantity in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = checker().check_quantity(&product(1.0), quantity).unwrap_err();
            assert!(matches!(err, BasketError::InvalidQuantity(_)), "{quantity}");
        }
    }

    #[test]
    fn quantities_above_maximum_are_rejected() {
        assert!(checker().check_quantity(&product(1.0), 1000.5).is_err());
        assert_eq!(checker().check_quantity(&product(1.0), 1000.0).unwrap(), 1000.0);
    }

    #[test]
    fn rounding_up_past_the_maximum_is_rejected() {
        let checker = StandardQuantityChecker::new(10.0);
        let err = checker.check_quantity(&product(4.0), 9.0).unwrap_err();
        assert!(matches!(err, BasketError::InvalidQuantity(_)));
        assert_eq!(checker.check_quantity(&product(4.0), 7.0).unwrap(), 8.0);
    }

    #[test]
    fn rounds_up_to_quantity_step() {
        assert_eq!(checker().check_quantity(&product(1.0), 1.2).unwrap(), 2.0);
        assert_eq!(checker().check_quantity(&product(0.5), 1.2).unwrap(), 1.5);
        assert_eq!(checker().check_quantity(&product(0.5), 1.5).unwrap(), 1.5);
    }

    #[test]
    fn float_noise_is_not_rounded() {
        let quantity = 0.1 + 0.2;
        let checked = checker().check_quantity(&product(0.1), quantity).unwrap();
        assert!((checked - 0.3).abs() < 1e-9);
    }

    #[test]
    fn zero_scale_behaves_like_unit_steps() {
        assert_eq!(checker().check_quantity(&product(0.0), 2.4).unwrap(), 3.0);
    }
}
