//! Basket controller decorators.
//!
//! `BasketDecorator<D>` wraps any basket controller and forwards every
//! operation to it. The `Decoration` decides what happens on the way through:
//! its default methods forward unchanged, so a decoration only implements the
//! operations it wants to change. Errors from the wrapped controller are
//! returned as they are.

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use basketry_catalog::{Product, Service};
use basketry_core::OrderId;
use basketry_order::{Address, AddressType, Basket, BasketValues, Parts, ServiceType};

use crate::controller::{BasketController, Chain, FrontendController, ProductSelection};
use crate::error::{BasketError, BasketResult};

pub mod bundle;
pub mod factory;

/// Behaviour layered over a wrapped basket controller.
///
/// Each method receives the wrapped controller; the defaults pass the call
/// through untouched.
pub trait Decoration: Send + Sync + 'static {
    /// Name used in configuration and logs.
    fn name(&self) -> &'static str;

    fn add(&self, inner: &mut dyn BasketController, values: BasketValues) -> BasketResult<()> {
        inner.add(values)?;
        Ok(())
    }

    fn clear(&self, inner: &mut dyn BasketController) -> BasketResult<()> {
        inner.clear()?;
        Ok(())
    }

    fn save(&self, inner: &mut dyn BasketController) -> BasketResult<()> {
        inner.save()?;
        Ok(())
    }

    fn set_type(&self, inner: &mut dyn BasketController, basket_type: &str) -> BasketResult<()> {
        inner.set_type(basket_type)?;
        Ok(())
    }

    fn store(&self, inner: &mut dyn BasketController) -> BasketResult<Basket> {
        inner.store()
    }

    fn load(
        &self,
        inner: &dyn BasketController,
        id: OrderId,
        parts: Parts,
        default: bool,
    ) -> BasketResult<Basket> {
        inner.load(id, parts, default)
    }

    fn add_product(
        &self,
        inner: &mut dyn BasketController,
        product: &Product,
        selection: ProductSelection,
    ) -> BasketResult<()> {
        inner.add_product(product, selection)?;
        Ok(())
    }

    fn delete_product(&self, inner: &mut dyn BasketController, position: usize) -> BasketResult<()> {
        inner.delete_product(position)?;
        Ok(())
    }

    fn update_product(
        &self,
        inner: &mut dyn BasketController,
        position: usize,
        quantity: f64,
    ) -> BasketResult<()> {
        inner.update_product(position, quantity)?;
        Ok(())
    }

    fn add_coupon(&self, inner: &mut dyn BasketController, code: &str) -> BasketResult<()> {
        inner.add_coupon(code)?;
        Ok(())
    }

    fn delete_coupon(&self, inner: &mut dyn BasketController, code: &str) -> BasketResult<()> {
        inner.delete_coupon(code)?;
        Ok(())
    }

    fn set_address(
        &self,
        inner: &mut dyn BasketController,
        address_type: AddressType,
        address: Option<Address>,
    ) -> BasketResult<()> {
        inner.set_address(address_type, address)?;
        Ok(())
    }

    fn add_service(
        &self,
        inner: &mut dyn BasketController,
        service: &Service,
        attributes: BTreeMap<String, JsonValue>,
    ) -> BasketResult<()> {
        inner.add_service(service, attributes)?;
        Ok(())
    }

    fn delete_service(&self, inner: &mut dyn BasketController, service_type: ServiceType) -> BasketResult<()> {
        inner.delete_service(service_type)?;
        Ok(())
    }
}

/// Basket controller wrapping another one.
pub struct BasketDecorator<D> {
    controller: Box<dyn BasketController>,
    decoration: D,
}

impl<D: Decoration> BasketDecorator<D> {
    pub fn new(controller: Box<dyn BasketController>, decoration: D) -> Self {
        Self {
            controller,
            decoration,
        }
    }

    /// Wraps a controller handed over as a generic frontend controller.
    ///
    /// Fails with `ControllerMismatch` unless it is a basket controller.
    pub fn try_new(controller: Box<dyn FrontendController>, decoration: D) -> BasketResult<Self> {
        let found = controller.controller_name();
        let controller = controller
            .into_basket()
            .ok_or_else(|| BasketError::ControllerMismatch {
                expected: "basket",
                found: found.to_string(),
            })?;
        Ok(Self::new(controller, decoration))
    }

    /// The wrapped controller.
    pub fn controller(&self) -> &dyn BasketController {
        self.controller.as_ref()
    }

    pub fn decoration(&self) -> &D {
        &self.decoration
    }
}

impl<D> core::fmt::Debug for BasketDecorator<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BasketDecorator")
            .field("decoration", &core::any::type_name::<D>())
            .finish_non_exhaustive()
    }
}

impl<D: Decoration> FrontendController for BasketDecorator<D> {
    fn controller_name(&self) -> &'static str {
        self.controller.controller_name()
    }

    fn into_basket(self: Box<Self>) -> Option<Box<dyn BasketController>> {
        Some(self)
    }
}

impl<D: Decoration> BasketController for BasketDecorator<D> {
    fn add(&mut self, values: BasketValues) -> Chain<'_> {
        self.decoration.add(self.controller.as_mut(), values)?;
        Ok(self)
    }

    fn clear(&mut self) -> Chain<'_> {
        self.decoration.clear(self.controller.as_mut())?;
        Ok(self)
    }

    fn get(&self) -> &Basket {
        self.controller.get()
    }

    fn get_mut(&mut self) -> &mut Basket {
        self.controller.get_mut()
    }

    fn save(&mut self) -> Chain<'_> {
        self.decoration.save(self.controller.as_mut())?;
        Ok(self)
    }

    fn set_type(&mut self, basket_type: &str) -> Chain<'_> {
        self.decoration.set_type(self.controller.as_mut(), basket_type)?;
        Ok(self)
    }

    fn store(&mut self) -> BasketResult<Basket> {
        self.decoration.store(self.controller.as_mut())
    }

    fn load(&self, id: OrderId, parts: Parts, default: bool) -> BasketResult<Basket> {
        self.decoration.load(self.controller.as_ref(), id, parts, default)
    }

    fn add_product(&mut self, product: &Product, selection: ProductSelection) -> Chain<'_> {
        self.decoration
            .add_product(self.controller.as_mut(), product, selection)?;
        Ok(self)
    }

    fn delete_product(&mut self, position: usize) -> Chain<'_> {
        self.decoration.delete_product(self.controller.as_mut(), position)?;
        Ok(self)
    }

    fn update_product(&mut self, position: usize, quantity: f64) -> Chain<'_> {
        self.decoration
            .update_product(self.controller.as_mut(), position, quantity)?;
        Ok(self)
    }

    fn add_coupon(&mut self, code: &str) -> Chain<'_> {
        self.decoration.add_coupon(self.controller.as_mut(), code)?;
        Ok(self)
    }

    fn delete_coupon(&mut self, code: &str) -> Chain<'_> {
        self.decoration.delete_coupon(self.controller.as_mut(), code)?;
        Ok(self)
    }

    fn set_address(&mut self, address_type: AddressType, address: Option<Address>) -> Chain<'_> {
        self.decoration
            .set_address(self.controller.as_mut(), address_type, address)?;
        Ok(self)
    }

    fn add_service(&mut self, service: &Service, attributes: BTreeMap<String, JsonValue>) -> Chain<'_> {
        self.decoration
            .add_service(self.controller.as_mut(), service, attributes)?;
        Ok(self)
    }

    fn delete_service(&mut self, service_type: ServiceType) -> Chain<'_> {
        self.decoration.delete_service(self.controller.as_mut(), service_type)?;
        Ok(self)
    }
}
