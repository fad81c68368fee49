//! Builds the configured controller stack.

use std::sync::Arc;

use tracing::debug;

use crate::config::BasketConfig;
use crate::context::BasketContext;
use crate::controller::BasketController;
use crate::decorator::BasketDecorator;
use crate::decorator::bundle::Bundle;
use crate::error::{BasketError, BasketResult};
use crate::services::BasketServices;
use crate::standard::StandardBasket;
use crate::store::BasketStore;

/// Wraps `controller` in the named decorators, innermost first.
pub fn decorate(
    controller: Box<dyn BasketController>,
    names: &[String],
    services: &BasketServices,
    config: &BasketConfig,
) -> BasketResult<Box<dyn BasketController>> {
    names.iter().try_fold(controller, |controller, name| {
        let decorated: Box<dyn BasketController> = match name.as_str() {
            "bundle" => Box::new(BasketDecorator::new(controller, Bundle::new(services.clone(), config))),
            other => return Err(BasketError::Config(format!("unknown basket decorator \"{other}\""))),
        };
        debug!(decorator = %name, "basket decorator applied");
        Ok(decorated)
    })
}

/// Opens the session basket and wraps it in `config.decorators`.
pub fn build_controller(
    config: &BasketConfig,
    context: BasketContext,
    services: BasketServices,
    store: Arc<dyn BasketStore>,
) -> BasketResult<Box<dyn BasketController>> {
    config.validate()?;
    let standard = StandardBasket::open(context, config.clone(), services.clone(), store)?;
    decorate(Box::new(standard), &config.decorators, &services, config)
}
