pub mod args;
pub mod controller;
pub mod error;
pub mod forms;
pub mod model;
pub mod storage;
pub mod view;

use actix_web::web::{self, Data};
use actix_web::HttpResponse;

use controller::crud::{ViewConfig, unmatched};
use controller::routes::{self, Urls};
use error::AppError;
use model::{Product, Shipment};
use storage::SqlStorage;

const STYLES_PATH: &str = "/static/styles.css";

/// Largest accepted form body. The shipment form can pick every product.
pub const FORM_LIMIT: usize = 1 << 20;

/// Everything the product and shipment pages need, mounted under `prefix`.
///
/// `prefix` is either empty or starts with `/` and has no trailing `/`.
/// `/health` stays at the root. Register `/static` before this, an empty
/// prefix claims every other path.
pub fn app_config(
    storage: SqlStorage,
    prefix: String,
) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg: &mut web::ServiceConfig| {
        let urls = Urls::new(prefix.clone());
        cfg.app_data(Data::new(storage.clone()))
            .app_data(Data::new(ViewConfig::<Product>::from_urls(&urls)))
            .app_data(Data::new(ViewConfig::<Shipment>::from_urls(&urls)))
            .app_data(Data::new(urls))
            .app_data(web::FormConfig::default().limit(FORM_LIMIT))
            // a pk that overflows i64 is a missing record, not a bad request
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                AppError::NotFound(err.to_string()).into()
            }))
            .route("/health", web::get().to(HttpResponse::Ok))
            .service(
                web::scope(&prefix)
                    .configure(routes::configure)
                    .default_service(web::to(unmatched)),
            );
    }
}
