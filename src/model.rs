pub mod entity;
pub mod money;
pub mod product;
pub mod shipment;

pub use entity::{Entity, RouteNames, WithRelated};
pub use money::Money;
pub use product::{Product, ProductInput};
pub use shipment::{Shipment, ShipmentInput};

pub const TABLES_AND_DDL: &[(&str, &str)] = &[
    (
        "producto",
        include_str!("sql/schema/sqlite/00_producto.sql"),
    ),
    (
        "embarque",
        include_str!("sql/schema/sqlite/01_embarque.sql"),
    ),
    (
        "embarque_productos",
        include_str!("sql/schema/sqlite/02_embarque_productos.sql"),
    ),
];
