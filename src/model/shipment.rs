use chrono::NaiveDate;

use super::entity::{Entity, RouteNames};
use super::product::Product;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shipment {
    pub id: i64,
    pub codigo: String,
    pub destino: String,
    pub fecha_envio: NaiveDate,
}

/// Shipment form input. `productos` replaces the whole association set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentInput {
    pub codigo: String,
    pub destino: String,
    pub fecha_envio: NaiveDate,
    pub productos: Vec<i64>,
}

impl Entity for Shipment {
    type Input = ShipmentInput;
    type Related = Product;

    const VERBOSE_NAME: &'static str = "embarque";
    const VERBOSE_NAME_PLURAL: &'static str = "embarques";
    const ROUTES: RouteNames = RouteNames {
        list: "embarque_lista",
        detail: "embarque_detalle",
        create: "embarque_crear",
        update: "embarque_editar",
        delete: "embarque_eliminar",
    };

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        format!("{} ({})", self.codigo, self.destino)
    }
}
