use super::entity::{Entity, RouteNames};
use super::money::Money;
use super::shipment::Shipment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub nombre: String,
    pub descripcion: String,
    pub precio: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub nombre: String,
    pub descripcion: String,
    pub precio: Money,
}

impl Entity for Product {
    type Input = ProductInput;
    type Related = Shipment;

    const VERBOSE_NAME: &'static str = "producto";
    const VERBOSE_NAME_PLURAL: &'static str = "productos";
    const ROUTES: RouteNames = RouteNames {
        list: "lista_productos",
        detail: "producto_detalle",
        create: "producto_crear",
        update: "producto_editar",
        delete: "producto_eliminar",
    };

    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> String {
        self.nombre.clone()
    }
}
