use maud::{Markup, html};

use super::Templates;
use super::layout::{page, record_actions};
use crate::controller::routes::Urls;
use crate::model::{Product, Shipment, WithRelated};

impl Templates for Product {
    fn list_page(items: &[WithRelated<Self>], urls: &Urls) -> Markup {
        page(
            "Productos",
            urls,
            html! {
                p { a href=(urls.create::<Product>()) { "Nuevo producto" } }
                @if items.is_empty() {
                    p class="empty" { "No hay productos registrados." }
                } @else {
                    table id="productos" {
                        thead {
                            tr {
                                th { "Nombre" }
                                th { "Precio" }
                                th { "Embarques" }
                                th {}
                            }
                        }
                        tbody {
                            @for item in items {
                                tr data-id=(item.record.id) {
                                    td class="nombre" {
                                        a href=(urls.detail::<Product>(item.record.id)) {
                                            (item.record.nombre)
                                        }
                                    }
                                    td class="precio" { (item.record.precio) }
                                    td class="related" {
                                        @for (i, shipment) in item.related.iter().enumerate() {
                                            @if i > 0 { ", " }
                                            a href=(urls.detail::<Shipment>(shipment.id)) {
                                                (shipment.codigo)
                                            }
                                        }
                                    }
                                    td { (record_actions::<Product>(item.record.id, urls)) }
                                }
                            }
                        }
                    }
                }
            },
        )
    }

    fn detail_page(item: &WithRelated<Self>, urls: &Urls) -> Markup {
        let p = &item.record;
        page(
            &p.nombre,
            urls,
            html! {
                dl {
                    dt { "Descripción" }
                    dd class="descripcion" { (p.descripcion) }
                    dt { "Precio" }
                    dd class="precio" { (p.precio) }
                }
                h2 { "Embarques" }
                @if item.related.is_empty() {
                    p class="empty" { "Este producto no está en ningún embarque." }
                } @else {
                    ul class="related" {
                        @for shipment in &item.related {
                            li data-id=(shipment.id) {
                                a href=(urls.detail::<Shipment>(shipment.id)) {
                                    (shipment.codigo) " - " (shipment.destino)
                                }
                            }
                        }
                    }
                }
                p { (record_actions::<Product>(p.id, urls)) }
            },
        )
    }

    fn confirm_delete_page(item: &WithRelated<Self>, urls: &Urls) -> Markup {
        let p = &item.record;
        page(
            "Eliminar producto",
            urls,
            html! {
                p { "¿Está seguro de que desea eliminar el producto \"" (p.nombre) "\"?" }
                @if !item.related.is_empty() {
                    p { "Se quitará de " (item.related.len()) " embarque(s)." }
                }
                form method="post" action=(urls.delete::<Product>(p.id)) {
                    button type="submit" { "Sí, eliminar" }
                    " "
                    a href=(urls.list::<Product>()) { "Cancelar" }
                }
            },
        )
    }
}
