use maud::{Markup, html};

use super::Templates;
use super::layout::{page, record_actions};
use crate::controller::routes::Urls;
use crate::model::{Product, Shipment, WithRelated};

impl Templates for Shipment {
    fn list_page(items: &[WithRelated<Self>], urls: &Urls) -> Markup {
        page(
            "Embarques",
            urls,
            html! {
                p { a href=(urls.create::<Shipment>()) { "Nuevo embarque" } }
                @if items.is_empty() {
                    p class="empty" { "No hay embarques registrados." }
                } @else {
                    table id="embarques" {
                        thead {
                            tr {
                                th { "Código" }
                                th { "Destino" }
                                th { "Fecha de envío" }
                                th { "Productos" }
                                th {}
                            }
                        }
                        tbody {
                            @for item in items {
                                tr data-id=(item.record.id) {
                                    td class="codigo" {
                                        a href=(urls.detail::<Shipment>(item.record.id)) {
                                            (item.record.codigo)
                                        }
                                    }
                                    td class="destino" { (item.record.destino) }
                                    td class="fecha" { (item.record.fecha_envio.format("%Y-%m-%d")) }
                                    td class="related" {
                                        @for (i, product) in item.related.iter().enumerate() {
                                            @if i > 0 { ", " }
                                            a href=(urls.detail::<Product>(product.id)) {
                                                (product.nombre)
                                            }
                                        }
                                    }
                                    td { (record_actions::<Shipment>(item.record.id, urls)) }
                                }
                            }
                        }
                    }
                }
            },
        )
    }

    fn detail_page(item: &WithRelated<Self>, urls: &Urls) -> Markup {
        let s = &item.record;
        page(
            &format!("Embarque {}", s.codigo),
            urls,
            html! {
                dl {
                    dt { "Destino" }
                    dd class="destino" { (s.destino) }
                    dt { "Fecha de envío" }
                    dd class="fecha" { (s.fecha_envio.format("%Y-%m-%d")) }
                }
                h2 { "Productos" }
                @if item.related.is_empty() {
                    p class="empty" { "Este embarque no tiene productos." }
                } @else {
                    ul class="related" {
                        @for product in &item.related {
                            li data-id=(product.id) {
                                a href=(urls.detail::<Product>(product.id)) { (product.nombre) }
                                " (" (product.precio) ")"
                            }
                        }
                    }
                }
                p { (record_actions::<Shipment>(s.id, urls)) }
            },
        )
    }

    fn confirm_delete_page(item: &WithRelated<Self>, urls: &Urls) -> Markup {
        let s = &item.record;
        page(
            "Eliminar embarque",
            urls,
            html! {
                p { "¿Está seguro de que desea eliminar el embarque \"" (s.codigo) "\"?" }
                @if !item.related.is_empty() {
                    p { "Contiene " (item.related.len()) " producto(s); los productos no se eliminarán." }
                }
                form method="post" action=(urls.delete::<Shipment>(s.id)) {
                    button type="submit" { "Sí, eliminar" }
                    " "
                    a href=(urls.list::<Shipment>()) { "Cancelar" }
                }
            },
        )
    }
}
