use maud::{DOCTYPE, Markup, html};

use crate::STYLES_PATH;
use crate::controller::routes::Urls;
use crate::model::{Entity, Product, Shipment};

/// Full page with navigation to both lists.
pub fn page(title: &str, urls: &Urls, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            (head(title))
            body {
                nav {
                    a href=(urls.list::<Product>()) { "Productos" }
                    " | "
                    a href=(urls.list::<Shipment>()) { "Embarques" }
                }
                main {
                    h1 { (title) }
                    (content)
                }
            }
        }
    }
}

/// Page without navigation, for error responses rendered outside a request's app data.
pub fn bare_page(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            (head(title))
            body {
                main {
                    h1 { (title) }
                    (content)
                }
            }
        }
    }
}

fn head(title: &str) -> Markup {
    html! {
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1";
            title { (title) }
            link rel="stylesheet" href=(STYLES_PATH);
        }
    }
}

/// Edit / delete links shown next to a record.
pub fn record_actions<E: Entity>(id: i64, urls: &Urls) -> Markup {
    html! {
        span class="actions" {
            a href=(urls.update::<E>(id)) { "Editar" }
            " "
            a href=(urls.delete::<E>(id)) { "Eliminar" }
        }
    }
}
