use maud::{Markup, html};

use super::layout::bare_page;

pub fn render_not_found() -> Markup {
    bare_page(
        "No encontrado",
        html! {
            p { "El registro solicitado no existe." }
        },
    )
}

pub fn render_server_error() -> Markup {
    bare_page(
        "Error del servidor",
        html! {
            p { "Ocurrió un error al procesar la solicitud." }
        },
    )
}
