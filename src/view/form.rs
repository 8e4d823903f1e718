use maud::{Markup, html};

use super::layout::page;
use crate::controller::routes::Urls;
use crate::forms::{BoundField, BoundForm, FieldKind};
use crate::model::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update(i64),
}

/// The create/update form of any entity, with field errors when bound to an
/// invalid submission.
pub fn render_form_page<E: Entity>(mode: FormMode, form: &BoundForm, urls: &Urls) -> Markup {
    let (title, action) = match mode {
        FormMode::Create => (format!("Nuevo {}", E::VERBOSE_NAME), urls.create::<E>()),
        FormMode::Update(pk) => (format!("Editar {}", E::VERBOSE_NAME), urls.update::<E>(pk)),
    };

    page(
        &title,
        urls,
        html! {
            @if form.has_errors() {
                p class="errornote" { "Por favor corrija los errores a continuación." }
            }
            form method="post" action=(action) {
                @for field in &form.fields {
                    (render_field(field))
                }
                button type="submit" { "Guardar" }
                " "
                a href=(urls.list::<E>()) { "Cancelar" }
            }
        },
    )
}

fn render_field(field: &BoundField) -> Markup {
    let spec = field.spec;
    let id = format!("id_{}", spec.name);
    html! {
        div class="field" {
            label for=(id) { (spec.label) }
            (render_widget(field, &id))
            @if !field.errors.is_empty() {
                ul class="errorlist" {
                    @for error in &field.errors {
                        li { (error) }
                    }
                }
            }
        }
    }
}

fn render_widget(field: &BoundField, id: &str) -> Markup {
    let spec = field.spec;
    match spec.kind {
        FieldKind::Text { max_length } => html! {
            input type="text" id=(id) name=(spec.name) value=(field.value())
                maxlength=(max_length) required[spec.required];
        },
        FieldKind::TextArea => html! {
            textarea id=(id) name=(spec.name) rows="4" required[spec.required] {
                (field.value())
            }
        },
        FieldKind::Money => html! {
            input type="number" id=(id) name=(spec.name) value=(field.value())
                step="0.01" min="0" required[spec.required];
        },
        FieldKind::Date => html! {
            input type="date" id=(id) name=(spec.name) value=(field.value())
                required[spec.required];
        },
        FieldKind::MultipleChoice => html! {
            select id=(id) name=(spec.name) multiple {
                @for choice in &field.choices {
                    option value=(choice.value) selected[field.is_selected(choice)] {
                        (choice.label)
                    }
                }
            }
        },
    }
}
