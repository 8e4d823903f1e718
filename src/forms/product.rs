use super::{Choice, Cleaner, FieldErrors, FieldKind, FieldSpec, FormData, ModelForm};
use crate::model::{Product, ProductInput, WithRelated};

const NOMBRE: FieldSpec = FieldSpec {
    name: "nombre",
    label: "Nombre",
    kind: FieldKind::Text { max_length: 100 },
    required: true,
};
const DESCRIPCION: FieldSpec = FieldSpec {
    name: "descripcion",
    label: "Descripción",
    kind: FieldKind::TextArea,
    required: false,
};
const PRECIO: FieldSpec = FieldSpec {
    name: "precio",
    label: "Precio",
    kind: FieldKind::Money,
    required: true,
};

impl ModelForm for Product {
    const FIELDS: &'static [FieldSpec] = &[NOMBRE, DESCRIPCION, PRECIO];

    fn initial(item: &WithRelated<Self>) -> FormData {
        let p = &item.record;
        let mut data = FormData::default();
        data.push(NOMBRE.name, p.nombre.clone());
        data.push(DESCRIPCION.name, p.descripcion.clone());
        data.push(PRECIO.name, p.precio.to_string());
        data
    }

    fn clean(data: &FormData, choices: &[Choice]) -> Result<ProductInput, FieldErrors> {
        let mut c = Cleaner::new(data, choices);
        let nombre = c.text(&NOMBRE);
        let descripcion = c.text(&DESCRIPCION);
        let precio = c.money(&PRECIO);

        match (nombre, descripcion, precio) {
            (Some(nombre), Some(descripcion), Some(precio)) if c.is_valid() => Ok(ProductInput {
                nombre,
                descripcion,
                precio,
            }),
            _ => Err(c.into_errors()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Money;

    fn data(pairs: &[(&str, &str)]) -> FormData {
        let mut d = FormData::default();
        for (k, v) in pairs {
            d.push(k, *v);
        }
        d
    }

    #[test]
    fn valid_submission() {
        let input = Product::clean(
            &data(&[("nombre", "Tornillo"), ("descripcion", ""), ("precio", "1.5")]),
            &[],
        )
        .unwrap();
        assert_eq!(input.nombre, "Tornillo");
        assert_eq!(input.descripcion, "");
        assert_eq!(input.precio, Money::from_cents(150));
    }

    #[test]
    fn every_bad_field_is_reported() {
        let errors = Product::clean(&data(&[("precio", "x")]), &[]).unwrap_err();
        assert!(errors.contains_key("nombre"));
        assert!(errors.contains_key("precio"));
        assert!(!errors.contains_key("descripcion"));
    }

    #[test]
    fn initial_round_trips_through_clean() {
        let item = WithRelated::new(
            Product {
                id: 4,
                nombre: "Tuerca".into(),
                descripcion: "M6".into(),
                precio: Money::from_cents(30),
            },
            vec![],
        );
        let input = Product::clean(&Product::initial(&item), &[]).unwrap();
        assert_eq!(input.precio, Money::from_cents(30));
        assert_eq!(input.descripcion, "M6");
    }
}
