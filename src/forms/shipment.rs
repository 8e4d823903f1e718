use super::{Choice, Cleaner, FieldErrors, FieldKind, FieldSpec, FormData, ModelForm};
use crate::model::{Shipment, ShipmentInput, WithRelated};

const CODIGO: FieldSpec = FieldSpec {
    name: "codigo",
    label: "Código",
    kind: FieldKind::Text { max_length: 50 },
    required: true,
};
const DESTINO: FieldSpec = FieldSpec {
    name: "destino",
    label: "Destino",
    kind: FieldKind::Text { max_length: 200 },
    required: true,
};
const FECHA_ENVIO: FieldSpec = FieldSpec {
    name: "fecha_envio",
    label: "Fecha de envío",
    kind: FieldKind::Date,
    required: true,
};
const PRODUCTOS: FieldSpec = FieldSpec {
    name: "productos",
    label: "Productos",
    kind: FieldKind::MultipleChoice,
    required: false,
};

impl ModelForm for Shipment {
    const FIELDS: &'static [FieldSpec] = &[CODIGO, DESTINO, FECHA_ENVIO, PRODUCTOS];

    fn initial(item: &WithRelated<Self>) -> FormData {
        let s = &item.record;
        let mut data = FormData::default();
        data.push(CODIGO.name, s.codigo.clone());
        data.push(DESTINO.name, s.destino.clone());
        data.push(FECHA_ENVIO.name, s.fecha_envio.format("%Y-%m-%d").to_string());
        for product in &item.related {
            data.push(PRODUCTOS.name, product.id.to_string());
        }
        data
    }

    fn clean(data: &FormData, choices: &[Choice]) -> Result<ShipmentInput, FieldErrors> {
        let mut c = Cleaner::new(data, choices);
        let codigo = c.text(&CODIGO);
        let destino = c.text(&DESTINO);
        let fecha_envio = c.date(&FECHA_ENVIO);
        let productos = c.choices(&PRODUCTOS);

        match (codigo, destino, fecha_envio, productos) {
            (Some(codigo), Some(destino), Some(fecha_envio), Some(productos)) if c.is_valid() => {
                Ok(ShipmentInput {
                    codigo,
                    destino,
                    fecha_envio,
                    productos,
                })
            }
            _ => Err(c.into_errors()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn data(pairs: &[(&str, &str)]) -> FormData {
        let mut d = FormData::default();
        for (k, v) in pairs {
            d.push(k, *v);
        }
        d
    }

    #[test]
    fn valid_submission_with_products() {
        let choices = vec![Choice::new(3, "A".into()), Choice::new(5, "B".into())];
        let input = Shipment::clean(
            &data(&[
                ("codigo", "EMB-1"),
                ("destino", "Monterrey"),
                ("fecha_envio", "2024-05-01"),
                ("productos", "5"),
                ("productos", "3"),
            ]),
            &choices,
        )
        .unwrap();
        assert_eq!(input.fecha_envio, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(input.productos, vec![5, 3]);
    }

    #[test]
    fn bad_date_and_unknown_product() {
        let errors = Shipment::clean(
            &data(&[
                ("codigo", "EMB-1"),
                ("destino", "Monterrey"),
                ("fecha_envio", "2024-13-01"),
                ("productos", "8"),
            ]),
            &[Choice::new(3, "A".into())],
        )
        .unwrap_err();
        assert_eq!(errors.keys().copied().collect::<Vec<_>>(), vec!["fecha_envio", "productos"]);
    }
}
