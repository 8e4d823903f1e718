use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::AppError;
use crate::forms::{Choice, FieldErrors, FormData, ModelForm};
use crate::model::{Product, Shipment};
use crate::storage::SqlStorage;

#[derive(Deserialize, Debug)]
struct SeedFile {
    #[serde(default)]
    productos: Vec<SeedProduct>,
    #[serde(default)]
    embarques: Vec<SeedShipment>,
}

#[derive(Deserialize, Debug)]
struct SeedProduct {
    nombre: String,
    #[serde(default)]
    descripcion: String,
    #[serde(default)]
    precio: Value,
}

#[derive(Deserialize, Debug)]
struct SeedShipment {
    codigo: String,
    #[serde(default)]
    destino: String,
    #[serde(default)]
    fecha_envio: String,
    /// Product names, resolved against the products seeded above.
    #[serde(default)]
    productos: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedOutcome {
    pub productos: usize,
    pub embarques: usize,
}

/// Numbers and strings are both accepted where the form expects text.
fn as_form_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn describe(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{field}: {}", messages.join(" ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Seeds an empty database from the json given with `--db-populate-json`.
/// format we have is this:
/// { "productos": [{"nombre": "..", "descripcion": "..", "precio": "12.50"}, ...]
/// , "embarques": [{"codigo": "..", "destino": "..", "fecha_envio": "2024-05-01", "productos": ["<nombre>", ...]}, ...]
/// }
///
/// Every entry goes through the same validation as the web forms before
/// anything is written, and all rows go in with one transaction. Nothing is
/// seeded when either table already has rows.
///
/// # Errors
///
/// Will return `Err` naming the first entry that does not validate or repeats
/// a product name, or if the database fails; the database is left untouched
pub async fn db_prefill(json: &Value, storage: &SqlStorage) -> Result<SeedOutcome, AppError> {
    let seed: SeedFile = serde_json::from_value(json.clone())?;

    let existing_products = storage.count_rows("producto").await?;
    let existing_shipments = storage.count_rows("embarque").await?;
    if existing_products > 0 || existing_shipments > 0 {
        tracing::info!(
            existing_products,
            existing_shipments,
            "database already has data, skipping seed"
        );
        return Ok(SeedOutcome::default());
    }

    let mut products = Vec::with_capacity(seed.productos.len());
    let mut positions: HashMap<&str, i64> = HashMap::new();
    for (i, product) in seed.productos.iter().enumerate() {
        let mut data = FormData::default();
        data.push("nombre", product.nombre.clone());
        data.push("descripcion", product.descripcion.clone());
        data.push("precio", as_form_text(&product.precio));
        let input = Product::clean(&data, &[]).map_err(|errors| {
            AppError::Seed(format!(
                "productos[{i}] ({}): {}",
                product.nombre,
                describe(&errors)
            ))
        })?;
        // shipments refer to products by name, so names must be unique
        let position = i64::try_from(i + 1)
            .map_err(|_| AppError::Seed("too many productos".to_string()))?;
        if positions.insert(product.nombre.trim(), position).is_some() {
            return Err(AppError::Seed(format!(
                "productos[{i}] ({}): duplicate nombre",
                product.nombre
            )));
        }
        products.push(input);
    }

    // positions stand in for ids until the rows exist
    let choices: Vec<Choice> = seed
        .productos
        .iter()
        .zip(1..)
        .map(|(p, position)| Choice::new(position, p.nombre.trim().to_string()))
        .collect();

    let mut shipments = Vec::with_capacity(seed.embarques.len());
    for (i, shipment) in seed.embarques.iter().enumerate() {
        let mut data = FormData::default();
        data.push("codigo", shipment.codigo.clone());
        data.push("destino", shipment.destino.clone());
        data.push("fecha_envio", shipment.fecha_envio.clone());
        for name in &shipment.productos {
            let position = positions.get(name.trim()).ok_or_else(|| {
                AppError::Seed(format!(
                    "embarques[{i}] ({}): unknown producto '{name}'",
                    shipment.codigo
                ))
            })?;
            data.push("productos", position.to_string());
        }
        let input = Shipment::clean(&data, &choices).map_err(|errors| {
            AppError::Seed(format!(
                "embarques[{i}] ({}): {}",
                shipment.codigo,
                describe(&errors)
            ))
        })?;
        shipments.push(input);
    }

    let (productos, embarques) = storage.seed(products, shipments).await?;
    let outcome = SeedOutcome {
        productos,
        embarques,
    };

    tracing::info!(
        productos = outcome.productos,
        embarques = outcome.embarques,
        "database seeded"
    );
    Ok(outcome)
}
