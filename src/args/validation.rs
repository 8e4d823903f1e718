use serde_json::Value;
use std::{fs, path::PathBuf};

/// # Errors
///
/// Will return `Err` if any of the `;`-separated files is not readable
pub fn check_readable_file(file: &str) -> Result<String, String> {
    // split by semi-colon
    let files = file.split(';');
    for file in files {
        let path = PathBuf::from(file);
        if !path.is_file() || fs::metadata(&path).is_err() {
            return Err(format!("The sql startup script '{file}' is not readable."));
        }
    }
    Ok(file.to_string())
}

/// # Errors
///
/// Will return `Err` if the file is not readable or is not valid json
pub fn check_readable_file_and_json(file: &str) -> Result<Value, String> {
    let path = PathBuf::from(file);
    if !path.is_file() || fs::metadata(&path).is_err() {
        return Err(format!("The json file '{file}' is not readable."));
    }
    let contents = fs::read_to_string(&path)
        .map_err(|e| format!("The json file '{file}' is not readable: {e}"))?;
    let json: Value = serde_json::from_str(&contents)
        .map_err(|e| format!("The json file '{file}' is not valid json: {e}"))?;
    validate_json_format(&json)?;
    Ok(json)
}

/// Validate the seed file shape.
/// format we expect is this:
/// { "productos": [{"nombre": "..", "descripcion": "..", "precio": "12.50"}, ...]
/// , "embarques": [{"codigo": "..", "destino": "..", "fecha_envio": "2024-05-01", "productos": ["<nombre>", ...]}, ...]
/// }
/// Field values are checked later by the same validation the web forms use.
///
/// # Errors
///
/// Will return `Err` if the json is not in the correct format
pub fn validate_json_format(json: &Value) -> Result<(), String> {
    let Some(root) = json.as_object() else {
        return Err("The json file is not in the correct format. Expected an object.".to_string());
    };

    let expected_keys = ["productos", "embarques"];
    for key in root.keys() {
        if !expected_keys.contains(&key.as_str()) {
            return Err(format!(
                "The json file is not in the correct format. Expected keys: {expected_keys:?}"
            ));
        }
    }

    if let Some(products) = root.get("productos") {
        let products = products
            .as_array()
            .ok_or("The json key productos is not in the correct format. Expected an array.")?;
        for product in products {
            if !product.is_object() || !product["nombre"].is_string() {
                return Err(
                    "The json key productos is not in the correct format. Expected objects with a string nombre."
                        .to_string(),
                );
            }
        }
    }

    if let Some(shipments) = root.get("embarques") {
        let shipments = shipments
            .as_array()
            .ok_or("The json key embarques is not in the correct format. Expected an array.")?;
        for shipment in shipments {
            if !shipment.is_object() || !shipment["codigo"].is_string() {
                return Err(
                    "The json key embarques is not in the correct format. Expected objects with a string codigo."
                        .to_string(),
                );
            }
            let names_ok = match &shipment["productos"] {
                Value::Null => true,
                Value::Array(names) => names.iter().all(Value::is_string),
                _ => false,
            };
            if !names_ok {
                return Err(
                    "The json key embarques.productos is not in the correct format. Expected product names."
                        .to_string(),
                );
            }
        }
    }

    Ok(())
}

/// # Errors
///
/// Will return `Err` if the prefix is set but does not start with `/` or ends with `/`
pub fn check_url_prefix(prefix: &str) -> Result<String, String> {
    if prefix.is_empty() {
        return Ok(String::new());
    }
    if !prefix.starts_with('/') || prefix.ends_with('/') {
        return Err(format!(
            "The url prefix '{prefix}' must start with '/' and must not end with '/'."
        ));
    }
    Ok(prefix.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_prefix_shape() {
        assert_eq!(check_url_prefix("").unwrap(), "");
        assert_eq!(check_url_prefix("/tienda").unwrap(), "/tienda");
        assert!(check_url_prefix("tienda").is_err());
        assert!(check_url_prefix("/tienda/").is_err());
        assert!(check_url_prefix("/").is_err());
    }

    #[test]
    fn seed_json_shape() {
        let good = json!({
            "productos": [{"nombre": "Tornillo", "precio": "1.00"}],
            "embarques": [{"codigo": "E1", "destino": "X", "fecha_envio": "2024-01-01", "productos": ["Tornillo"]}]
        });
        assert!(validate_json_format(&good).is_ok());

        assert!(validate_json_format(&json!([])).is_err());
        assert!(validate_json_format(&json!({"clientes": []})).is_err());
        assert!(validate_json_format(&json!({"productos": [{"precio": "1"}]})).is_err());
        assert!(
            validate_json_format(&json!({"embarques": [{"codigo": "E1", "productos": [1]}]}))
                .is_err()
        );
    }
}
