use super::types::Args;

impl Args {
    /// Validate the database settings.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the database configuration is invalid
    pub fn validate(&self) -> Result<(), String> {
        if self.db_name.trim().is_empty() {
            return Err("Database name is required".to_string());
        }
        Ok(())
    }

    /// Concatenates the startup scripts, in the order given.
    ///
    /// # Errors
    ///
    /// Will return `Err` if a script disappeared since argument parsing
    pub fn combined_sql_script(&self) -> Result<String, String> {
        let Some(scripts) = &self.db_startup_script else {
            return Ok(String::new());
        };
        let mut combined = String::new();
        for file in scripts.split(';') {
            let sql = std::fs::read_to_string(file)
                .map_err(|e| format!("Unable to read sql startup script '{file}': {e}"))?;
            combined.push_str(&sql);
            combined.push('\n');
        }
        Ok(combined)
    }
}
