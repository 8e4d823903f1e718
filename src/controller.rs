pub mod crud;
pub mod db_prefill;
pub mod routes;
