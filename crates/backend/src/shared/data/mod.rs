pub mod db;
pub mod specification;
