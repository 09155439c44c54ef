pub mod checks;
pub mod urls;
