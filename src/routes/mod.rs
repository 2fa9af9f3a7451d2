pub mod dashboard;
pub mod environments;
pub mod health;
pub mod preferences;
pub mod results;
pub mod tests;
