pub mod generate_stubs;
pub mod loader_check;
pub mod repair_stubs;
