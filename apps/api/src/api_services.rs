mod database;
mod state_builder;

pub use state_builder::build_app_state;

#[cfg(test)]
pub use state_builder::app_state_from_snapshots;
