pub mod access;
pub mod catalog;
pub mod health;
pub mod navigation;
pub mod permissions;
pub mod roles;
pub mod users;

#[cfg(test)]
mod tests;
