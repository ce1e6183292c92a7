pub mod check;
pub mod loader;
pub mod modules;
pub mod run_common;
pub mod tree;

#[cfg(test)]
mod loader_tests;
#[cfg(test)]
mod modules_tests;
