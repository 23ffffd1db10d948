//! Types shared by every plugin: collision layers, app state, tunables.

pub mod layers;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
