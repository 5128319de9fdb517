mod auth_port;
mod key_value_store_port;

pub use auth_port::AuthPort;
pub use key_value_store_port::KeyValueStore;

#[cfg(test)]
pub mod mocks {
    pub use super::auth_port::mock::MockAuthPort;
    pub use super::key_value_store_port::mock::MockKeyValueStore;
}
