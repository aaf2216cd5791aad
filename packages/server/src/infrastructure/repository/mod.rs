//! Lobby state storage.

pub mod inmemory;

pub use inmemory::InMemoryLobbyRepository;
