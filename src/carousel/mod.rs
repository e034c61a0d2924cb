pub mod config;
pub mod deck;
pub mod player;
