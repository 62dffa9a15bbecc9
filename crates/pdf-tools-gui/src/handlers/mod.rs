pub mod export;
pub mod intake;
pub mod settings;
